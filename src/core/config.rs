//! Simulation configuration with documented constants
//!
//! Balance values that define the horde itself (growth curves, skill
//! chances) are fixed and live in `crate::horde::constants`. This struct
//! holds the knobs a scenario is allowed to turn.

use serde::{Deserialize, Serialize};

use crate::core::error::{GravemarchError, Result};

/// Runtime configuration for a simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// RNG seed. Two runs with the same seed, map and inputs produce the
    /// same wave composition and combat rolls.
    pub seed: u64,

    /// Day counter the first wave is generated for. Later days mean
    /// bigger, more elite waves.
    pub starting_day: u32,

    /// Hard cap on the active population. Summoner elites stop calling
    /// reinforcements at this size; wave generation is not capped.
    pub population_cap: usize,

    /// Edge length of one map tile in world units. Spawn coordinates and
    /// wall colliders are derived from this.
    pub tile_size: f32,

    /// World-units-per-second movement of a speed-1.0 actor. Archetype
    /// and dash multipliers stack on top.
    pub base_move_speed: f32,

    /// Speed of the post-attack retreat (Recovery state).
    pub knockback_speed: f32,

    /// Distance at which any actor notices the player and leaves Patrol.
    pub detection_range: f32,

    /// Armor constant K in `reduction = armor / (armor + K)`.
    ///
    /// At K = 100, 100 armor halves incoming damage; diminishing returns
    /// beyond that.
    pub armor_constant: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            starting_day: 1,
            population_cap: 500,
            tile_size: 64.0,
            base_move_speed: 50.0,
            knockback_speed: 150.0,
            detection_range: 400.0,
            armor_constant: 100.0,
        }
    }
}

impl SimConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.tile_size <= 0.0 {
            return Err(GravemarchError::InvalidConfig(format!(
                "tile_size ({}) must be positive",
                self.tile_size
            )));
        }
        if self.base_move_speed <= 0.0 || self.knockback_speed <= 0.0 {
            return Err(GravemarchError::InvalidConfig(
                "movement speeds must be positive".into(),
            ));
        }
        if self.detection_range <= 0.0 {
            return Err(GravemarchError::InvalidConfig(
                "detection_range must be positive".into(),
            ));
        }
        if self.armor_constant <= 0.0 {
            return Err(GravemarchError::InvalidConfig(
                "armor_constant must be positive".into(),
            ));
        }
        if self.population_cap == 0 {
            return Err(GravemarchError::InvalidConfig(
                "population_cap must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// On-disk scenario description (JSON), overriding parts of the defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scenario {
    /// ASCII tile map; `None` uses the built-in arena
    pub map: Option<String>,
    pub seed: Option<u64>,
    pub starting_day: Option<u32>,
}

impl Scenario {
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let scenario = serde_json::from_str(&text)?;
        Ok(scenario)
    }

    /// Fold the scenario's overrides into a config
    pub fn apply(&self, config: &mut SimConfig) {
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(day) = self.starting_day {
            config.starting_day = day;
        }
    }
}
