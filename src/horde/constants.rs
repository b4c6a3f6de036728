//! Horde balance constants - all tunable values in one place
//!
//! Distances are world units, times are seconds of simulation time.

// Growth model (level a). Kept f64 so the decimal literals survive the
// derivation arithmetic without pushing ceil past the exact value.
pub const HP_BASE: f64 = 1000.0;
pub const ARMOR_BASE: f64 = 50.0;
pub const DMG_BASE: f64 = 100.0;
pub const HP_LINEAR_G: f64 = 0.5;
pub const HP_QUADRATIC_P: f64 = 0.05; // quadratic term
pub const ARMOR_LINEAR_G: f64 = 0.2;
pub const DMG_LINEAR_G: f64 = 0.3;
pub const ELITE_LEVEL_BONUS: u32 = 20;

// Derivation-time clamps for degenerate attack parameters
pub const MIN_ATTACK_RANGE: f32 = 1.0;
pub const MIN_ATTACK_COOLDOWN: f32 = 0.05;

// Per-archetype attack parameters (fixed, not level-scaled)
pub const BRAWLER_ATTACK_RANGE: f32 = 50.0;
pub const BRAWLER_ATTACK_COOLDOWN: f32 = 1.5;
pub const BULWARK_RING_RANGE: f32 = 100.0;
pub const BULWARK_ATTACK_COOLDOWN: f32 = 3.0;
pub const STALKER_ATTACK_RANGE: f32 = 60.0;
pub const STALKER_ATTACK_COOLDOWN: f32 = 1.2;

// Brawler skills
pub const BRAWLER_AURA_FACTOR: f32 = 0.10; // +10% damage per packmate
pub const BRAWLER_AURA_RANGE: f32 = 200.0;
pub const BRAWLER_REVIVE_DELAY: f32 = 3.0;
pub const SUMMON_THREAT_RANGE: f32 = 400.0;
pub const SUMMON_COOLDOWN: f32 = 20.0;
pub const SUMMON_COUNT_MIN: u32 = 3;
pub const SUMMON_COUNT_MAX: u32 = 5;
pub const SUMMON_SCATTER: f32 = 50.0;
pub const UNDYING_DURATION: f32 = 10.0;

// Bulwark skills
pub const BULWARK_BLOCK_CHANCE: f32 = 0.15;
pub const BULWARK_BLOCK_REDUCTION: f32 = 0.90; // blocked hits land at 10%
pub const BULWARK_BLOCK_COOLDOWN: f32 = 1.0;
pub const BULWARK_ARMOR_AURA: f32 = 10.0; // +10 armor per nearby Bulwark
pub const BULWARK_ARMOR_AURA_RANGE: f32 = 200.0;
pub const CORPSE_EXPLOSION_HP_FRACTION: f32 = 0.05;
pub const CORPSE_EXPLOSION_RANGE: f32 = 300.0;
pub const CORPSE_EXPLOSION_DELAY: f32 = 1.0;
pub const CORPSE_EXPLOSION_EXPAND_TIME: f32 = 0.5;
pub const TITAN_SIZE_MULT: f32 = 1.5;
pub const TITAN_RANGE_BONUS: f32 = 200.0;
pub const THORNGUARD_REFLECT_FACTOR: f32 = 0.25;
pub const THORNGUARD_COOLDOWN: f32 = 10.0;

// Stalker skills
pub const STALKER_EVADE_CHANCE: f32 = 0.20;
pub const LONE_WOLF_ARMOR_PEN: f32 = 0.20;
pub const BLOODTHIRST_CRIT_CHANCE: f32 = 0.30;
pub const BLOODTHIRST_CRIT_MULT: f32 = 2.0;
pub const BLOODTHIRST_LIFESTEAL: f32 = 0.20; // crit hits only
pub const DASH_MIN_RANGE: f32 = 300.0;
pub const DASH_MAX_RANGE: f32 = 500.0;
pub const DASH_COOLDOWN: f32 = 5.0;
pub const DASH_ACCEL_TIME: f32 = 0.5;
pub const DASH_SPEED_MULT: f32 = 3.0;
pub const SHADOW_ATTACK_COOLDOWN: f32 = 0.7;
pub const SHADOW_SPEED_MULT: f32 = 1.2;
pub const SILVERWING_ATTACK_RANGE: f32 = 300.0;
pub const SILVERWING_PROJECTILE_SPEED: f32 = 400.0;

// Patrol behavior
pub const BRAWLER_WANDER_INTERVAL: f32 = 2.0;
pub const BRAWLER_WANDER_SPEED_FACTOR: f32 = 0.5;
pub const STALKER_PATROL_RADIUS_X: f32 = 200.0;
pub const STALKER_PATROL_RADIUS_Y: f32 = 60.0;
pub const STALKER_PATROL_ANGULAR_SPEED: f32 = 1.0; // rad/s
pub const STALKER_PATROL_SPEED_FACTOR: f32 = 0.7;
pub const STALKER_PATROL_SLACK: f32 = 5.0; // dead zone around orbit target

// Collision radii
pub const BRAWLER_RADIUS: f32 = 16.0;
pub const BRAWLER_ELITE_RADIUS: f32 = 22.0;
pub const BULWARK_RADIUS: f32 = 24.0;
pub const BULWARK_ELITE_RADIUS: f32 = 32.0;
pub const STALKER_RADIUS: f32 = 14.0;
pub const STALKER_ELITE_RADIUS: f32 = 18.0;

// Engagement spacing
pub const STANDOFF_MARGIN: f32 = 10.0;
pub const RING_HIT_TOLERANCE: f32 = 15.0; // added to the target's radius

// Wave generation
pub const WAVE_WEIGHT_BRAWLER: f32 = 0.5;
pub const WAVE_WEIGHT_STALKER: f32 = 0.3;
pub const WAVE_WEIGHT_BULWARK: f32 = 0.2;
pub const ELITE_CHANCE_BASE: f32 = 0.001;
pub const ELITE_CHANCE_PER_DAY: f32 = 0.001;
pub const ELITE_CHANCE_CAP: f32 = 0.10;
pub const SPAWN_JITTER_FRAC: f32 = 0.3; // fraction of a tile around its center

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_and_evade_are_probabilities() {
        assert!(BULWARK_BLOCK_CHANCE > 0.0 && BULWARK_BLOCK_CHANCE < 1.0);
        assert!(STALKER_EVADE_CHANCE > 0.0 && STALKER_EVADE_CHANCE < 1.0);
        assert!(BLOODTHIRST_CRIT_CHANCE > 0.0 && BLOODTHIRST_CRIT_CHANCE < 1.0);
    }

    #[test]
    fn test_dash_window_ordering() {
        assert!(DASH_MIN_RANGE < DASH_MAX_RANGE);
        assert!(DASH_SPEED_MULT > 1.0);
    }

    #[test]
    fn test_shadow_cooldown_faster_than_base() {
        assert!(SHADOW_ATTACK_COOLDOWN < STALKER_ATTACK_COOLDOWN);
    }

    #[test]
    fn test_wave_weights_sum_to_one() {
        let sum = WAVE_WEIGHT_BRAWLER + WAVE_WEIGHT_STALKER + WAVE_WEIGHT_BULWARK;
        assert!((sum - 1.0).abs() < 1e-6);
    }
}
