//! Player collaborator
//!
//! The engine treats the player as a data source: a position, a collision
//! radius, and the damage-taking contract. Movement, aiming and shooting
//! live outside the core; the player's own damage output is just a number
//! the front end applies through `Simulation::apply_player_hit`.

use serde::{Deserialize, Serialize};

use crate::core::types::Vec2;

pub const PLAYER_RADIUS: f32 = 16.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub position: Vec2,
    pub radius: f32,
    pub max_health: f32,
    pub health: f32,
    pub armor: f32,
    /// Damage per hit the front end applies to actors
    pub damage: f32,
    /// Armor constant K in the reduction formula
    armor_constant: f32,
}

impl Player {
    pub fn new(position: Vec2, armor_constant: f32) -> Self {
        Self {
            position,
            radius: PLAYER_RADIUS,
            max_health: 5000.0,
            health: 5000.0,
            armor: 100.0,
            damage: 500.0,
            armor_constant,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// Apply incoming damage through the armor pipeline.
    ///
    /// `armor_penetration` is the fraction of armor the attacker ignores.
    /// Returns the damage actually deducted from health.
    pub fn take_damage(&mut self, amount: f32, source: &str, armor_penetration: f32) -> f32 {
        if self.is_dead() {
            return 0.0;
        }

        let effective_armor = self.armor * (1.0 - armor_penetration);
        let denom = effective_armor + self.armor_constant;
        let reduction = if denom > 0.0 { effective_armor / denom } else { 0.0 };
        let actual = amount * (1.0 - reduction);

        self.health = (self.health - actual).max(0.0);
        tracing::debug!(
            source,
            incoming = amount,
            applied = actual,
            health = self.health,
            "player hit"
        );
        actual
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_player() -> Player {
        Player::new(Vec2::default(), 100.0)
    }

    #[test]
    fn test_armor_halves_damage_at_k() {
        // armor 100, K 100 -> 50% reduction
        let mut player = test_player();
        let applied = player.take_damage(100.0, "test", 0.0);
        assert!((applied - 50.0).abs() < 1e-4);
        assert!((player.health - 4950.0).abs() < 1e-3);
    }

    #[test]
    fn test_armor_penetration_raises_damage() {
        let mut player = test_player();
        // 20% pen: effective armor 80 -> reduction 80/180
        let applied = player.take_damage(100.0, "test", 0.20);
        let expected = 100.0 * (1.0 - 80.0 / 180.0);
        assert!((applied - expected).abs() < 1e-4);
    }

    #[test]
    fn test_dead_player_takes_nothing() {
        let mut player = test_player();
        player.health = 0.0;
        assert_eq!(player.take_damage(100.0, "test", 0.0), 0.0);
    }

    #[test]
    fn test_health_floors_at_zero() {
        let mut player = test_player();
        player.health = 1.0;
        player.take_damage(1_000_000.0, "test", 0.0);
        assert_eq!(player.health, 0.0);
        assert!(player.is_dead());
    }
}
