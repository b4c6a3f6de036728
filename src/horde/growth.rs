//! Level-growth model: (archetype, level) -> combat statistics
//!
//! Pure derivation, applied exactly once at actor creation. Health grows
//! quadratically, armor and damage linearly; archetype modifiers scale the
//! result. The arithmetic is f64 end to end so the decimal growth
//! constants stay exact and ceil lands on the intended integer.

use serde::{Deserialize, Serialize};

use crate::horde::archetype::{Archetype, EliteVariant};
use crate::horde::constants::*;

/// Derived combat statistics, immutable after creation
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StatBlock {
    /// Effective level a (elite bonus already applied)
    pub level: u32,
    pub max_health: u32,
    pub armor: u32,
    pub damage: u32,
    /// Multiplier over the world base speed
    pub move_speed: f32,
    pub attack_range: f32,
    pub attack_cooldown: f32,
    /// Collision radius in world units
    pub radius: f32,
}

/// Effective level for stat derivation: elites are treated as +20
pub fn effective_level(base_level: u32, is_elite: bool) -> u32 {
    if is_elite {
        base_level + ELITE_LEVEL_BONUS
    } else {
        base_level
    }
}

/// Derive the full stat block for an actor.
///
/// `variant` must be `Some` exactly when `is_elite` is true; it shifts
/// attack parameters and speed for the variants that override them.
pub fn derive_stats(
    archetype: Archetype,
    variant: Option<EliteVariant>,
    base_level: u32,
    is_elite: bool,
) -> StatBlock {
    let a = effective_level(base_level, is_elite) as f64;

    let hp_growth = 1.0 + HP_LINEAR_G * a + HP_QUADRATIC_P * a * a;
    let max_health = (HP_BASE * hp_growth * archetype.hp_mod()).ceil() as u32;

    let armor_growth = 1.0 + ARMOR_LINEAR_G * a;
    let armor = (ARMOR_BASE * armor_growth * archetype.armor_mod()).ceil() as u32;

    let damage_growth = 1.0 + DMG_LINEAR_G * a;
    let damage = (DMG_BASE * damage_growth * archetype.damage_mod()).ceil() as u32;

    let mut move_speed = archetype.base_speed();
    let mut attack_range = archetype.attack_range();
    let mut attack_cooldown = archetype.attack_cooldown();
    let mut radius = archetype.radius(is_elite);

    if let Some(variant) = variant {
        move_speed *= variant.speed_mult();
        radius *= variant.size_mult();
        match variant {
            EliteVariant::Titan => attack_range += TITAN_RANGE_BONUS,
            EliteVariant::Silverwing => attack_range = SILVERWING_ATTACK_RANGE,
            EliteVariant::Shadow => attack_cooldown = SHADOW_ATTACK_COOLDOWN,
            _ => {}
        }
    }

    // Defensive clamps; a zero range or cooldown would wedge the attack loop
    attack_range = attack_range.max(MIN_ATTACK_RANGE);
    attack_cooldown = attack_cooldown.max(MIN_ATTACK_COOLDOWN);

    StatBlock {
        level: effective_level(base_level, is_elite),
        max_health,
        armor,
        damage,
        move_speed,
        attack_range,
        attack_cooldown,
        radius,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_brawler_level_5_worked_example() {
        let stats = derive_stats(Archetype::Brawler, None, 5, false);
        assert_eq!(stats.max_health, 4750);
        assert_eq!(stats.armor, 100);
        assert_eq!(stats.damage, 250);
    }

    #[test]
    fn test_level_0_base_values() {
        let stats = derive_stats(Archetype::Brawler, None, 0, false);
        assert_eq!(stats.max_health, 1000);
        assert_eq!(stats.armor, 50);
        assert_eq!(stats.damage, 100);
    }

    #[test]
    fn test_elite_stats_equal_base_plus_20() {
        let elite = derive_stats(Archetype::Stalker, Some(EliteVariant::Shadow), 10, true);
        let shifted = derive_stats(Archetype::Stalker, None, 30, false);
        assert_eq!(elite.level, 30);
        assert_eq!(elite.max_health, shifted.max_health);
        assert_eq!(elite.armor, shifted.armor);
        assert_eq!(elite.damage, shifted.damage);
    }

    #[test]
    fn test_bulwark_modifiers_applied() {
        let stats = derive_stats(Archetype::Bulwark, None, 0, false);
        assert_eq!(stats.max_health, 1200);
        assert_eq!(stats.armor, 75);
        assert_eq!(stats.damage, 80);
    }

    #[test]
    fn test_stalker_modifiers_applied() {
        let stats = derive_stats(Archetype::Stalker, None, 0, false);
        assert_eq!(stats.max_health, 800);
        assert_eq!(stats.armor, 30);
        assert_eq!(stats.damage, 130);
    }

    #[test]
    fn test_ceil_does_not_inflate_exact_products() {
        // Growth terms that land on whole numbers must stay there; a
        // representation error above the exact value would ceil one too high
        let bulwark = derive_stats(Archetype::Bulwark, None, 5, false);
        assert_eq!(bulwark.max_health, 5700); // 1000 * 4.75 * 1.2
        assert_eq!(bulwark.armor, 150); // 50 * 2.0 * 1.5
        assert_eq!(bulwark.damage, 200); // 100 * 2.5 * 0.8
        let stalker = derive_stats(Archetype::Stalker, None, 5, false);
        assert_eq!(stalker.max_health, 3800);
        assert_eq!(stalker.armor, 60);
        assert_eq!(stalker.damage, 325);
    }

    #[test]
    fn test_shadow_overrides_cooldown_and_speed() {
        let stats = derive_stats(Archetype::Stalker, Some(EliteVariant::Shadow), 1, true);
        assert_eq!(stats.attack_cooldown, SHADOW_ATTACK_COOLDOWN);
        assert!((stats.move_speed - SHADOW_SPEED_MULT).abs() < 1e-6);
    }

    #[test]
    fn test_silverwing_is_ranged() {
        let stats = derive_stats(Archetype::Stalker, Some(EliteVariant::Silverwing), 1, true);
        assert_eq!(stats.attack_range, SILVERWING_ATTACK_RANGE);
    }

    #[test]
    fn test_titan_extends_range_and_size() {
        let base = derive_stats(Archetype::Bulwark, Some(EliteVariant::Thornguard), 1, true);
        let titan = derive_stats(Archetype::Bulwark, Some(EliteVariant::Titan), 1, true);
        assert_eq!(titan.attack_range, base.attack_range + TITAN_RANGE_BONUS);
        assert!(titan.radius > base.radius);
    }

    proptest! {
        #[test]
        fn prop_stats_positive_and_nondecreasing(level in 0u32..200) {
            for archetype in Archetype::ALL {
                let lo = derive_stats(archetype, None, level, false);
                let hi = derive_stats(archetype, None, level + 1, false);
                prop_assert!(lo.max_health > 0);
                prop_assert!(lo.armor > 0);
                prop_assert!(lo.damage > 0);
                prop_assert!(hi.max_health >= lo.max_health);
                prop_assert!(hi.armor >= lo.armor);
                prop_assert!(hi.damage >= lo.damage);
            }
        }

        #[test]
        fn prop_attack_parameters_clamped_positive(level in 0u32..200) {
            for archetype in Archetype::ALL {
                let stats = derive_stats(archetype, None, level, false);
                prop_assert!(stats.attack_range >= MIN_ATTACK_RANGE);
                prop_assert!(stats.attack_cooldown >= MIN_ATTACK_COOLDOWN);
            }
        }
    }
}
