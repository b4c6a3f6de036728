//! Actor archetypes and elite variants
//!
//! The archetype is a closed tag fixed at creation; elite actors carry one
//! of two archetype-specific variant tags rolled once and immutable after.
//! All per-variant behavior differences dispatch off these tags - there is
//! no deeper hierarchy.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::horde::constants::*;

/// The three base actor kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    /// Melee pack fighter: unity aura, one-time revival
    Brawler,
    /// Slow area attacker: block, iron aura, corpse explosion
    Bulwark,
    /// Fast skirmisher: dash, evade, crit lifesteal, armor penetration
    Stalker,
}

impl Archetype {
    pub const ALL: [Archetype; 3] = [Archetype::Brawler, Archetype::Bulwark, Archetype::Stalker];

    pub fn name(&self) -> &'static str {
        match self {
            Archetype::Brawler => "Brawler",
            Archetype::Bulwark => "Bulwark",
            Archetype::Stalker => "Stalker",
        }
    }

    /// Health growth modifier (f64: feeds straight into stat derivation)
    pub fn hp_mod(&self) -> f64 {
        match self {
            Archetype::Brawler => 1.0,
            Archetype::Bulwark => 1.2,
            Archetype::Stalker => 0.8,
        }
    }

    /// Armor growth modifier
    pub fn armor_mod(&self) -> f64 {
        match self {
            Archetype::Brawler => 1.0,
            Archetype::Bulwark => 1.5,
            Archetype::Stalker => 0.6,
        }
    }

    /// Damage growth modifier
    pub fn damage_mod(&self) -> f64 {
        match self {
            Archetype::Brawler => 1.0,
            Archetype::Bulwark => 0.8,
            Archetype::Stalker => 1.3,
        }
    }

    /// Base movement speed multiplier (before elite variant scaling)
    pub fn base_speed(&self) -> f32 {
        match self {
            Archetype::Brawler => 1.1,
            _ => 1.0,
        }
    }

    /// Attack range in world units, fixed per archetype.
    /// For the Bulwark this is the maximum ring radius.
    pub fn attack_range(&self) -> f32 {
        match self {
            Archetype::Brawler => BRAWLER_ATTACK_RANGE,
            Archetype::Bulwark => BULWARK_RING_RANGE,
            Archetype::Stalker => STALKER_ATTACK_RANGE,
        }
    }

    /// Attack cooldown in seconds, fixed per archetype
    pub fn attack_cooldown(&self) -> f32 {
        match self {
            Archetype::Brawler => BRAWLER_ATTACK_COOLDOWN,
            Archetype::Bulwark => BULWARK_ATTACK_COOLDOWN,
            Archetype::Stalker => STALKER_ATTACK_COOLDOWN,
        }
    }

    /// Collision radius in world units
    pub fn radius(&self, is_elite: bool) -> f32 {
        match (self, is_elite) {
            (Archetype::Brawler, false) => BRAWLER_RADIUS,
            (Archetype::Brawler, true) => BRAWLER_ELITE_RADIUS,
            (Archetype::Bulwark, false) => BULWARK_RADIUS,
            (Archetype::Bulwark, true) => BULWARK_ELITE_RADIUS,
            (Archetype::Stalker, false) => STALKER_RADIUS,
            (Archetype::Stalker, true) => STALKER_ELITE_RADIUS,
        }
    }

    /// Stalkers wade through river tiles that stop everything else
    pub fn wades_rivers(&self) -> bool {
        matches!(self, Archetype::Stalker)
    }
}

/// Elite special-ability branch, two exclusive options per archetype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EliteVariant {
    /// Brawler: periodically calls weak packmates when the target is near
    Summoner,
    /// Brawler: a final death leaves a 1-health invulnerable husk for a while
    Undying,
    /// Bulwark: bigger body, longer ring, keeps the block
    Titan,
    /// Bulwark: trades the block for reflected damage
    Thornguard,
    /// Stalker: rapid attacks and extra speed
    Shadow,
    /// Stalker: attacks become ranged projectiles
    Silverwing,
}

impl EliteVariant {
    /// Roll one of the two variants legal for this archetype
    pub fn roll<R: Rng>(archetype: Archetype, rng: &mut R) -> Self {
        let pair = Self::pair_for(archetype);
        if rng.gen_bool(0.5) {
            pair.0
        } else {
            pair.1
        }
    }

    pub fn pair_for(archetype: Archetype) -> (EliteVariant, EliteVariant) {
        match archetype {
            Archetype::Brawler => (EliteVariant::Summoner, EliteVariant::Undying),
            Archetype::Bulwark => (EliteVariant::Titan, EliteVariant::Thornguard),
            Archetype::Stalker => (EliteVariant::Shadow, EliteVariant::Silverwing),
        }
    }

    pub fn archetype(&self) -> Archetype {
        match self {
            EliteVariant::Summoner | EliteVariant::Undying => Archetype::Brawler,
            EliteVariant::Titan | EliteVariant::Thornguard => Archetype::Bulwark,
            EliteVariant::Shadow | EliteVariant::Silverwing => Archetype::Stalker,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EliteVariant::Summoner => "Summoner",
            EliteVariant::Undying => "Undying",
            EliteVariant::Titan => "Titan",
            EliteVariant::Thornguard => "Thornguard",
            EliteVariant::Shadow => "Shadow",
            EliteVariant::Silverwing => "Silverwing",
        }
    }

    /// Additional speed multiplier layered over the archetype base
    pub fn speed_mult(&self) -> f32 {
        match self {
            EliteVariant::Shadow => SHADOW_SPEED_MULT,
            _ => 1.0,
        }
    }

    /// Additional collision-radius multiplier
    pub fn size_mult(&self) -> f32 {
        match self {
            EliteVariant::Titan => TITAN_SIZE_MULT,
            _ => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_growth_modifiers_match_design() {
        assert_eq!(Archetype::Bulwark.hp_mod(), 1.2);
        assert_eq!(Archetype::Bulwark.armor_mod(), 1.5);
        assert_eq!(Archetype::Bulwark.damage_mod(), 0.8);
        assert_eq!(Archetype::Stalker.damage_mod(), 1.3);
        assert_eq!(Archetype::Brawler.hp_mod(), 1.0);
    }

    #[test]
    fn test_brawler_is_the_fast_walker() {
        assert!(Archetype::Brawler.base_speed() > Archetype::Bulwark.base_speed());
        assert_eq!(Archetype::Stalker.base_speed(), 1.0);
    }

    #[test]
    fn test_rolled_variant_belongs_to_archetype() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for archetype in Archetype::ALL {
            for _ in 0..20 {
                let variant = EliteVariant::roll(archetype, &mut rng);
                assert_eq!(variant.archetype(), archetype);
            }
        }
    }

    #[test]
    fn test_both_variants_reachable() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..100 {
            seen.insert(EliteVariant::roll(Archetype::Bulwark, &mut rng));
        }
        assert!(seen.contains(&EliteVariant::Titan));
        assert!(seen.contains(&EliteVariant::Thornguard));
    }

    #[test]
    fn test_elite_radius_larger() {
        for archetype in Archetype::ALL {
            assert!(archetype.radius(true) > archetype.radius(false));
        }
    }
}
