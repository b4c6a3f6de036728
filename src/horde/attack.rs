//! Attack assembly: turning a ready actor into a structured attack
//!
//! The attack pass computes what an actor's swing *is* (damage, crit,
//! penetration, delivery kind); the tick loop decides what it hits. Ring
//! and projectile deliveries are deferred: the ring damages on contact in
//! a later pass, the projectile is handed to the front end as a request.

use rand::Rng;

use crate::horde::actor::Actor;
use crate::horde::archetype::{Archetype, EliteVariant};
use crate::horde::constants::*;

/// How an attack reaches its target
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttackKind {
    /// Immediate contact damage
    Melee,
    /// Expanding ring; damage resolved by the contact pass
    Ring,
    /// Ranged request for the front end to fly
    Projectile { speed: f32, range: f32 },
}

/// A fully assembled attack, ready to resolve
#[derive(Debug, Clone)]
pub struct AttackOutcome {
    pub damage: f32,
    /// Fraction of target armor ignored
    pub armor_penetration: f32,
    pub is_critical: bool,
    /// Health the attacker recovers if the hit lands
    pub lifesteal: f32,
    pub kind: AttackKind,
}

/// Assemble an attack for an actor whose cooldown has elapsed.
///
/// Base damage is the stat value scaled by the cached unity bonus; the
/// Stalker then layers crit, crit-gated lifesteal and armor penetration
/// on top. Does not touch cooldowns - the caller records the attack.
pub fn assemble_attack<R: Rng>(actor: &Actor, rng: &mut R) -> AttackOutcome {
    let mut damage = actor.stats.damage as f32 * (1.0 + actor.cached_aura_bonus);
    let mut armor_penetration = 0.0;
    let mut is_critical = false;
    let mut lifesteal = 0.0;

    if actor.archetype == Archetype::Stalker {
        armor_penetration = LONE_WOLF_ARMOR_PEN;
        if rng.gen::<f32>() < BLOODTHIRST_CRIT_CHANCE {
            is_critical = true;
            damage *= BLOODTHIRST_CRIT_MULT;
            lifesteal = damage * BLOODTHIRST_LIFESTEAL;
        }
    }

    let kind = match (actor.archetype, actor.elite_variant) {
        (Archetype::Bulwark, _) => AttackKind::Ring,
        (_, Some(EliteVariant::Silverwing)) => AttackKind::Projectile {
            speed: SILVERWING_PROJECTILE_SPEED,
            range: SILVERWING_ATTACK_RANGE,
        },
        _ => AttackKind::Melee,
    };

    AttackOutcome {
        damage,
        armor_penetration,
        is_critical,
        lifesteal,
        kind,
    }
}
