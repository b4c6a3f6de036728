//! Per-tick aura precompute pass
//!
//! Runs once at the start of each tick, before any attack or damage is
//! resolved, so every resolution within the tick sees one consistent
//! snapshot. Dead, reviving and undying actors neither project auras nor
//! receive them.

use crate::core::types::Vec2;
use crate::horde::actor::Actor;
use crate::horde::archetype::Archetype;
use crate::horde::constants::{
    BRAWLER_AURA_FACTOR, BRAWLER_AURA_RANGE, BULWARK_ARMOR_AURA, BULWARK_ARMOR_AURA_RANGE,
};

/// Recompute both cached aura bonuses for every actor.
///
/// Unity (Brawler): each alive Brawler gains +10% damage per *other*
/// alive Brawler within range; non-Brawlers get zero.
///
/// Iron (Bulwark): every alive actor, the projecting Bulwark included,
/// gains +10 flat armor per alive Bulwark within range.
pub fn precompute_auras(actors: &mut [Actor]) {
    let brawlers: Vec<(usize, Vec2)> = actors
        .iter()
        .enumerate()
        .filter(|(_, a)| a.is_alive && !a.is_inert() && a.archetype == Archetype::Brawler)
        .map(|(i, a)| (i, a.position))
        .collect();
    let bulwarks: Vec<Vec2> = actors
        .iter()
        .filter(|a| a.is_alive && !a.is_inert() && a.archetype == Archetype::Bulwark)
        .map(|a| a.position)
        .collect();

    let aura_range_sq = BRAWLER_AURA_RANGE * BRAWLER_AURA_RANGE;
    let armor_range_sq = BULWARK_ARMOR_AURA_RANGE * BULWARK_ARMOR_AURA_RANGE;

    for (idx, actor) in actors.iter_mut().enumerate() {
        if !actor.is_alive || actor.is_inert() {
            actor.cached_aura_bonus = 0.0;
            actor.cached_armor_bonus = 0.0;
            continue;
        }

        actor.cached_aura_bonus = if actor.archetype == Archetype::Brawler {
            let packmates = brawlers
                .iter()
                .filter(|(i, pos)| *i != idx && pos.distance_sq(&actor.position) <= aura_range_sq)
                .count();
            BRAWLER_AURA_FACTOR * packmates as f32
        } else {
            0.0
        };

        let nearby_bulwarks = bulwarks
            .iter()
            .filter(|pos| pos.distance_sq(&actor.position) <= armor_range_sq)
            .count();
        actor.cached_armor_bonus = BULWARK_ARMOR_AURA * nearby_bulwarks as f32;
    }
}
