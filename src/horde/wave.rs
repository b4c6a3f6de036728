//! Wave generation: population sizing, composition and placement
//!
//! A wave is generated for a day number whenever the arena is empty. Size
//! scales with map area and day, elite odds climb with the day, and each
//! slot is drawn from the archetype weights restricted to archetypes that
//! actually have somewhere to spawn on this map.

use rand::distributions::WeightedIndex;
use rand::prelude::*;

use crate::arena::map::ArenaMap;
use crate::core::config::SimConfig;
use crate::core::types::Vec2;
use crate::horde::actor::Actor;
use crate::horde::archetype::{Archetype, EliteVariant};
use crate::horde::constants::*;

/// Wave size for a map area (tiles) and day number:
/// `floor(area/100 + 2*day + 0.1*day^1.5)`
pub fn wave_population(area: usize, day: u32) -> usize {
    let day = day as f64;
    (area as f64 / 100.0 + 2.0 * day + 0.1 * day.powf(1.5)).floor() as usize
}

/// Chance for any spawned actor to be elite, capped
pub fn elite_chance(day: u32) -> f32 {
    (ELITE_CHANCE_BASE + ELITE_CHANCE_PER_DAY * day as f32).min(ELITE_CHANCE_CAP)
}

/// Generate the full wave for a day. Returns an empty vec (with a
/// warning) if no archetype has a legal spawn tile on this map.
pub fn generate_wave<R: Rng>(
    map: &ArenaMap,
    day: u32,
    config: &SimConfig,
    rng: &mut R,
) -> Vec<Actor> {
    let mut archetypes = Vec::new();
    let mut weights = Vec::new();
    let mut candidates = Vec::new();
    for (archetype, weight) in [
        (Archetype::Brawler, WAVE_WEIGHT_BRAWLER),
        (Archetype::Stalker, WAVE_WEIGHT_STALKER),
        (Archetype::Bulwark, WAVE_WEIGHT_BULWARK),
    ] {
        let tiles = map.spawn_candidates(archetype);
        if !tiles.is_empty() {
            archetypes.push(archetype);
            weights.push(weight);
            candidates.push(tiles);
        }
    }

    if archetypes.is_empty() {
        tracing::warn!(day, "no spawnable archetypes on this map; wave is empty");
        return Vec::new();
    }

    let dist = WeightedIndex::new(&weights).expect("weights are positive");
    let population = wave_population(map.area(), day);
    let chance = elite_chance(day);
    let jitter = config.tile_size * SPAWN_JITTER_FRAC;

    let mut wave = Vec::with_capacity(population);
    for _ in 0..population {
        let slot = dist.sample(rng);
        let archetype = archetypes[slot];
        let tiles = &candidates[slot];
        let tile = tiles[rng.gen_range(0..tiles.len())];

        let center = map.tile_center(tile, config.tile_size);
        let position = Vec2::new(
            center.x + rng.gen_range(-jitter..=jitter),
            center.y + rng.gen_range(-jitter..=jitter),
        );

        let is_elite = rng.gen::<f32>() < chance;
        let variant = is_elite.then(|| EliteVariant::roll(archetype, rng));

        let mut actor = Actor::new(archetype, day, is_elite, variant, position);
        clamp_into_world(&mut actor, map, config.tile_size);
        wave.push(actor);
    }

    tracing::info!(day, count = wave.len(), elite_chance = chance, "wave generated");
    wave
}

/// Reinforcements called by a Summoner elite: a few weak non-elite
/// Brawlers scattered around the caller, inheriting its pre-elite level.
pub fn summon_pack<R: Rng>(summoner: &Actor, map: &ArenaMap, config: &SimConfig, rng: &mut R) -> Vec<Actor> {
    let count = rng.gen_range(SUMMON_COUNT_MIN..=SUMMON_COUNT_MAX);
    let base_level = summoner.stats.level.saturating_sub(ELITE_LEVEL_BONUS);

    let mut pack = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let position = Vec2::new(
            summoner.position.x + rng.gen_range(-SUMMON_SCATTER..=SUMMON_SCATTER),
            summoner.position.y + rng.gen_range(-SUMMON_SCATTER..=SUMMON_SCATTER),
        );
        let mut actor = Actor::new(Archetype::Brawler, base_level, false, None, position);
        clamp_into_world(&mut actor, map, config.tile_size);
        pack.push(actor);
    }
    pack
}

fn clamp_into_world(actor: &mut Actor, map: &ArenaMap, tile_size: f32) {
    let (world_w, world_h) = map.world_size(tile_size);
    let margin = actor.stats.radius + 5.0;
    actor.position.x = actor.position.x.clamp(margin, world_w - margin);
    actor.position.y = actor.position.y.clamp(margin, world_h - margin);
    actor.spawn_position = actor.position;
}
