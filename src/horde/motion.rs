//! Per-tick movement and movement-driven state transitions
//!
//! One entry point, `update_motion`, advances a single actor: patrol
//! wandering, detection, chase with standoff spacing, the dash sprint and
//! the knockback retreat. Collision resolves per axis so actors slide
//! along walls instead of sticking to them.

use rand::Rng;

use crate::arena::map::ArenaMap;
use crate::core::config::SimConfig;
use crate::core::types::Vec2;
use crate::horde::actor::{Actor, LifecycleState};
use crate::horde::archetype::Archetype;
use crate::horde::constants::*;

/// World margin kept between an actor's edge and the map border
const BOUNDS_MARGIN: f32 = 5.0;

/// Read-only world context for one motion update
pub struct MotionContext<'a> {
    pub map: &'a ArenaMap,
    pub config: &'a SimConfig,
    pub player_pos: Vec2,
    pub player_radius: f32,
    pub dt: f32,
}

/// Put an actor into the post-attack retreat, backing away from the
/// target over its own attack range
pub fn begin_knockback(actor: &mut Actor, target: Vec2) {
    actor.state = LifecycleState::Recovery;
    actor.knockback_direction = (actor.position - target).normalize();
    actor.knockback_remaining = actor.stats.attack_range;
}

/// Advance one actor's position and movement state for this tick
pub fn update_motion<R: Rng>(actor: &mut Actor, ctx: &MotionContext, rng: &mut R) {
    if actor.is_inert() {
        return;
    }
    // Ring animation roots the attacker in place
    if actor.state == LifecycleState::Attacking {
        return;
    }

    let dist = actor.position.distance(&ctx.player_pos);

    if actor.state == LifecycleState::Patrol && dist <= ctx.config.detection_range {
        actor.state = LifecycleState::Chase;
    } else if actor.state == LifecycleState::Chase && dist > ctx.config.detection_range {
        actor.state = LifecycleState::Patrol;
    }

    match actor.state {
        LifecycleState::Patrol => patrol_move(actor, ctx, rng),
        LifecycleState::Recovery => knockback_move(actor, ctx),
        LifecycleState::Chase | LifecycleState::Dashing => {
            if actor.archetype == Archetype::Stalker
                && actor.state == LifecycleState::Chase
                && actor.dash_timer <= 0.0
                && (DASH_MIN_RANGE..=DASH_MAX_RANGE).contains(&dist)
            {
                actor.start_dash();
            }
            actor.advance_dash(ctx.dt);
            chase_move(actor, ctx, dist);
        }
        _ => {}
    }
}

fn patrol_move<R: Rng>(actor: &mut Actor, ctx: &MotionContext, rng: &mut R) {
    match actor.archetype {
        // Bulwarks hold their post until something comes in range
        Archetype::Bulwark => {}
        Archetype::Brawler => {
            actor.wander_timer -= ctx.dt;
            if actor.wander_timer <= 0.0 || actor.wander_direction == Vec2::default() {
                reroll_wander(actor, rng);
            }
            let speed =
                ctx.config.base_move_speed * actor.stats.move_speed * BRAWLER_WANDER_SPEED_FACTOR;
            let delta = actor.wander_direction * (speed * ctx.dt);
            if move_with_slide(actor, delta, ctx) {
                // Ran into something; pick a fresh heading right away
                reroll_wander(actor, rng);
            }
        }
        Archetype::Stalker => {
            actor.patrol_angle += STALKER_PATROL_ANGULAR_SPEED * ctx.dt;
            let target = Vec2::new(
                actor.spawn_position.x + STALKER_PATROL_RADIUS_X * actor.patrol_angle.cos(),
                actor.spawn_position.y + STALKER_PATROL_RADIUS_Y * actor.patrol_angle.sin(),
            );
            let to_target = target - actor.position;
            if to_target.length() > STALKER_PATROL_SLACK {
                let speed = ctx.config.base_move_speed
                    * actor.stats.move_speed
                    * STALKER_PATROL_SPEED_FACTOR;
                let delta = to_target.normalize() * (speed * ctx.dt);
                actor.facing = to_target.y.atan2(to_target.x);
                move_with_slide(actor, delta, ctx);
            }
        }
    }
}

fn reroll_wander<R: Rng>(actor: &mut Actor, rng: &mut R) {
    let angle = rng.gen::<f32>() * std::f32::consts::TAU;
    actor.wander_direction = Vec2::new(angle.cos(), angle.sin());
    actor.wander_timer = BRAWLER_WANDER_INTERVAL;
    actor.facing = angle;
}

fn knockback_move(actor: &mut Actor, ctx: &MotionContext) {
    let step = (ctx.config.knockback_speed * ctx.dt).min(actor.knockback_remaining);
    let delta = actor.knockback_direction * step;
    let blocked = move_with_slide(actor, delta, ctx);
    actor.knockback_remaining -= step;
    if blocked || actor.knockback_remaining <= 0.0 {
        actor.knockback_remaining = 0.0;
        actor.state = LifecycleState::Chase;
    }
}

fn chase_move(actor: &mut Actor, ctx: &MotionContext, dist: f32) {
    let min_dist = ctx.player_radius + actor.stats.radius + STANDOFF_MARGIN;
    let hold = match actor.archetype {
        // Bulwarks never crowd in; they wait for the ring to reach out
        Archetype::Bulwark => dist <= min_dist,
        // Melee attackers keep their distance only while on cooldown
        _ => !actor.attack_ready() && dist <= min_dist,
    };
    if hold {
        return;
    }

    let to_player = ctx.player_pos - actor.position;
    let speed = ctx.config.base_move_speed * actor.stats.move_speed * actor.dash_speed_mult;
    let delta = to_player.normalize() * (speed * ctx.dt);
    actor.facing = to_player.y.atan2(to_player.x);
    move_with_slide(actor, delta, ctx);
}

/// Axis-separated move with wall sliding and a hard bounds clamp.
///
/// A blocked axis snaps the actor to the offending tile's edge instead of
/// refusing the move, so actors that spawn inside buildings work their way
/// out over a few ticks. Returns true if either axis hit a wall or the
/// border.
fn move_with_slide(actor: &mut Actor, delta: Vec2, ctx: &MotionContext) -> bool {
    let wades = actor.archetype.wades_rivers();
    let radius = actor.stats.radius;
    let tile_size = ctx.config.tile_size;
    let mut blocked = false;

    let mut candidate = actor.position;
    candidate.x += delta.x;
    match ctx.map.first_blocking_tile(candidate, radius, wades, tile_size) {
        Some(tile) if delta.x != 0.0 => {
            blocked = true;
            let left = tile.col as f32 * tile_size;
            let right = left + tile_size;
            // Inside the tile: push against the travel direction, so a
            // wall-spawned actor makes monotone progress out of its
            // building. Grazing from outside: stay on this side.
            let push_left = if (left..right).contains(&candidate.x) {
                delta.x > 0.0
            } else {
                candidate.x < left
            };
            actor.position.x = if push_left { left - radius } else { right + radius };
        }
        Some(_) => blocked = true,
        None => actor.position.x = candidate.x,
    }

    let mut candidate = actor.position;
    candidate.y += delta.y;
    match ctx.map.first_blocking_tile(candidate, radius, wades, tile_size) {
        Some(tile) if delta.y != 0.0 => {
            blocked = true;
            let top = tile.row as f32 * tile_size;
            let bottom = top + tile_size;
            let push_up = if (top..bottom).contains(&candidate.y) {
                delta.y > 0.0
            } else {
                candidate.y < top
            };
            actor.position.y = if push_up { top - radius } else { bottom + radius };
        }
        Some(_) => blocked = true,
        None => actor.position.y = candidate.y,
    }

    let (world_w, world_h) = ctx.map.world_size(tile_size);
    let margin = radius + BOUNDS_MARGIN;
    let clamped = Vec2::new(
        actor.position.x.clamp(margin, world_w - margin),
        actor.position.y.clamp(margin, world_h - margin),
    );
    if clamped != actor.position {
        actor.position = clamped;
        blocked = true;
    }
    blocked
}
