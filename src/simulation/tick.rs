//! Fixed-order tick driver
//!
//! One tick runs, in order: aura precompute, timers and state countdowns,
//! movement, attack resolution against the player, ring contact and corpse
//! explosions, removal of finally dead actors, and wave respawn when the
//! arena empties. Actors removed mid-tick are never revisited later in the
//! same tick.
//!
//! The player's own shots arrive between ticks through
//! `Simulation::apply_player_hit`; the engine never generates them.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::arena::map::ArenaMap;
use crate::core::config::SimConfig;
use crate::core::error::{GravemarchError, Result};
use crate::core::types::{ActorId, Tick, Vec2};
use crate::horde::actor::{Actor, DamageOutcome, LifecycleState};
use crate::horde::archetype::{Archetype, EliteVariant};
use crate::horde::attack::{assemble_attack, AttackKind};
use crate::horde::aura::precompute_auras;
use crate::horde::constants::*;
use crate::horde::effects::CorpseExplosion;
use crate::horde::motion::{begin_knockback, update_motion, MotionContext};
use crate::horde::wave::{generate_wave, summon_pack};
use crate::player::Player;

/// Observable things that happened during simulation
#[derive(Debug, Clone)]
pub enum SimulationEvent {
    WaveSpawned {
        day: u32,
        count: usize,
    },
    /// A melee swing connected with the player
    AttackLanded {
        attacker: String,
        damage: f32,
        critical: bool,
    },
    /// An expanding ring reached the player
    RingHit {
        attacker: String,
        damage: f32,
    },
    /// A ranged attacker wants a projectile flown by the front end
    ProjectileRequested {
        attacker: String,
        origin: Vec2,
        target: Vec2,
        damage: f32,
        armor_penetration: f32,
        speed: f32,
        range: f32,
    },
    CorpseExploded {
        source: String,
        damage: f32,
    },
    /// Thorns bounced part of the player's own hit back
    DamageReflected {
        source: String,
        damage: f32,
    },
    Summoned {
        summoner: String,
        count: usize,
    },
    ActorRevived {
        name: String,
    },
    UndyingTriggered {
        name: String,
    },
    /// Final removal; carries what a loot system needs to know
    ActorDied {
        name: String,
        archetype: Archetype,
        level: u32,
    },
    PlayerDied,
}

pub struct Simulation {
    pub config: SimConfig,
    pub map: ArenaMap,
    pub player: Player,
    pub actors: Vec<Actor>,
    pub explosions: Vec<CorpseExplosion>,
    pub day: u32,
    pub tick: Tick,
    rng: ChaCha8Rng,
    events: Vec<SimulationEvent>,
}

impl Simulation {
    /// Build a simulation on the given map and spawn the first wave.
    /// The player starts on a random walkable tile.
    pub fn new(config: SimConfig, map: ArenaMap) -> Result<Self> {
        config.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

        let walkable = map.walkable_tiles();
        if walkable.is_empty() {
            return Err(GravemarchError::MalformedMap(
                "map has no walkable tile for the player".into(),
            ));
        }
        let start = walkable[rng.gen_range(0..walkable.len())];
        let player = Player::new(map.tile_center(start, config.tile_size), config.armor_constant);

        let day = config.starting_day;
        let mut sim = Self {
            config,
            map,
            player,
            actors: Vec::new(),
            explosions: Vec::new(),
            day,
            tick: 0,
            rng,
            events: Vec::new(),
        };
        sim.spawn_wave();
        Ok(sim)
    }

    /// Advance the world by `dt` seconds and return everything that
    /// happened. Once the player is dead the world stops advancing, but
    /// anything queued between ticks (a lethal thorns reflect) is still
    /// handed back.
    pub fn run_tick(&mut self, dt: f32) -> Vec<SimulationEvent> {
        if self.player.is_dead() {
            return std::mem::take(&mut self.events);
        }
        self.tick += 1;

        precompute_auras(&mut self.actors);
        self.advance_timers(dt);
        self.advance_motion(dt);
        self.resolve_attacks();
        self.resolve_ring_contacts();
        self.advance_explosions(dt);

        if self.player.is_dead() {
            tracing::info!(tick = self.tick, day = self.day, "player defeated");
            self.events.push(SimulationEvent::PlayerDied);
        }

        self.remove_dead();
        if self.actors.is_empty() {
            self.day += 1;
            self.spawn_wave();
        }

        std::mem::take(&mut self.events)
    }

    /// Apply one of the player's hits to an actor, running the actor's
    /// full defense pipeline. Returns `None` if the id is unknown.
    pub fn apply_player_hit(&mut self, actor_id: ActorId) -> Option<DamageOutcome> {
        let idx = self.actors.iter().position(|a| a.id == actor_id)?;
        let armor_constant = self.config.armor_constant;
        let damage = self.player.damage;
        let outcome = self.actors[idx].take_damage(damage, 0.0, armor_constant, &mut self.rng);
        let name = self.actors[idx].name();

        if outcome.reflected_damage > 0.0 {
            let applied = self.player.take_damage(outcome.reflected_damage, &name, 0.0);
            self.events.push(SimulationEvent::DamageReflected {
                source: name.clone(),
                damage: applied,
            });
            if self.player.is_dead() {
                self.events.push(SimulationEvent::PlayerDied);
            }
        }

        if outcome.will_revive {
            tracing::debug!(name, "revival countdown started");
        }
        if outcome.undying_triggered {
            self.events.push(SimulationEvent::UndyingTriggered { name: name.clone() });
        }

        if outcome.died {
            self.finalize_death(idx);
        }
        Some(outcome)
    }

    /// Id of the closest targetable actor, for a simple auto-aim
    pub fn nearest_actor(&self) -> Option<ActorId> {
        self.actors
            .iter()
            .filter(|a| a.is_alive && a.state != LifecycleState::Undying)
            .min_by(|a, b| {
                let da = a.position.distance_sq(&self.player.position);
                let db = b.position.distance_sq(&self.player.position);
                da.total_cmp(&db)
            })
            .map(|a| a.id)
    }

    pub fn alive_count(&self) -> usize {
        self.actors.iter().filter(|a| a.is_alive).count()
    }

    fn spawn_wave(&mut self) {
        let wave = generate_wave(&self.map, self.day, &self.config, &mut self.rng);
        self.events.push(SimulationEvent::WaveSpawned {
            day: self.day,
            count: wave.len(),
        });
        self.actors.extend(wave);
    }

    /// Cooldowns, revival/undying countdowns, ring animation, summons
    fn advance_timers(&mut self, dt: f32) {
        let mut summoners = Vec::new();
        for (idx, actor) in self.actors.iter_mut().enumerate() {
            actor.cool(dt);
            match actor.state {
                LifecycleState::Reviving => {
                    actor.revive_timer -= dt;
                    if actor.revive_timer <= 0.0 {
                        actor.complete_revival();
                        self.events.push(SimulationEvent::ActorRevived { name: actor.name() });
                    }
                }
                LifecycleState::Undying => {
                    actor.undying_timer -= dt;
                    if actor.undying_timer <= 0.0 {
                        actor.expire_undying();
                        self.events.push(SimulationEvent::ActorDied {
                            name: actor.name(),
                            archetype: actor.archetype,
                            level: actor.stats.level,
                        });
                    }
                }
                LifecycleState::Attacking => {
                    actor.advance_ring(dt);
                }
                _ => {}
            }

            if actor.is_alive
                && !actor.is_inert()
                && actor.elite_variant == Some(EliteVariant::Summoner)
                && actor.summon_timer <= 0.0
                && actor.position.distance(&self.player.position) <= SUMMON_THREAT_RANGE
            {
                summoners.push(idx);
            }
        }

        for idx in summoners {
            if self.actors.len() >= self.config.population_cap {
                break;
            }
            let pack = summon_pack(&self.actors[idx], &self.map, &self.config, &mut self.rng);
            self.actors[idx].summon_timer = SUMMON_COOLDOWN;
            let room = self.config.population_cap - self.actors.len();
            let added: Vec<Actor> = pack.into_iter().take(room).collect();
            self.events.push(SimulationEvent::Summoned {
                summoner: self.actors[idx].name(),
                count: added.len(),
            });
            self.actors.extend(added);
        }
    }

    fn advance_motion(&mut self, dt: f32) {
        let ctx = MotionContext {
            map: &self.map,
            config: &self.config,
            player_pos: self.player.position,
            player_radius: self.player.radius,
            dt,
        };
        for actor in &mut self.actors {
            update_motion(actor, &ctx, &mut self.rng);
        }
    }

    fn resolve_attacks(&mut self) {
        let player_pos = self.player.position;
        for actor in &mut self.actors {
            if !actor.is_alive || actor.is_inert() {
                continue;
            }
            // Ring already in flight
            if actor.state == LifecycleState::Attacking {
                continue;
            }
            let dist = actor.position.distance(&player_pos);
            if dist > actor.stats.attack_range || !actor.attack_ready() {
                continue;
            }

            let attack = assemble_attack(actor, &mut self.rng);
            actor.note_attack();
            match attack.kind {
                AttackKind::Ring => actor.start_ring(),
                AttackKind::Projectile { speed, range } => {
                    self.events.push(SimulationEvent::ProjectileRequested {
                        attacker: actor.name(),
                        origin: actor.position,
                        target: player_pos,
                        damage: attack.damage,
                        armor_penetration: attack.armor_penetration,
                        speed,
                        range,
                    });
                    begin_knockback(actor, player_pos);
                }
                AttackKind::Melee => {
                    let applied = self.player.take_damage(
                        attack.damage,
                        &actor.name(),
                        attack.armor_penetration,
                    );
                    if attack.is_critical {
                        actor.heal(attack.lifesteal);
                    }
                    self.events.push(SimulationEvent::AttackLanded {
                        attacker: actor.name(),
                        damage: applied,
                        critical: attack.is_critical,
                    });
                    begin_knockback(actor, player_pos);
                }
            }
        }
    }

    fn resolve_ring_contacts(&mut self) {
        let player_pos = self.player.position;
        let reach_bonus = self.player.radius + RING_HIT_TOLERANCE;
        for actor in &mut self.actors {
            if actor.state != LifecycleState::Attacking
                || actor.ring_has_hit
                || actor.ring_radius <= 0.0
            {
                continue;
            }
            if actor.position.distance(&player_pos) <= actor.ring_radius + reach_bonus {
                let damage = actor.stats.damage as f32 * (1.0 + actor.cached_aura_bonus);
                let applied = self.player.take_damage(damage, &actor.name(), 0.0);
                actor.ring_has_hit = true;
                self.events.push(SimulationEvent::RingHit {
                    attacker: actor.name(),
                    damage: applied,
                });
            }
        }
    }

    fn advance_explosions(&mut self, dt: f32) {
        for boom in &mut self.explosions {
            boom.advance(dt);
            if boom.touches(self.player.position, self.player.radius) {
                let applied = self.player.take_damage(boom.damage, &boom.source, 0.0);
                boom.has_damaged = true;
                self.events.push(SimulationEvent::CorpseExploded {
                    source: boom.source.clone(),
                    damage: applied,
                });
            }
        }
        self.explosions.retain(|b| !b.is_finished());
    }

    fn remove_dead(&mut self) {
        self.actors.retain(|a| a.state != LifecycleState::Dead);
    }

    /// Emit the death event, schedule any corpse effect, remove the actor
    fn finalize_death(&mut self, idx: usize) {
        let actor = self.actors.remove(idx);
        self.events.push(SimulationEvent::ActorDied {
            name: actor.name(),
            archetype: actor.archetype,
            level: actor.stats.level,
        });

        if actor.archetype == Archetype::Bulwark {
            let mut range = CORPSE_EXPLOSION_RANGE;
            if actor.elite_variant == Some(EliteVariant::Titan) {
                range += TITAN_RANGE_BONUS;
            }
            let damage = actor.stats.max_health as f32 * CORPSE_EXPLOSION_HP_FRACTION;
            self.explosions
                .push(CorpseExplosion::new(actor.position, range, damage, actor.name()));
            tracing::debug!(name = actor.name(), range, damage, "corpse explosion armed");
        }
    }
}
