//! Actor entity: stats, lifecycle state and the defense pipeline
//!
//! Exactly one lifecycle state is active at a time. Per-state working data
//! (knockback vector, dash ramp, ring animation, revive countdown) lives in
//! dedicated fields that only mean something while their state is active.
//!
//! All timers are countdowns advanced by the tick's delta time; no actor
//! reads a shared clock.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::types::{ActorId, Vec2};
use crate::horde::archetype::{Archetype, EliteVariant};
use crate::horde::constants::*;
use crate::horde::growth::{derive_stats, StatBlock};

/// Lifecycle state machine states (initial = Patrol, terminal = Dead)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleState {
    Patrol,
    Chase,
    /// Bulwark ring animation in progress; melee attackers pass through
    /// this state instantly on the attack tick
    Attacking,
    /// Post-attack knockback retreat
    Recovery,
    /// Stalker closing sprint
    Dashing,
    /// Brawler one-time revival countdown; unresponsive and untargetable
    Reviving,
    /// Invulnerable husk pinned at 1 health, awaiting true removal
    Undying,
    Dead,
}

/// Result of pushing damage through an actor's defense pipeline
#[derive(Debug, Clone, Copy, Default)]
pub struct DamageOutcome {
    pub blocked: bool,
    pub evaded: bool,
    pub actual_damage: f32,
    /// Damage bounced back at the attacker (Thornguard)
    pub reflected_damage: f32,
    pub died: bool,
    pub will_revive: bool,
    pub undying_triggered: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub archetype: Archetype,
    pub is_elite: bool,
    /// Set iff `is_elite`, rolled once at creation
    pub elite_variant: Option<EliteVariant>,
    pub stats: StatBlock,

    pub position: Vec2,
    /// Where the actor entered the world; Stalkers orbit this on patrol
    pub spawn_position: Vec2,
    pub facing: f32,

    pub current_health: f32,
    pub is_alive: bool,
    pub state: LifecycleState,

    // Attack timing
    pub attack_timer: f32,

    // Defensive skill cooldowns (count down to ready)
    pub block_timer: f32,
    pub reflect_timer: f32,

    // Revival / undying
    pub has_revived: bool,
    pub revive_timer: f32,
    pub undying_used: bool,
    pub undying_timer: f32,

    // Summoner
    pub summon_timer: f32,

    // Recovery (knockback) working data
    pub knockback_remaining: f32,
    pub knockback_direction: Vec2,

    // Dash working data
    pub dash_elapsed: f32,
    pub dash_speed_mult: f32,
    pub dash_timer: f32,

    // Ring attack working data
    pub ring_timer: f32,
    pub ring_radius: f32,
    pub ring_has_hit: bool,

    // Patrol working data
    pub wander_timer: f32,
    pub wander_direction: Vec2,
    pub patrol_angle: f32,

    // Aura caches: written once per tick by the precompute pass, read by
    // attack/defense resolution within the same tick, never persisted
    pub cached_aura_bonus: f32,
    pub cached_armor_bonus: f32,
}

impl Actor {
    pub fn new(
        archetype: Archetype,
        base_level: u32,
        is_elite: bool,
        elite_variant: Option<EliteVariant>,
        position: Vec2,
    ) -> Self {
        debug_assert_eq!(is_elite, elite_variant.is_some());
        let stats = derive_stats(archetype, elite_variant, base_level, is_elite);
        Self {
            id: ActorId::new(),
            archetype,
            is_elite,
            elite_variant,
            stats,
            position,
            spawn_position: position,
            facing: 0.0,
            current_health: stats.max_health as f32,
            is_alive: true,
            state: LifecycleState::Patrol,
            attack_timer: 0.0,
            block_timer: 0.0,
            reflect_timer: 0.0,
            has_revived: false,
            revive_timer: 0.0,
            undying_used: false,
            undying_timer: 0.0,
            summon_timer: 0.0,
            knockback_remaining: 0.0,
            knockback_direction: Vec2::default(),
            dash_elapsed: 0.0,
            dash_speed_mult: 1.0,
            dash_timer: 0.0,
            ring_timer: 0.0,
            ring_radius: 0.0,
            ring_has_hit: false,
            wander_timer: 0.0,
            wander_direction: Vec2::default(),
            patrol_angle: 0.0,
            cached_aura_bonus: 0.0,
            cached_armor_bonus: 0.0,
        }
    }

    pub fn name(&self) -> String {
        match self.elite_variant {
            Some(variant) => format!("Elite {} ({})", self.archetype.name(), variant.name()),
            None => self.archetype.name().to_string(),
        }
    }

    /// Ready to swing (cooldown elapsed)?
    pub fn attack_ready(&self) -> bool {
        self.attack_timer <= 0.0
    }

    /// Record a landed attack: rearm the cooldown and end any dash
    pub fn note_attack(&mut self) {
        self.attack_timer = self.stats.attack_cooldown;
        if self.state == LifecycleState::Dashing {
            self.state = LifecycleState::Chase;
            self.dash_speed_mult = 1.0;
            self.dash_elapsed = 0.0;
            self.dash_timer = DASH_COOLDOWN;
        }
    }

    /// Advance the generic countdown timers. State-machine timers
    /// (revive, undying, ring, dash ramp) are driven by the tick loop so
    /// their expiry can raise events.
    pub fn cool(&mut self, dt: f32) {
        self.attack_timer = (self.attack_timer - dt).max(0.0);
        self.block_timer = (self.block_timer - dt).max(0.0);
        self.reflect_timer = (self.reflect_timer - dt).max(0.0);
        self.summon_timer = (self.summon_timer - dt).max(0.0);
        self.dash_timer = (self.dash_timer - dt).max(0.0);
    }

    /// Heal without exceeding max health (lifesteal)
    pub fn heal(&mut self, amount: f32) {
        if self.is_alive {
            self.current_health = (self.current_health + amount).min(self.stats.max_health as f32);
        }
    }

    /// Begin the expanding-ring attack animation (Bulwark)
    pub fn start_ring(&mut self) {
        self.state = LifecycleState::Attacking;
        self.ring_timer = self.stats.attack_cooldown;
        self.ring_radius = 0.0;
        self.ring_has_hit = false;
    }

    /// Advance the ring animation; returns true when it just finished
    pub fn advance_ring(&mut self, dt: f32) -> bool {
        if self.state != LifecycleState::Attacking || self.ring_timer <= 0.0 {
            return false;
        }
        self.ring_timer -= dt;
        let progress = 1.0 - self.ring_timer / self.stats.attack_cooldown;
        self.ring_radius = self.stats.attack_range * progress.clamp(0.0, 1.0);
        if self.ring_timer <= 0.0 {
            self.ring_radius = 0.0;
            self.ring_has_hit = false;
            self.state = LifecycleState::Chase;
            return true;
        }
        false
    }

    /// Enter the dash sprint and arm its cooldown
    pub fn start_dash(&mut self) {
        self.state = LifecycleState::Dashing;
        self.dash_elapsed = 0.0;
        self.dash_speed_mult = 1.0;
        self.dash_timer = DASH_COOLDOWN;
    }

    /// Ramp the dash multiplier: 1x -> 3x over the accel window, then hold
    pub fn advance_dash(&mut self, dt: f32) {
        if self.state != LifecycleState::Dashing {
            return;
        }
        self.dash_elapsed += dt;
        let progress = (self.dash_elapsed / DASH_ACCEL_TIME).min(1.0);
        self.dash_speed_mult = 1.0 + (DASH_SPEED_MULT - 1.0) * progress;
    }

    /// Revival countdown finished: back to full health and Patrol
    pub fn complete_revival(&mut self) {
        self.is_alive = true;
        self.current_health = self.stats.max_health as f32;
        self.state = LifecycleState::Patrol;
    }

    /// Undying duration elapsed: the husk finally falls
    pub fn expire_undying(&mut self) {
        self.is_alive = false;
        self.current_health = 0.0;
        self.state = LifecycleState::Dead;
    }

    /// Is this actor an inert husk or corpse the tick loop should skip?
    pub fn is_inert(&self) -> bool {
        matches!(
            self.state,
            LifecycleState::Reviving | LifecycleState::Undying | LifecycleState::Dead
        )
    }

    /// Push incoming damage through the defense pipeline.
    ///
    /// Order: immunity gates, then block/evade/reflect per variant, then
    /// armor reduction, then health deduction and death resolution.
    /// Revival and Undying are mutually exclusive outcomes of one death:
    /// revival wins if unused, Undying fires only when death would
    /// otherwise be final, and each at most once per instance.
    pub fn take_damage<R: Rng>(
        &mut self,
        amount: f32,
        armor_penetration: f32,
        armor_constant: f32,
        rng: &mut R,
    ) -> DamageOutcome {
        let mut outcome = DamageOutcome::default();

        // Corpses, revival countdowns and undying husks shrug everything off
        if !self.is_alive || self.is_inert() {
            return outcome;
        }

        let mut incoming = amount;

        match (self.archetype, self.elite_variant) {
            (Archetype::Bulwark, Some(EliteVariant::Thornguard)) => {
                // Block traded away for thorns
                if self.reflect_timer <= 0.0 {
                    outcome.reflected_damage = incoming * THORNGUARD_REFLECT_FACTOR;
                    self.reflect_timer = THORNGUARD_COOLDOWN;
                }
            }
            (Archetype::Bulwark, _) => {
                if self.block_timer <= 0.0 && rng.gen::<f32>() < BULWARK_BLOCK_CHANCE {
                    outcome.blocked = true;
                    self.block_timer = BULWARK_BLOCK_COOLDOWN;
                    incoming *= 1.0 - BULWARK_BLOCK_REDUCTION;
                }
            }
            (Archetype::Stalker, _) => {
                if rng.gen::<f32>() < STALKER_EVADE_CHANCE {
                    outcome.evaded = true;
                    return outcome;
                }
            }
            (Archetype::Brawler, _) => {}
        }

        // Armor reduction; the iron-aura bonus counts here but is never
        // persisted into the base stat
        let effective_armor =
            (self.stats.armor as f32 + self.cached_armor_bonus) * (1.0 - armor_penetration);
        let reduction = effective_armor / (effective_armor + armor_constant);
        let actual = incoming * (1.0 - reduction);

        self.current_health -= actual;
        outcome.actual_damage = actual;

        if self.current_health <= 0.0 {
            self.current_health = 0.0;
            self.is_alive = false;
            self.resolve_death(&mut outcome);
        }

        outcome
    }

    /// Decide what a death becomes: revival, undying husk, or removal
    fn resolve_death(&mut self, outcome: &mut DamageOutcome) {
        if self.archetype == Archetype::Brawler && !self.has_revived {
            self.has_revived = true;
            self.revive_timer = BRAWLER_REVIVE_DELAY;
            self.state = LifecycleState::Reviving;
            outcome.will_revive = true;
            return;
        }

        if self.elite_variant == Some(EliteVariant::Undying) && !self.undying_used {
            self.undying_used = true;
            self.undying_timer = UNDYING_DURATION;
            self.current_health = 1.0;
            self.is_alive = true;
            self.state = LifecycleState::Undying;
            outcome.undying_triggered = true;
            return;
        }

        self.state = LifecycleState::Dead;
        outcome.died = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const K: f32 = 100.0;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(99)
    }

    fn brawler() -> Actor {
        Actor::new(Archetype::Brawler, 0, false, None, Vec2::default())
    }

    #[test]
    fn test_new_actor_starts_patrolling_at_full_health() {
        let actor = brawler();
        assert_eq!(actor.state, LifecycleState::Patrol);
        assert!(actor.is_alive);
        assert_eq!(actor.current_health, actor.stats.max_health as f32);
    }

    #[test]
    fn test_armor_reduction_applied() {
        let mut actor = brawler();
        actor.cached_armor_bonus = 0.0;
        let armor = actor.stats.armor as f32; // 50 at level 0
        let mut rng = rng();
        let outcome = actor.take_damage(100.0, 0.0, K, &mut rng);
        let expected = 100.0 * (1.0 - armor / (armor + K));
        assert!((outcome.actual_damage - expected).abs() < 1e-3);
    }

    #[test]
    fn test_iron_aura_bonus_counts_toward_reduction() {
        let mut bare = brawler();
        let mut buffed = brawler();
        buffed.cached_armor_bonus = 30.0;
        let mut rng_a = rng();
        let mut rng_b = rng();
        let plain = bare.take_damage(100.0, 0.0, K, &mut rng_a);
        let reduced = buffed.take_damage(100.0, 0.0, K, &mut rng_b);
        assert!(reduced.actual_damage < plain.actual_damage);
    }

    #[test]
    fn test_brawler_revives_exactly_once() {
        let mut actor = brawler();
        let mut rng = rng();

        let first = actor.take_damage(1_000_000.0, 0.0, K, &mut rng);
        assert!(first.will_revive);
        assert!(!first.died);
        assert_eq!(actor.state, LifecycleState::Reviving);

        actor.complete_revival();
        assert!(actor.is_alive);
        assert_eq!(actor.current_health, actor.stats.max_health as f32);
        assert_eq!(actor.state, LifecycleState::Patrol);

        let second = actor.take_damage(1_000_000.0, 0.0, K, &mut rng);
        assert!(second.died);
        assert!(!second.will_revive);
        assert_eq!(actor.state, LifecycleState::Dead);
    }

    #[test]
    fn test_reviving_actor_is_untouchable() {
        let mut actor = brawler();
        let mut rng = rng();
        actor.take_damage(1_000_000.0, 0.0, K, &mut rng);
        assert_eq!(actor.state, LifecycleState::Reviving);
        let hit = actor.take_damage(1_000_000.0, 0.0, K, &mut rng);
        assert_eq!(hit.actual_damage, 0.0);
        assert!(!hit.died);
    }

    #[test]
    fn test_undying_after_spent_revival() {
        let mut actor = Actor::new(
            Archetype::Brawler,
            0,
            true,
            Some(EliteVariant::Undying),
            Vec2::default(),
        );
        let mut rng = rng();

        // First death consumes the revival
        let first = actor.take_damage(f32::MAX / 2.0, 0.0, K, &mut rng);
        assert!(first.will_revive);
        actor.complete_revival();

        // Second death pins the husk at 1 health instead of removal
        let second = actor.take_damage(f32::MAX / 2.0, 0.0, K, &mut rng);
        assert!(second.undying_triggered);
        assert!(!second.died);
        assert!(actor.is_alive);
        assert_eq!(actor.current_health, 1.0);
        assert_eq!(actor.state, LifecycleState::Undying);

        // Husk is immune
        let third = actor.take_damage(f32::MAX / 2.0, 0.0, K, &mut rng);
        assert_eq!(third.actual_damage, 0.0);
        assert_eq!(actor.current_health, 1.0);

        // Duration elapses into true removal
        actor.expire_undying();
        assert_eq!(actor.state, LifecycleState::Dead);
        assert!(!actor.is_alive);
    }

    #[test]
    fn test_block_cooldown_excludes_back_to_back_blocks() {
        let mut actor = Actor::new(Archetype::Bulwark, 50, false, None, Vec2::default());
        let mut rng = rng();

        // Hammer until the first block lands
        let mut blocked_once = false;
        for _ in 0..500 {
            if actor.take_damage(1.0, 0.0, K, &mut rng).blocked {
                blocked_once = true;
                break;
            }
        }
        assert!(blocked_once, "block never rolled in 500 attempts");

        // With the cooldown armed, no amount of incoming fire blocks again
        for _ in 0..500 {
            assert!(!actor.take_damage(1.0, 0.0, K, &mut rng).blocked);
        }

        // After 1s the block can roll again
        actor.cool(BULWARK_BLOCK_COOLDOWN);
        let mut blocked_again = false;
        for _ in 0..500 {
            if actor.take_damage(1.0, 0.0, K, &mut rng).blocked {
                blocked_again = true;
                break;
            }
            actor.block_timer = 0.0; // keep only the roll under test
        }
        assert!(blocked_again);
    }

    #[test]
    fn test_blocked_hit_lands_at_ten_percent() {
        let mut actor = Actor::new(Archetype::Bulwark, 0, false, None, Vec2::default());
        let mut rng = rng();
        for _ in 0..500 {
            // Top up so the roll hunt never kills the subject
            actor.current_health = actor.stats.max_health as f32;
            let before = actor.current_health;
            let outcome = actor.take_damage(100.0, 0.0, K, &mut rng);
            if outcome.blocked {
                let armor = actor.stats.armor as f32;
                let expected = 10.0 * (1.0 - armor / (armor + K));
                assert!((outcome.actual_damage - expected).abs() < 1e-3);
                assert!((before - actor.current_health - expected).abs() < 1e-3);
                return;
            }
            actor.block_timer = 0.0;
        }
        panic!("block never rolled");
    }

    #[test]
    fn test_evade_negates_everything() {
        let mut actor = Actor::new(Archetype::Stalker, 0, false, None, Vec2::default());
        let mut rng = rng();
        for _ in 0..500 {
            actor.current_health = actor.stats.max_health as f32;
            let before = actor.current_health;
            let outcome = actor.take_damage(100.0, 0.0, K, &mut rng);
            if outcome.evaded {
                assert_eq!(outcome.actual_damage, 0.0);
                assert_eq!(actor.current_health, before);
                return;
            }
        }
        panic!("evade never rolled");
    }

    #[test]
    fn test_thornguard_reflects_quarter_with_cooldown() {
        let mut actor = Actor::new(
            Archetype::Bulwark,
            10,
            true,
            Some(EliteVariant::Thornguard),
            Vec2::default(),
        );
        let mut rng = rng();

        let first = actor.take_damage(100.0, 0.0, K, &mut rng);
        assert!((first.reflected_damage - 25.0).abs() < 1e-4);
        assert!(!first.blocked); // block traded away

        // Reflect is on cooldown now
        let second = actor.take_damage(100.0, 0.0, K, &mut rng);
        assert_eq!(second.reflected_damage, 0.0);

        actor.cool(THORNGUARD_COOLDOWN);
        let third = actor.take_damage(100.0, 0.0, K, &mut rng);
        assert!((third.reflected_damage - 25.0).abs() < 1e-4);
    }

    #[test]
    fn test_heal_caps_at_max_health() {
        let mut actor = brawler();
        actor.current_health = actor.stats.max_health as f32 - 10.0;
        actor.heal(500.0);
        assert_eq!(actor.current_health, actor.stats.max_health as f32);
    }

    #[test]
    fn test_ring_radius_grows_to_attack_range() {
        let mut actor = Actor::new(Archetype::Bulwark, 0, false, None, Vec2::default());
        actor.start_ring();
        assert_eq!(actor.state, LifecycleState::Attacking);

        let cooldown = actor.stats.attack_cooldown;
        actor.advance_ring(cooldown / 2.0);
        assert!((actor.ring_radius - actor.stats.attack_range / 2.0).abs() < 1e-3);

        let finished = actor.advance_ring(cooldown);
        assert!(finished);
        assert_eq!(actor.state, LifecycleState::Chase);
        assert_eq!(actor.ring_radius, 0.0);
    }

    #[test]
    fn test_dash_ramp_and_reset_on_attack() {
        let mut actor = Actor::new(Archetype::Stalker, 0, false, None, Vec2::default());
        actor.start_dash();
        assert_eq!(actor.state, LifecycleState::Dashing);

        actor.advance_dash(DASH_ACCEL_TIME / 2.0);
        assert!((actor.dash_speed_mult - 2.0).abs() < 1e-3);

        actor.advance_dash(DASH_ACCEL_TIME);
        assert!((actor.dash_speed_mult - DASH_SPEED_MULT).abs() < 1e-3);

        actor.note_attack();
        assert_eq!(actor.state, LifecycleState::Chase);
        assert_eq!(actor.dash_speed_mult, 1.0);
        assert!(actor.dash_timer > 0.0);
    }

    #[test]
    fn test_attack_cooldown_rearm() {
        let mut actor = brawler();
        assert!(actor.attack_ready());
        actor.note_attack();
        assert!(!actor.attack_ready());
        actor.cool(actor.stats.attack_cooldown);
        assert!(actor.attack_ready());
    }
}
