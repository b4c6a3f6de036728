//! Delayed area effects - currently just the Bulwark corpse explosion
//!
//! An explosion outlives its owner: scheduled at death, it idles through a
//! fuse delay, expands its radius over a short window, damages anything it
//! touches at most once, and is discarded when fully expanded.

use serde::{Deserialize, Serialize};

use crate::core::types::Vec2;
use crate::horde::constants::{CORPSE_EXPLOSION_DELAY, CORPSE_EXPLOSION_EXPAND_TIME};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpseExplosion {
    pub position: Vec2,
    pub max_radius: f32,
    pub damage: f32,
    /// Name of the fallen Bulwark, for logging
    pub source: String,
    delay_remaining: f32,
    progress: f32,
    pub current_radius: f32,
    pub has_damaged: bool,
}

impl CorpseExplosion {
    pub fn new(position: Vec2, max_radius: f32, damage: f32, source: String) -> Self {
        Self {
            position,
            max_radius,
            damage,
            source,
            delay_remaining: CORPSE_EXPLOSION_DELAY,
            progress: 0.0,
            current_radius: 0.0,
            has_damaged: false,
        }
    }

    /// Still fusing, not yet expanding?
    pub fn is_fusing(&self) -> bool {
        self.delay_remaining > 0.0
    }

    /// Fully expanded and ready to be discarded?
    pub fn is_finished(&self) -> bool {
        self.delay_remaining <= 0.0 && self.progress >= 1.0
    }

    /// Advance the fuse and expansion by `dt`
    pub fn advance(&mut self, dt: f32) {
        if self.delay_remaining > 0.0 {
            self.delay_remaining -= dt;
            return;
        }
        self.progress = (self.progress + dt / CORPSE_EXPLOSION_EXPAND_TIME).min(1.0);
        self.current_radius = self.max_radius * self.progress;
    }

    /// Would the expanding front hit a circle at `target` right now?
    /// The caller marks `has_damaged` after applying the hit.
    pub fn touches(&self, target: Vec2, target_radius: f32) -> bool {
        if self.is_fusing() || self.is_finished() || self.has_damaged {
            return false;
        }
        self.position.distance(&target) <= self.current_radius + target_radius
    }
}
