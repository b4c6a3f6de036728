//! The horde: actor archetypes, growth, skills, movement and waves

pub mod actor;
pub mod archetype;
pub mod attack;
pub mod aura;
pub mod constants;
pub mod effects;
pub mod growth;
pub mod motion;
pub mod wave;

pub use actor::{Actor, DamageOutcome, LifecycleState};
pub use archetype::{Archetype, EliteVariant};
