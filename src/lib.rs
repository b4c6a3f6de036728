//! Gravemarch - Wave-Based Horde Combat Engine

pub mod arena;
pub mod core;
pub mod horde;
pub mod player;
pub mod simulation;
