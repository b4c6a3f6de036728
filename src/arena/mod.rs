//! Tile-based arena

pub mod map;

pub use map::{ArenaMap, Tile};
