//! Simulation driver

pub mod tick;

pub use tick::{Simulation, SimulationEvent};
