//! Simulation engine for PLANETFALL.
//!
//! Owns the hecs ECS world, advances the defense one variable-length frame
//! at a time, and produces read-only `GameSnapshot`s for rendering. The
//! engine is completely headless: given the same seed and the same frame
//! deltas, two runs produce identical snapshots.

pub mod engine;
pub mod state;
pub mod systems;
pub mod world_setup;

pub use engine::{GameEngine, SimConfig};
pub use planetfall_core as core;

#[cfg(test)]
mod tests;
