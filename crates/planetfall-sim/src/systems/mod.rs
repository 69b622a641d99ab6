//! Simulation systems, run in a fixed order each frame by the engine.
//!
//! Systems are free functions that take `&mut World` plus whatever session
//! state they need. None of them holds state of its own between frames, so
//! the engine struct stays the single source of truth.

pub mod cleanup;
pub mod combat;
pub mod movement;
pub mod projectiles;
pub mod snapshot;
pub mod targeting;
pub mod wave_director;
