//! Player commands sent from the input router to the simulation.
//!
//! Commands are queued and drained at the next frame boundary in arrival
//! order. Invalid commands are consumed without effect.

use serde::{Deserialize, Serialize};

use crate::enums::TowerVariant;

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Change the variant used by subsequent placements.
    SelectTower { variant: TowerVariant },
    /// Place the selected variant at a playfield position.
    /// Rejected silently if unaffordable or within clearance of a tower.
    PlaceTower { x: f64, y: f64 },
    /// Start a fresh session (also serves as restart).
    StartGame,
}
