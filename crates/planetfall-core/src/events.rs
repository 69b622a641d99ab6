//! Events emitted by the simulation for renderer and audio feedback.
//!
//! These mark discrete sim moments; continuous state (beam intensity, shield
//! status, chain arcs) lives in the snapshot views instead.

use serde::{Deserialize, Serialize};

use crate::enums::{EnemyVariant, TowerVariant};
use crate::types::Position;

/// One-shot effect cues, drained into each frame's snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FxEvent {
    /// A new wave began; `shake` suggests a camera-shake magnitude.
    WaveStarted { wave: u32, shake: f64 },
    /// An enemy entered the playfield.
    EnemySpawned { position: Position, variant: EnemyVariant },
    /// An enemy was destroyed by combat.
    EnemyDestroyed {
        position: Position,
        variant: EnemyVariant,
        reward: u32,
    },
    /// A splitter burst into offspring.
    SplitterBurst { position: Position },
    /// A splash shell detonated.
    SplashDetonation { position: Position, radius: f64 },
    /// An enemy crossed the base line.
    BaseHit { x: f64, base_hp: i32 },
    /// A shield dome collapsed.
    ShieldDown { position: Position },
    /// A shield dome came back online.
    ShieldRestored { position: Position },
    /// A tower was placed.
    TowerPlaced { position: Position, variant: TowerVariant },
    /// The base was destroyed.
    GameOver { wave: u32 },
}
