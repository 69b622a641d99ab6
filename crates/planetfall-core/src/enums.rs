//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Constructed, nothing simulated yet.
    #[default]
    Idle,
    /// Waves in progress.
    Running,
    /// Base destroyed; frozen until restart.
    GameOver,
}

/// Enemy archetype.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyVariant {
    #[default]
    Standard,
    /// Slow, heavily armored, high reward.
    Tank,
    /// Fast and fragile; spawns in trios.
    Swarm,
    /// Splits into three Swarm on death.
    Splitter,
}

/// Placeable tower archetype.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TowerVariant {
    /// Single-target ballistic cannon.
    #[default]
    Turret,
    /// Continuous beam with lock-on ramp.
    Laser,
    /// Area slow + damage dome with a recharge cycle.
    Shield,
    /// Homing shells with splash damage, prefers the toughest enemy.
    Missile,
    /// Chain lightning across nearby enemies.
    Tesla,
}

impl TowerVariant {
    /// All variants in build-menu order.
    pub const ALL: [TowerVariant; 5] = [
        TowerVariant::Turret,
        TowerVariant::Laser,
        TowerVariant::Shield,
        TowerVariant::Missile,
        TowerVariant::Tesla,
    ];
}

/// Shield dome operating state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShieldPhase {
    /// Projecting the dome: slowing and damaging enemies inside.
    #[default]
    Active,
    /// Collapsed; counting down to reactivation at half strength.
    Recharging,
}
