//! Game state snapshot — the complete visible state handed to the renderer
//! and HUD after each frame.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::FxEvent;
use crate::types::{Position, SimTime};

/// Complete read-only state published after each frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub hud: HudView,
    /// Sorted by id.
    pub enemies: Vec<EnemyView>,
    /// Sorted by placement id.
    pub towers: Vec<TowerView>,
    /// Sorted by id.
    pub projectiles: Vec<ProjectileView>,
    /// Sorted by id.
    pub capital_ships: Vec<CapitalShipView>,
    /// One-shot cues raised during this frame.
    pub fx_events: Vec<FxEvent>,
}

/// Top-bar numbers and the build menu.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HudView {
    pub wave: u32,
    pub credits: u32,
    /// Clamped to 0 for display even if the killing frame overshot.
    pub base_hp_percent: u32,
    pub approach: f64,
    pub selected_tower: TowerVariant,
    pub kills: u32,
    /// In build-menu order.
    pub build_menu: Vec<BuildOption>,
}

/// One build-menu entry with current affordability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildOption {
    pub variant: TowerVariant,
    pub cost: u32,
    pub affordable: bool,
}

/// A visible enemy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: u32,
    pub position: Position,
    /// Descent heading (radians).
    pub heading: f64,
    pub variant: EnemyVariant,
    /// hp / max hp, in (0, 1].
    pub hp_ratio: f64,
    pub size: f64,
    /// Inside an active shield dome this frame.
    pub slowed: bool,
}

/// A placed tower with its variant-specific display state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TowerView {
    pub id: u32,
    pub position: Position,
    pub variant: TowerVariant,
    /// Barrel angle for turret-style variants (radians).
    pub aim_angle: f64,
    /// Beam endpoint and intensity while a laser is locked.
    pub beam: Option<BeamView>,
    /// Dome state for shield generators.
    pub shield: Option<ShieldView>,
    /// Tesla arc endpoints in chain order; empty when no chain.
    pub chain: Vec<Position>,
}

/// Laser beam display state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeamView {
    pub target: Position,
    /// 0..1; scales both the drawn beam and the damage.
    pub intensity: f64,
}

/// Shield dome display state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShieldView {
    pub radius: f64,
    /// hp / max hp; 0 while recharging.
    pub hp_ratio: f64,
    pub active: bool,
}

/// A shell in flight.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: u32,
    pub position: Position,
    /// Flight heading (radians).
    pub heading: f64,
    pub size: f64,
    pub homing: bool,
}

/// A background hull.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CapitalShipView {
    pub id: u32,
    pub position: Position,
    /// Horizontal drift speed (units/ms, signed).
    pub drift: f64,
    pub length: f64,
    pub depth: f64,
}
