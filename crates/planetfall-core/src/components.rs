//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Position;

/// An attacking enemy descending toward the base line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    /// Stable id for renderer-side trail state.
    pub id: u32,
    pub variant: EnemyVariant,
    pub hp: f64,
    pub max_hp: f64,
    /// Descent speed (units/ms) before slow effects.
    pub speed: f64,
    /// Collision radius.
    pub size: f64,
    /// Credits paid on kill.
    pub reward: u32,
    /// Fixed heading toward the descent target, set at spawn.
    pub heading: f64,
    /// Reset to 1 each motion pass; lowered by shield domes later in the frame.
    pub slow_factor: f64,
}

/// Base record for every placed tower.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Tower {
    /// Placement order, stable for display.
    pub id: u32,
    pub variant: TowerVariant,
}

/// Projectile-firing mount (Turret and Missile variants).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cannon {
    pub range: f64,
    pub damage: f64,
    pub fire_interval_ms: f64,
    /// Remaining time until the next shot may fire.
    pub cooldown_ms: f64,
    /// Smoothed barrel angle (radians).
    pub aim_angle: f64,
    /// Fraction of the angular error closed per frame.
    pub aim_rate: f64,
    /// Some for splash-capable (homing) mounts.
    pub splash_radius: Option<f64>,
}

/// Continuous-beam emitter (Laser variant).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaserEmitter {
    pub range: f64,
    pub dps: f64,
    pub aim_angle: f64,
    pub aim_rate: f64,
    /// Ramps 0..1 while locked, decays while not; gates beam damage.
    pub beam_intensity: f64,
    /// Where the beam ended this frame, for display. None when unlocked.
    pub beam_target: Option<Position>,
}

/// Area dome (Shield variant): slows and damages enemies inside,
/// straining its own health while any enemy is present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShieldDome {
    pub radius: f64,
    pub hp: f64,
    pub max_hp: f64,
    pub regen_per_sec: f64,
    /// Multiplier applied to enemy speed inside the dome.
    pub slow_factor: f64,
    pub dps: f64,
    pub phase: ShieldPhase,
    /// Countdown to reactivation while Recharging (ms).
    pub recharge_remaining_ms: f64,
}

/// Chain-lightning coil (Tesla variant).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeslaCoil {
    pub range: f64,
    /// Damage per second applied to every chained enemy.
    pub dps: f64,
    /// Maximum links in a chain, primary included.
    pub chain_count: usize,
    /// Maximum hop distance between consecutive links.
    pub chain_range: f64,
    /// Arc endpoints resolved this frame, in chain order, for display.
    pub arc: Vec<Position>,
}

/// A shell in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    /// Stable id for renderer-side trail state.
    pub id: u32,
    pub damage: f64,
    /// Collision radius.
    pub size: f64,
    /// Remaining lifetime (ms); culled at 0.
    pub ttl_ms: f64,
    /// Some for splash-capable shells.
    pub splash_radius: Option<f64>,
}

/// Steering state for homing shells.
/// The pursued enemy is referenced by id, never by handle; the shell flies
/// straight once the id no longer resolves to a living enemy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomingGuidance {
    pub target_id: u32,
    pub heading: f64,
    /// Current scalar speed (units/ms); accelerates over the shell's life.
    pub speed: f64,
}

/// Non-interactive background hull drifting across the sky.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapitalShip {
    /// Stable id for renderer-side state.
    pub id: u32,
    /// Hull extent along the drift axis.
    pub length: f64,
    /// Hull extent across the drift axis.
    pub depth: f64,
}
