//! Session-level game state outside the ECS world.
//!
//! Wave progress, economy, base health, and the approach scalar live here
//! rather than on singleton entities. The engine owns one `GameState` and
//! threads it into the systems that need it.

use planetfall_core::constants::*;
use planetfall_core::enums::TowerVariant;

/// Mutable per-session state: wave bookkeeping, credits, base health.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Current wave number, starting at 1.
    pub wave: u32,
    /// Spendable credits balance.
    pub credits: u32,
    /// Base health. Hits the floor at zero on the killing frame.
    pub base_hp: i32,
    /// Planetary approach scalar in [0, APPROACH_MAX]. Scales difficulty.
    pub approach: f64,
    /// Enemies still owed to the field by the current wave.
    pub enemies_to_spawn: u32,
    /// Elapsed time accumulated toward the next spawn release.
    pub spawn_timer_ms: f64,
    /// Variant used by subsequent placement commands.
    pub selected_tower: TowerVariant,
    /// Enemies destroyed by weapons fire. Breaches do not count.
    pub kills: u32,
    /// Playfield extent in world units.
    pub width: f64,
    pub height: f64,
}

impl GameState {
    pub fn new(width: f64, height: f64, starting_credits: u32) -> Self {
        Self {
            wave: 1,
            credits: starting_credits,
            base_hp: BASE_MAX_HP,
            approach: 0.0,
            enemies_to_spawn: 0,
            spawn_timer_ms: 0.0,
            selected_tower: TowerVariant::default(),
            kills: 0,
            width,
            height,
        }
    }

    /// Advance the approach scalar for one frame. Monotone, capped.
    pub fn advance_approach(&mut self, elapsed_ms: f64) {
        let rate = APPROACH_BASE_RATE + self.wave as f64 * APPROACH_WAVE_RATE;
        self.approach =
            (self.approach + rate * (elapsed_ms / REFERENCE_FRAME_MS)).min(APPROACH_MAX);
    }

    pub fn can_afford(&self, cost: u32) -> bool {
        self.credits >= cost
    }

    /// Deduct a purchase. Callers check `can_afford` first.
    pub fn spend(&mut self, cost: u32) {
        self.credits = self.credits.saturating_sub(cost);
    }

    /// Pay out a kill reward.
    pub fn credit(&mut self, amount: u32) {
        self.credits += amount;
    }

    /// The y coordinate of the defended line. Enemies past it have breached.
    pub fn base_line(&self) -> f64 {
        self.height - BASE_LINE_OFFSET
    }
}

/// Placement cost for a tower variant.
pub fn tower_cost(variant: TowerVariant) -> u32 {
    match variant {
        TowerVariant::Turret => TURRET_COST,
        TowerVariant::Laser => LASER_COST,
        TowerVariant::Shield => SHIELD_COST,
        TowerVariant::Missile => MISSILE_COST,
        TowerVariant::Tesla => TESLA_COST,
    }
}
