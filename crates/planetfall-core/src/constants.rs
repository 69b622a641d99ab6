//! Simulation constants and tuning parameters.
//!
//! Speeds are world units per millisecond; durations are milliseconds.
//! Rate formulas normalize elapsed time against a 16 ms reference frame.

/// Reference frame length for per-frame rate constants (ms).
pub const REFERENCE_FRAME_MS: f64 = 16.0;

// --- Playfield ---

/// Default playfield width (world units).
pub const DEFAULT_WIDTH: f64 = 1280.0;

/// Default playfield height (world units).
pub const DEFAULT_HEIGHT: f64 = 720.0;

/// Enemies breach the base once their y exceeds height minus this offset.
pub const BASE_LINE_OFFSET: f64 = 50.0;

/// Out-of-bounds margin for projectile culling.
pub const PROJECTILE_BOUNDS_MARGIN: f64 = 100.0;

// --- Approach progression ---

/// Approach scalar ceiling.
pub const APPROACH_MAX: f64 = 0.95;

/// Base approach gain per reference frame.
pub const APPROACH_BASE_RATE: f64 = 0.00006;

/// Additional approach gain per reference frame, per wave.
pub const APPROACH_WAVE_RATE: f64 = 0.00003;

// --- Waves ---

/// Enemies queued per wave before scaling.
pub const WAVE_BASE_COUNT: u32 = 8;

/// Additional enemies queued per wave number.
pub const WAVE_COUNT_PER_WAVE: u32 = 5;

/// Additional enemies queued per full approach (floor(approach * this)).
pub const WAVE_COUNT_APPROACH_SCALE: f64 = 15.0;

/// Base interval between spawns (ms).
pub const SPAWN_INTERVAL_BASE_MS: f64 = 700.0;

/// Interval reduction per wave number (ms).
pub const SPAWN_INTERVAL_WAVE_STEP_MS: f64 = 30.0;

/// Cap on the per-wave interval reduction (ms).
pub const SPAWN_INTERVAL_WAVE_CAP_MS: f64 = 450.0;

/// Fractional interval reduction at full approach.
pub const SPAWN_INTERVAL_APPROACH_SCALE: f64 = 0.5;

/// Hard floor on the spawn interval (ms).
pub const SPAWN_INTERVAL_MIN_MS: f64 = 150.0;

// --- Spawn geometry ---

/// Entry x band: fraction of width where the band starts.
pub const SPAWN_BAND_MIN_FRAC: f64 = 0.2;

/// Entry x band: fraction of width the band spans.
pub const SPAWN_BAND_SPAN_FRAC: f64 = 0.6;

/// Descent target x band: fraction of width where the band starts.
pub const TARGET_BAND_MIN_FRAC: f64 = 0.15;

/// Descent target x band: fraction of width the band spans.
pub const TARGET_BAND_SPAN_FRAC: f64 = 0.7;

/// Entry y above the playfield top.
pub const SPAWN_Y: f64 = -50.0;

/// Descent target y below the playfield bottom.
pub const TARGET_Y_OVERSHOOT: f64 = 50.0;

// --- Variant mix ---

/// Minimum wave for Splitter spawns.
pub const SPLITTER_MIN_WAVE: u32 = 3;

/// Splitter roll threshold: base + per-wave.
pub const SPLITTER_CHANCE_BASE: f64 = 0.08;
pub const SPLITTER_CHANCE_PER_WAVE: f64 = 0.01;

/// Minimum wave for Tank spawns.
pub const TANK_MIN_WAVE: u32 = 2;

/// Tank roll threshold: base + per-wave.
pub const TANK_CHANCE_BASE: f64 = 0.20;
pub const TANK_CHANCE_PER_WAVE: f64 = 0.015;

/// Minimum wave for Swarm trios.
pub const SWARM_MIN_WAVE: u32 = 2;

/// Swarm roll threshold: base + per-wave.
pub const SWARM_CHANCE_BASE: f64 = 0.40;
pub const SWARM_CHANCE_PER_WAVE: f64 = 0.02;

/// Swarm enemies launched per trio spawn event.
pub const SWARM_GROUP_SIZE: u32 = 3;

/// Swarm trio jitter: half-width in x, depth in y, half-width in target x.
pub const SWARM_JITTER_X: f64 = 20.0;
pub const SWARM_JITTER_Y: f64 = 30.0;
pub const SWARM_TARGET_JITTER_X: f64 = 30.0;

// --- Enemies ---

/// Standard descent speed: base + per-wave + per-approach (units/ms).
pub const ENEMY_BASE_SPEED: f64 = 0.08;
pub const ENEMY_SPEED_PER_WAVE: f64 = 0.015;
pub const ENEMY_SPEED_PER_APPROACH: f64 = 0.04;

/// Standard hit points: base + per-wave.
pub const ENEMY_BASE_HP: f64 = 20.0;
pub const ENEMY_HP_PER_WAVE: f64 = 10.0;

/// Standard collision radius.
pub const ENEMY_SIZE: f64 = 12.0;

/// Standard kill reward (credits).
pub const ENEMY_REWARD: u32 = 15;

/// Tank overrides.
pub const TANK_BASE_HP: f64 = 60.0;
pub const TANK_HP_PER_WAVE: f64 = 25.0;
pub const TANK_SPEED_FACTOR: f64 = 0.4;
pub const TANK_SIZE: f64 = 22.0;
pub const TANK_REWARD: u32 = 35;

/// Swarm overrides.
pub const SWARM_BASE_HP: f64 = 6.0;
pub const SWARM_HP_PER_WAVE: f64 = 3.0;
pub const SWARM_SPEED_FACTOR: f64 = 1.9;
pub const SWARM_SIZE: f64 = 7.0;
pub const SWARM_REWARD: u32 = 5;

/// Splitter overrides.
pub const SPLITTER_BASE_HP: f64 = 35.0;
pub const SPLITTER_HP_PER_WAVE: f64 = 15.0;
pub const SPLITTER_SPEED_FACTOR: f64 = 0.7;
pub const SPLITTER_SIZE: f64 = 17.0;
pub const SPLITTER_REWARD: u32 = 20;

/// Swarm enemies released when a Splitter dies.
pub const SPLITTER_BROOD_SIZE: u32 = 3;

/// Positional jitter half-width for Splitter offspring.
pub const SPLITTER_BROOD_JITTER: f64 = 15.0;

/// Per-frame sinusoidal drift: x += sin(y * FREQ) * AMP each frame.
/// Amplitude is per frame, not scaled by elapsed time.
pub const WOBBLE_FREQ: f64 = 0.05;
pub const WOBBLE_AMP: f64 = 0.5;

// --- Base & economy ---

/// Maximum base health.
pub const BASE_MAX_HP: i32 = 100;

/// Base health lost per breaching enemy.
pub const BASE_BREACH_DAMAGE: i32 = 10;

/// Default opening credits balance.
pub const STARTING_CREDITS: u32 = 120;

// --- Towers ---

/// Minimum clearance between tower centers.
pub const TOWER_CLEARANCE: f64 = 30.0;

/// Build costs (credits).
pub const TURRET_COST: u32 = 50;
pub const LASER_COST: u32 = 75;
pub const SHIELD_COST: u32 = 100;
pub const MISSILE_COST: u32 = 125;
pub const TESLA_COST: u32 = 150;

/// Turret: nearest-target cannon.
pub const TURRET_RANGE: f64 = 450.0;
pub const TURRET_DAMAGE: f64 = 15.0;
pub const TURRET_FIRE_INTERVAL_MS: f64 = 400.0;
pub const TURRET_AIM_RATE: f64 = 0.15;

/// Laser: continuous beam.
pub const LASER_RANGE: f64 = 500.0;
pub const LASER_DPS: f64 = 35.0;
pub const LASER_AIM_RATE: f64 = 0.15;

/// Beam intensity gain per ms while locked, and per-frame decay while not.
pub const LASER_RAMP_PER_MS: f64 = 0.003;
pub const LASER_DECAY_FACTOR: f64 = 0.9;

/// Shield dome.
pub const SHIELD_RADIUS: f64 = 120.0;
pub const SHIELD_MAX_HP: f64 = 150.0;
pub const SHIELD_REGEN_PER_SEC: f64 = 10.0;
pub const SHIELD_SLOW_FACTOR: f64 = 0.35;
pub const SHIELD_DPS: f64 = 10.0;

/// Dome strain per enemy inside, per reference frame (hp).
pub const SHIELD_STRAIN_PER_FRAME: f64 = 0.3;

/// Dome downtime after collapse (ms) and the reactivation fraction.
pub const SHIELD_RECHARGE_MS: f64 = 4000.0;
pub const SHIELD_REACTIVATE_FRAC: f64 = 0.5;

/// Missile battery: homing shells, toughest-target priority.
pub const MISSILE_RANGE: f64 = 550.0;
pub const MISSILE_DAMAGE: f64 = 45.0;
pub const MISSILE_SPLASH_RADIUS: f64 = 65.0;
pub const MISSILE_FIRE_INTERVAL_MS: f64 = 1600.0;
pub const MISSILE_AIM_RATE: f64 = 0.1;

/// Tesla coil: chain lightning.
pub const TESLA_RANGE: f64 = 280.0;
pub const TESLA_DPS: f64 = 22.0;
pub const TESLA_CHAIN_COUNT: usize = 4;
pub const TESLA_CHAIN_RANGE: f64 = 130.0;

// --- Projectiles ---

/// Direct-fire shell.
pub const SHELL_SPEED: f64 = 1.2;
pub const SHELL_TTL_MS: f64 = 1000.0;
pub const SHELL_SIZE: f64 = 3.0;

/// Homing shell.
pub const HOMING_SPEED: f64 = 0.55;
pub const HOMING_MAX_SPEED: f64 = 1.8;
pub const HOMING_ACCEL_PER_MS: f64 = 0.0004;
pub const HOMING_TTL_MS: f64 = 3000.0;
pub const HOMING_SIZE: f64 = 4.0;
pub const HOMING_TURN_RATE: f64 = 0.0035;

/// Fraction of the primary hit dealt as splash, rounded to the nearest whole.
pub const SPLASH_DAMAGE_FRAC: f64 = 0.5;

// --- Capital ships ---

/// Fraction of approach above which ships favor appearing (and a second may).
pub const CAPSHIP_APPROACH_NEAR: f64 = 0.3;
pub const CAPSHIP_APPROACH_SECOND: f64 = 0.5;

/// Appearance chance per wave start, below/above the near threshold.
pub const CAPSHIP_CHANCE_FAR: f64 = 0.4;
pub const CAPSHIP_CHANCE_NEAR: f64 = 0.8;

/// Chance of a second ship above the second threshold.
pub const CAPSHIP_SECOND_CHANCE: f64 = 0.5;

/// Horizontal entry offset beyond the playfield edge.
pub const CAPSHIP_ENTRY_OFFSET: f64 = 300.0;

/// Culled once this far beyond either edge.
pub const CAPSHIP_CULL_OFFSET: f64 = 500.0;

/// Drift speed: base + up to this much extra (units/ms).
pub const CAPSHIP_DRIFT_BASE: f64 = 0.01;
pub const CAPSHIP_DRIFT_EXTRA: f64 = 0.015;

/// Altitude band as fractions of playfield height.
pub const CAPSHIP_Y_MIN_FRAC: f64 = 0.1;
pub const CAPSHIP_Y_SPAN_FRAC: f64 = 0.3;

/// Hull extent: base + up to this much extra.
pub const CAPSHIP_LENGTH_BASE: f64 = 300.0;
pub const CAPSHIP_LENGTH_EXTRA: f64 = 200.0;
pub const CAPSHIP_DEPTH_BASE: f64 = 60.0;
pub const CAPSHIP_DEPTH_EXTRA: f64 = 40.0;

// --- Fx ---

/// Wave-start shake magnitude: min(cap, base + approach * scale).
pub const SHAKE_CAP: f64 = 12.0;
pub const SHAKE_BASE: f64 = 1.0;
pub const SHAKE_APPROACH_SCALE: f64 = 15.0;
