//! Entity spawn factories for populating the simulation world.
//!
//! Every entity enters the world through one of these functions, which is
//! also where the shared id counter is advanced. Stats are derived from the
//! session state at spawn time and never revised afterward.

use std::f64::consts::FRAC_PI_2;

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use planetfall_core::components::{
    Cannon, CapitalShip, Enemy, HomingGuidance, LaserEmitter, Projectile, ShieldDome, TeslaCoil,
    Tower,
};
use planetfall_core::constants::*;
use planetfall_core::enums::{EnemyVariant, ShieldPhase, TowerVariant};
use planetfall_core::types::{Position, Velocity};

use crate::state::GameState;

/// Spawn a single enemy at `position`, descending toward `target`.
///
/// Hit points and speed scale with the wave and approach in effect at the
/// moment of spawn. Splitter offspring therefore inherit the difficulty of
/// the wave they burst in, not the wave their parent spawned in.
pub fn spawn_enemy_at(
    world: &mut World,
    state: &GameState,
    next_id: &mut u32,
    variant: EnemyVariant,
    position: Position,
    target: Position,
) -> hecs::Entity {
    let wave = state.wave as f64;
    let base_speed = ENEMY_BASE_SPEED
        + wave * ENEMY_SPEED_PER_WAVE
        + state.approach * ENEMY_SPEED_PER_APPROACH;

    let (hp, speed, size, reward) = match variant {
        EnemyVariant::Standard => (
            ENEMY_BASE_HP + wave * ENEMY_HP_PER_WAVE,
            base_speed,
            ENEMY_SIZE,
            ENEMY_REWARD,
        ),
        EnemyVariant::Tank => (
            TANK_BASE_HP + wave * TANK_HP_PER_WAVE,
            base_speed * TANK_SPEED_FACTOR,
            TANK_SIZE,
            TANK_REWARD,
        ),
        EnemyVariant::Swarm => (
            SWARM_BASE_HP + wave * SWARM_HP_PER_WAVE,
            base_speed * SWARM_SPEED_FACTOR,
            SWARM_SIZE,
            SWARM_REWARD,
        ),
        EnemyVariant::Splitter => (
            SPLITTER_BASE_HP + wave * SPLITTER_HP_PER_WAVE,
            base_speed * SPLITTER_SPEED_FACTOR,
            SPLITTER_SIZE,
            SPLITTER_REWARD,
        ),
    };

    let id = *next_id;
    *next_id += 1;

    let enemy = Enemy {
        id,
        variant,
        hp,
        max_hp: hp,
        speed,
        size,
        reward,
        heading: position.heading_to(&target),
        slow_factor: 1.0,
    };
    world.spawn((enemy, position))
}

/// Spawn a capital ship drifting across the backdrop.
pub fn spawn_capital_ship(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    state: &GameState,
    next_id: &mut u32,
) -> hecs::Entity {
    let from_left = rng.gen_bool(0.5);
    let x = if from_left {
        -CAPSHIP_ENTRY_OFFSET
    } else {
        state.width + CAPSHIP_ENTRY_OFFSET
    };
    let y = state.height * CAPSHIP_Y_MIN_FRAC + rng.gen::<f64>() * state.height * CAPSHIP_Y_SPAN_FRAC;
    let drift = CAPSHIP_DRIFT_BASE + rng.gen::<f64>() * CAPSHIP_DRIFT_EXTRA;
    let vx = if from_left { drift } else { -drift };
    let length = CAPSHIP_LENGTH_BASE + rng.gen::<f64>() * CAPSHIP_LENGTH_EXTRA;
    let depth = CAPSHIP_DEPTH_BASE + rng.gen::<f64>() * CAPSHIP_DEPTH_EXTRA;

    let id = *next_id;
    *next_id += 1;

    world.spawn((
        CapitalShip { id, length, depth },
        Position::new(x, y),
        Velocity::new(vx, 0.0),
    ))
}

/// Place a tower of `variant` at `position`, attaching its weapon component.
pub fn place_tower(
    world: &mut World,
    next_id: &mut u32,
    variant: TowerVariant,
    position: Position,
) -> hecs::Entity {
    let id = *next_id;
    *next_id += 1;
    let tower = Tower { id, variant };

    match variant {
        TowerVariant::Turret => world.spawn((
            tower,
            position,
            Cannon {
                range: TURRET_RANGE,
                damage: TURRET_DAMAGE,
                fire_interval_ms: TURRET_FIRE_INTERVAL_MS,
                cooldown_ms: 0.0,
                aim_angle: 0.0,
                aim_rate: TURRET_AIM_RATE,
                splash_radius: None,
            },
        )),
        TowerVariant::Missile => world.spawn((
            tower,
            position,
            Cannon {
                range: MISSILE_RANGE,
                damage: MISSILE_DAMAGE,
                fire_interval_ms: MISSILE_FIRE_INTERVAL_MS,
                cooldown_ms: 0.0,
                // Launch tubes rest pointing up.
                aim_angle: -FRAC_PI_2,
                aim_rate: MISSILE_AIM_RATE,
                splash_radius: Some(MISSILE_SPLASH_RADIUS),
            },
        )),
        TowerVariant::Laser => world.spawn((
            tower,
            position,
            LaserEmitter {
                range: LASER_RANGE,
                dps: LASER_DPS,
                aim_angle: 0.0,
                aim_rate: LASER_AIM_RATE,
                beam_intensity: 0.0,
                beam_target: None,
            },
        )),
        TowerVariant::Shield => world.spawn((
            tower,
            position,
            ShieldDome {
                radius: SHIELD_RADIUS,
                hp: SHIELD_MAX_HP,
                max_hp: SHIELD_MAX_HP,
                regen_per_sec: SHIELD_REGEN_PER_SEC,
                slow_factor: SHIELD_SLOW_FACTOR,
                dps: SHIELD_DPS,
                phase: ShieldPhase::Active,
                recharge_remaining_ms: 0.0,
            },
        )),
        TowerVariant::Tesla => world.spawn((
            tower,
            position,
            TeslaCoil {
                range: TESLA_RANGE,
                dps: TESLA_DPS,
                chain_count: TESLA_CHAIN_COUNT,
                chain_range: TESLA_CHAIN_RANGE,
                arc: Vec::new(),
            },
        )),
    }
}

/// Spawn a ballistic shell flying toward where the target is right now.
pub fn spawn_shell(
    world: &mut World,
    next_id: &mut u32,
    origin: Position,
    target: Position,
    damage: f64,
) -> hecs::Entity {
    let id = *next_id;
    *next_id += 1;
    let heading = origin.heading_to(&target);

    world.spawn((
        Projectile {
            id,
            damage,
            size: SHELL_SIZE,
            ttl_ms: SHELL_TTL_MS,
            splash_radius: None,
        },
        origin,
        Velocity::from_heading(heading, SHELL_SPEED),
    ))
}

/// Spawn a homing shell locked onto `target_id`.
pub fn spawn_homing_shell(
    world: &mut World,
    next_id: &mut u32,
    origin: Position,
    target: Position,
    target_id: u32,
    damage: f64,
    splash_radius: f64,
) -> hecs::Entity {
    let id = *next_id;
    *next_id += 1;
    let heading = origin.heading_to(&target);

    world.spawn((
        Projectile {
            id,
            damage,
            size: HOMING_SIZE,
            ttl_ms: HOMING_TTL_MS,
            splash_radius: Some(splash_radius),
        },
        HomingGuidance {
            target_id,
            heading,
            speed: HOMING_SPEED,
        },
        origin,
        Velocity::from_heading(heading, HOMING_SPEED),
    ))
}
