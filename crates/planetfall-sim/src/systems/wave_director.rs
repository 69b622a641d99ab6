//! Wave direction: queue sizing, spawn pacing, variant mix, capital ships.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use planetfall_core::components::Enemy;
use planetfall_core::constants::*;
use planetfall_core::enums::EnemyVariant;
use planetfall_core::events::FxEvent;
use planetfall_core::types::Position;

use crate::state::GameState;
use crate::world_setup;

/// Begin the current wave: size the spawn queue, announce it, and roll
/// capital ships onto the backdrop.
pub fn start_wave(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    state: &mut GameState,
    next_id: &mut u32,
    fx: &mut Vec<FxEvent>,
) {
    state.enemies_to_spawn = WAVE_BASE_COUNT
        + state.wave * WAVE_COUNT_PER_WAVE
        + (state.approach * WAVE_COUNT_APPROACH_SCALE).floor() as u32;
    state.spawn_timer_ms = 0.0;

    let shake = (SHAKE_BASE + state.approach * SHAKE_APPROACH_SCALE).min(SHAKE_CAP);
    fx.push(FxEvent::WaveStarted {
        wave: state.wave,
        shake,
    });

    // Even waves always get a ship; the draw is skipped entirely.
    let ship_chance = if state.approach > CAPSHIP_APPROACH_NEAR {
        CAPSHIP_CHANCE_NEAR
    } else {
        CAPSHIP_CHANCE_FAR
    };
    if state.wave % 2 == 0 || rng.gen::<f64>() < ship_chance {
        world_setup::spawn_capital_ship(world, rng, state, next_id);
    }
    if state.approach > CAPSHIP_APPROACH_SECOND && rng.gen::<f64>() < CAPSHIP_SECOND_CHANCE {
        world_setup::spawn_capital_ship(world, rng, state, next_id);
    }
}

/// Accumulate the spawn timer and release at most one spawn event per frame
/// while the wave still owes enemies.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    state: &mut GameState,
    next_id: &mut u32,
    fx: &mut Vec<FxEvent>,
    elapsed_ms: f64,
) {
    if state.enemies_to_spawn == 0 {
        return;
    }

    state.spawn_timer_ms += elapsed_ms;
    if state.spawn_timer_ms > spawn_interval_ms(state.wave, state.approach) {
        spawn_next(world, rng, state, next_id, fx);
        state.enemies_to_spawn -= 1;
        state.spawn_timer_ms = 0.0;
    }
}

/// Current gap between spawn releases, shrinking with wave and approach.
pub fn spawn_interval_ms(wave: u32, approach: f64) -> f64 {
    let wave_cut = (wave as f64 * SPAWN_INTERVAL_WAVE_STEP_MS).min(SPAWN_INTERVAL_WAVE_CAP_MS);
    ((SPAWN_INTERVAL_BASE_MS - wave_cut) * (1.0 - approach * SPAWN_INTERVAL_APPROACH_SCALE))
        .max(SPAWN_INTERVAL_MIN_MS)
}

/// Advance to the next wave once the spawn queue and the field are both
/// empty. Runs at the end of the frame so the new wave starts clean.
pub fn check_wave_advance(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    state: &mut GameState,
    next_id: &mut u32,
    fx: &mut Vec<FxEvent>,
) {
    if state.enemies_to_spawn > 0 {
        return;
    }
    let field_clear = {
        let mut query = world.query::<&Enemy>();
        query.iter().next().is_none()
    };
    if field_clear {
        state.wave += 1;
        start_wave(world, rng, state, next_id, fx);
    }
}

/// Release one spawn event: draw entry and target geometry, roll the
/// variant, spawn. A swarm roll releases a whole trio around the drawn
/// entry point.
fn spawn_next(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    state: &mut GameState,
    next_id: &mut u32,
    fx: &mut Vec<FxEvent>,
) {
    let entry_x =
        state.width * SPAWN_BAND_MIN_FRAC + rng.gen::<f64>() * state.width * SPAWN_BAND_SPAN_FRAC;
    let target_x =
        state.width * TARGET_BAND_MIN_FRAC + rng.gen::<f64>() * state.width * TARGET_BAND_SPAN_FRAC;
    let target_y = state.height + TARGET_Y_OVERSHOOT;

    let wave = state.wave;
    let roll: f64 = rng.gen();
    let variant = if wave >= SPLITTER_MIN_WAVE
        && roll < SPLITTER_CHANCE_BASE + wave as f64 * SPLITTER_CHANCE_PER_WAVE
    {
        EnemyVariant::Splitter
    } else if wave >= TANK_MIN_WAVE && roll < TANK_CHANCE_BASE + wave as f64 * TANK_CHANCE_PER_WAVE
    {
        EnemyVariant::Tank
    } else if wave >= SWARM_MIN_WAVE
        && roll < SWARM_CHANCE_BASE + wave as f64 * SWARM_CHANCE_PER_WAVE
    {
        EnemyVariant::Swarm
    } else {
        EnemyVariant::Standard
    };

    if variant == EnemyVariant::Swarm {
        for _ in 0..SWARM_GROUP_SIZE {
            let position = Position::new(
                entry_x + (rng.gen::<f64>() - 0.5) * (SWARM_JITTER_X * 2.0),
                SPAWN_Y - rng.gen::<f64>() * SWARM_JITTER_Y,
            );
            let target = Position::new(
                target_x + (rng.gen::<f64>() - 0.5) * (SWARM_TARGET_JITTER_X * 2.0),
                target_y,
            );
            world_setup::spawn_enemy_at(world, state, next_id, EnemyVariant::Swarm, position, target);
            fx.push(FxEvent::EnemySpawned {
                position,
                variant: EnemyVariant::Swarm,
            });
        }
    } else {
        let position = Position::new(entry_x, SPAWN_Y);
        let target = Position::new(target_x, target_y);
        world_setup::spawn_enemy_at(world, state, next_id, variant, position, target);
        fx.push(FxEvent::EnemySpawned { position, variant });
    }
}
