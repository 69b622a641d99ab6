//! Death sweep: settles every enemy kill in exactly one place.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use planetfall_core::components::Enemy;
use planetfall_core::constants::{
    SPAWN_BAND_MIN_FRAC, SPAWN_BAND_SPAN_FRAC, SPLITTER_BROOD_JITTER, SPLITTER_BROOD_SIZE,
    TARGET_Y_OVERSHOOT,
};
use planetfall_core::enums::EnemyVariant;
use planetfall_core::events::FxEvent;
use planetfall_core::types::Position;

use crate::state::GameState;
use crate::world_setup;

/// Sweep enemies at or below zero hit points: pay the reward, count the
/// kill, release splitter broods, and despawn. Runs after every damage
/// source in the frame, so no other system pays out kills.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    state: &mut GameState,
    next_id: &mut u32,
    fx: &mut Vec<FxEvent>,
    despawn_buffer: &mut Vec<Entity>,
) {
    despawn_buffer.clear();

    let mut dead: Vec<(Entity, Position, EnemyVariant, u32)> = Vec::new();
    for (entity, (enemy, pos)) in world.query_mut::<(&Enemy, &Position)>() {
        if enemy.hp <= 0.0 {
            dead.push((entity, *pos, enemy.variant, enemy.reward));
        }
    }

    for (entity, position, variant, reward) in dead {
        state.credit(reward);
        state.kills += 1;
        fx.push(FxEvent::EnemyDestroyed {
            position,
            variant,
            reward,
        });

        if variant == EnemyVariant::Splitter {
            fx.push(FxEvent::SplitterBurst { position });
            for _ in 0..SPLITTER_BROOD_SIZE {
                let brood_pos = Position::new(
                    position.x + (rng.gen::<f64>() - 0.5) * (SPLITTER_BROOD_JITTER * 2.0),
                    position.y + (rng.gen::<f64>() - 0.5) * (SPLITTER_BROOD_JITTER * 2.0),
                );
                // Broods re-draw a descent target across the entry band.
                let target = Position::new(
                    state.width * SPAWN_BAND_MIN_FRAC
                        + rng.gen::<f64>() * state.width * SPAWN_BAND_SPAN_FRAC,
                    state.height + TARGET_Y_OVERSHOOT,
                );
                world_setup::spawn_enemy_at(
                    world,
                    state,
                    next_id,
                    EnemyVariant::Swarm,
                    brood_pos,
                    target,
                );
            }
        }

        despawn_buffer.push(entity);
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
