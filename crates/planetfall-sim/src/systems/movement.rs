//! Kinematics: enemy descent toward the base line and capital-ship drift.

use hecs::{Entity, World};

use planetfall_core::components::{CapitalShip, Enemy};
use planetfall_core::constants::{BASE_BREACH_DAMAGE, CAPSHIP_CULL_OFFSET, WOBBLE_AMP, WOBBLE_FREQ};
use planetfall_core::events::FxEvent;
use planetfall_core::types::{Position, Velocity};

use crate::state::GameState;

/// Move every enemy along its heading, apply the lateral wobble, and settle
/// base breaches. Returns true if the base was destroyed this pass.
///
/// The slow factor is consumed here and reset to full speed; shield domes
/// re-stamp it later in the frame, so slowing always acts one frame behind
/// the dome that caused it.
pub fn run_enemies(
    world: &mut World,
    state: &mut GameState,
    despawn_buffer: &mut Vec<Entity>,
    fx: &mut Vec<FxEvent>,
    elapsed_ms: f64,
) -> bool {
    despawn_buffer.clear();
    let base_line = state.base_line();

    for (entity, (enemy, pos)) in world.query_mut::<(&mut Enemy, &mut Position)>() {
        let effective_speed = enemy.speed * enemy.slow_factor;
        enemy.slow_factor = 1.0;

        pos.x += enemy.heading.cos() * effective_speed * elapsed_ms;
        pos.y += enemy.heading.sin() * effective_speed * elapsed_ms;
        // Per-frame lateral drift, deliberately not scaled by elapsed time.
        pos.x += (pos.y * WOBBLE_FREQ).sin() * WOBBLE_AMP;

        if pos.y > base_line {
            state.base_hp -= BASE_BREACH_DAMAGE;
            fx.push(FxEvent::BaseHit {
                x: pos.x,
                base_hp: state.base_hp.max(0),
            });
            despawn_buffer.push(entity);
        }
    }

    // Breachers leave the field immediately, before towers scan for targets.
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }

    state.base_hp <= 0
}

/// Drift capital ships across the backdrop and cull them past the margins.
pub fn run_capital_ships(
    world: &mut World,
    state: &GameState,
    despawn_buffer: &mut Vec<Entity>,
    elapsed_ms: f64,
) {
    despawn_buffer.clear();

    for (entity, (_ship, pos, vel)) in
        world.query_mut::<(&CapitalShip, &mut Position, &Velocity)>()
    {
        pos.x += vel.x * elapsed_ms;
        if pos.x < -CAPSHIP_CULL_OFFSET || pos.x > state.width + CAPSHIP_CULL_OFFSET {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
