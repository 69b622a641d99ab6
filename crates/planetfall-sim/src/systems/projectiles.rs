//! Projectile flight and impact: homing steer, culling, collision, splash.

use hecs::{Entity, World};

use planetfall_core::components::{Enemy, HomingGuidance, Projectile};
use planetfall_core::constants::{
    HOMING_ACCEL_PER_MS, HOMING_MAX_SPEED, HOMING_TURN_RATE, PROJECTILE_BOUNDS_MARGIN,
    SPLASH_DAMAGE_FRAC,
};
use planetfall_core::events::FxEvent;
use planetfall_core::types::{wrap_angle, Position, Velocity};

use crate::state::GameState;

/// Advance every shell and resolve impacts. Damage lands on enemy hit
/// points here; deaths are settled by the cleanup sweep afterward.
pub fn run(
    world: &mut World,
    state: &GameState,
    despawn_buffer: &mut Vec<Entity>,
    fx: &mut Vec<FxEvent>,
    elapsed_ms: f64,
) {
    steer_homing(world, elapsed_ms);
    fly_and_collide(world, state, despawn_buffer, fx, elapsed_ms);
}

/// Accelerate each homing shell and turn it toward its target while the
/// target is still alive. A shell whose target died flies on straight and
/// detonates on whatever it contacts.
fn steer_homing(world: &mut World, elapsed_ms: f64) {
    let mut living: Vec<(u32, Position)> = Vec::new();
    for (_entity, (enemy, pos)) in world.query_mut::<(&Enemy, &Position)>() {
        if enemy.hp > 0.0 {
            living.push((enemy.id, *pos));
        }
    }

    for (_entity, (guidance, pos, vel)) in
        world.query_mut::<(&mut HomingGuidance, &Position, &mut Velocity)>()
    {
        if let Some(&(_, target_pos)) = living.iter().find(|(id, _)| *id == guidance.target_id) {
            let desired = pos.heading_to(&target_pos);
            let diff = wrap_angle(desired - guidance.heading);
            let max_turn = HOMING_TURN_RATE * elapsed_ms;
            guidance.heading += diff.clamp(-max_turn, max_turn);
        }

        guidance.speed = (guidance.speed + HOMING_ACCEL_PER_MS * elapsed_ms).min(HOMING_MAX_SPEED);
        *vel = Velocity::from_heading(guidance.heading, guidance.speed);
    }
}

/// Move shells, cull the expired and out-of-bounds, then resolve contacts.
///
/// There is no bottom-edge cull: a shell chasing an enemy toward the base
/// line lives until its clock runs out.
fn fly_and_collide(
    world: &mut World,
    state: &GameState,
    despawn_buffer: &mut Vec<Entity>,
    fx: &mut Vec<FxEvent>,
    elapsed_ms: f64,
) {
    despawn_buffer.clear();

    for (entity, (shell, pos, vel)) in
        world.query_mut::<(&mut Projectile, &mut Position, &Velocity)>()
    {
        pos.x += vel.x * elapsed_ms;
        pos.y += vel.y * elapsed_ms;
        shell.ttl_ms -= elapsed_ms;

        if shell.ttl_ms <= 0.0
            || pos.y < -PROJECTILE_BOUNDS_MARGIN
            || pos.x < -PROJECTILE_BOUNDS_MARGIN
            || pos.x > state.width + PROJECTILE_BOUNDS_MARGIN
        {
            despawn_buffer.push(entity);
        }
    }
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }

    // Positions are frozen for the rest of the pass; hit points are read
    // live so one kill cannot be double-counted by two shells.
    let shells: Vec<(Entity, Position, f64, f64, Option<f64>)> = {
        let mut query = world.query::<(&Projectile, &Position)>();
        query
            .iter()
            .map(|(entity, (shell, pos))| {
                (entity, *pos, shell.size, shell.damage, shell.splash_radius)
            })
            .collect()
    };
    let enemy_list: Vec<(Entity, Position, f64)> = {
        let mut query = world.query::<(&Enemy, &Position)>();
        query
            .iter()
            .map(|(entity, (enemy, pos))| (entity, *pos, enemy.size))
            .collect()
    };

    despawn_buffer.clear();
    for (shell_entity, shell_pos, shell_size, damage, splash_radius) in shells {
        let mut contact: Option<Entity> = None;
        for &(enemy_entity, enemy_pos, enemy_size) in &enemy_list {
            if !is_alive(world, enemy_entity) {
                continue;
            }
            if shell_pos.distance_to(&enemy_pos) < enemy_size + shell_size {
                contact = Some(enemy_entity);
                break;
            }
        }
        let primary = match contact {
            Some(enemy) => enemy,
            None => continue,
        };

        if let Ok(mut enemy) = world.get::<&mut Enemy>(primary) {
            enemy.hp -= damage;
        }

        if let Some(radius) = splash_radius {
            fx.push(FxEvent::SplashDetonation {
                position: shell_pos,
                radius,
            });
            let splash_damage = (damage * SPLASH_DAMAGE_FRAC).round();
            for &(other, other_pos, _size) in &enemy_list {
                if other == primary || !is_alive(world, other) {
                    continue;
                }
                if shell_pos.distance_to(&other_pos) < radius {
                    if let Ok(mut enemy) = world.get::<&mut Enemy>(other) {
                        enemy.hp -= splash_damage;
                    }
                }
            }
        }

        despawn_buffer.push(shell_entity);
    }
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

fn is_alive(world: &World, entity: Entity) -> bool {
    match world.get::<&Enemy>(entity) {
        Ok(enemy) => enemy.hp > 0.0,
        Err(_) => false,
    }
}
