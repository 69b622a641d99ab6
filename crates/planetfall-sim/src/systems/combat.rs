//! Tower fire: cannon launches, laser beams, shield domes, tesla arcs.
//!
//! Runs on the targets resolved earlier in the frame. Damage is applied
//! directly to enemy hit points; deaths are settled by the cleanup sweep
//! at the end of the frame, so a corpse can keep absorbing beam and arc
//! damage for the remainder of this one.

use hecs::{Entity, World};

use planetfall_core::components::{Cannon, Enemy, LaserEmitter, ShieldDome, TeslaCoil};
use planetfall_core::constants::{
    LASER_DECAY_FACTOR, LASER_RAMP_PER_MS, REFERENCE_FRAME_MS, SHIELD_REACTIVATE_FRAC,
    SHIELD_RECHARGE_MS, SHIELD_STRAIN_PER_FRAME,
};
use planetfall_core::enums::ShieldPhase;
use planetfall_core::events::FxEvent;
use planetfall_core::types::Position;

use crate::systems::targeting::TargetTable;
use crate::world_setup;

/// Apply every tower effect for this frame.
pub fn run(
    world: &mut World,
    targets: &TargetTable,
    next_id: &mut u32,
    fx: &mut Vec<FxEvent>,
    elapsed_ms: f64,
) {
    run_cannons(world, targets, next_id, elapsed_ms);
    run_lasers(world, targets, elapsed_ms);
    run_shields(world, fx, elapsed_ms);
    run_teslas(world, targets, elapsed_ms);
}

/// Tick cooldowns and fire every ready cannon at its resolved target.
fn run_cannons(world: &mut World, targets: &TargetTable, next_id: &mut u32, elapsed_ms: f64) {
    for (_entity, cannon) in world.query_mut::<&mut Cannon>() {
        cannon.cooldown_ms -= elapsed_ms;
    }

    // Collect launch orders first; spawning borrows the world again.
    let mut launches: Vec<(Entity, Entity)> = Vec::new();
    for &(tower, target) in &targets.cannon {
        let ready = match world.get::<&Cannon>(tower) {
            Ok(cannon) => cannon.cooldown_ms <= 0.0,
            Err(_) => false,
        };
        if ready {
            launches.push((tower, target));
        }
    }

    for (tower, target) in launches {
        let origin = match world.get::<&Position>(tower) {
            Ok(pos) => *pos,
            Err(_) => continue,
        };
        let (damage, splash_radius, interval) = match world.get::<&Cannon>(tower) {
            Ok(cannon) => (cannon.damage, cannon.splash_radius, cannon.fire_interval_ms),
            Err(_) => continue,
        };
        let target_pos = match world.get::<&Position>(target) {
            Ok(pos) => *pos,
            Err(_) => continue,
        };

        match splash_radius {
            Some(radius) => {
                let target_id = match world.get::<&Enemy>(target) {
                    Ok(enemy) => enemy.id,
                    Err(_) => continue,
                };
                world_setup::spawn_homing_shell(
                    world, next_id, origin, target_pos, target_id, damage, radius,
                );
            }
            None => {
                world_setup::spawn_shell(world, next_id, origin, target_pos, damage);
            }
        }

        if let Ok(mut cannon) = world.get::<&mut Cannon>(tower) {
            cannon.cooldown_ms = interval;
        }
    }
}

/// Ramp locked beams and burn their targets; decay beams without a lock.
fn run_lasers(world: &mut World, targets: &TargetTable, elapsed_ms: f64) {
    // Lock positions resolved up front so the emitter pass owns the world.
    let mut locks: Vec<(Entity, Entity, Position)> = Vec::new();
    for &(tower, enemy) in &targets.beams {
        if let Ok(pos) = world.get::<&Position>(enemy) {
            locks.push((tower, enemy, *pos));
        }
    }

    let mut hits: Vec<(Entity, f64)> = Vec::new();
    for (tower_entity, laser) in world.query_mut::<&mut LaserEmitter>() {
        match locks.iter().find(|(tower, _, _)| *tower == tower_entity) {
            Some(&(_, enemy, enemy_pos)) => {
                laser.beam_intensity =
                    (laser.beam_intensity + elapsed_ms * LASER_RAMP_PER_MS).min(1.0);
                laser.beam_target = Some(enemy_pos);
                hits.push((enemy, laser.dps * (elapsed_ms / 1000.0) * laser.beam_intensity));
            }
            None => {
                laser.beam_intensity *= LASER_DECAY_FACTOR;
                laser.beam_target = None;
            }
        }
    }

    for (enemy, damage) in hits {
        if let Ok(mut target) = world.get::<&mut Enemy>(enemy) {
            target.hp -= damage;
        }
    }
}

/// Run every shield dome: regenerate, slow and burn intruders, take strain,
/// collapse and recharge.
fn run_shields(world: &mut World, fx: &mut Vec<FxEvent>, elapsed_ms: f64) {
    let enemies: Vec<(Entity, Position, f64)> = {
        let mut query = world.query::<(&Enemy, &Position)>();
        query
            .iter()
            .map(|(entity, (enemy, pos))| (entity, *pos, enemy.hp))
            .collect()
    };

    let mut slows: Vec<(Entity, f64)> = Vec::new();
    let mut burns: Vec<(Entity, f64)> = Vec::new();

    for (_tower, (dome, pos)) in world.query_mut::<(&mut ShieldDome, &Position)>() {
        match dome.phase {
            ShieldPhase::Recharging => {
                dome.recharge_remaining_ms -= elapsed_ms;
                if dome.recharge_remaining_ms <= 0.0 {
                    dome.phase = ShieldPhase::Active;
                    dome.hp = dome.max_hp * SHIELD_REACTIVATE_FRAC;
                    fx.push(FxEvent::ShieldRestored { position: *pos });
                }
            }
            ShieldPhase::Active => {
                dome.hp = (dome.hp + dome.regen_per_sec * (elapsed_ms / 1000.0)).min(dome.max_hp);

                let burn = dome.dps * (elapsed_ms / 1000.0);
                let strain = SHIELD_STRAIN_PER_FRAME * (elapsed_ms / REFERENCE_FRAME_MS);
                for &(enemy, enemy_pos, hp) in &enemies {
                    if hp <= 0.0 {
                        continue;
                    }
                    if pos.distance_to(&enemy_pos) < dome.radius {
                        slows.push((enemy, dome.slow_factor));
                        burns.push((enemy, burn));
                        dome.hp -= strain;
                    }
                }

                if dome.hp <= 0.0 {
                    dome.hp = 0.0;
                    dome.phase = ShieldPhase::Recharging;
                    dome.recharge_remaining_ms = SHIELD_RECHARGE_MS;
                    fx.push(FxEvent::ShieldDown { position: *pos });
                }
            }
        }
    }

    for (enemy, slow) in slows {
        if let Ok(mut target) = world.get::<&mut Enemy>(enemy) {
            target.slow_factor = slow;
        }
    }
    for (enemy, damage) in burns {
        if let Ok(mut target) = world.get::<&mut Enemy>(enemy) {
            target.hp -= damage;
        }
    }
}

/// Burn every chain member and record the arc path for rendering.
fn run_teslas(world: &mut World, targets: &TargetTable, elapsed_ms: f64) {
    let mut arc_updates: Vec<(Entity, Vec<Position>)> = Vec::new();
    let mut burns: Vec<(Entity, f64)> = Vec::new();

    for (tower, chain) in &targets.chains {
        let damage = match world.get::<&TeslaCoil>(*tower) {
            Ok(coil) => coil.dps * (elapsed_ms / 1000.0),
            Err(_) => continue,
        };
        let mut points = Vec::with_capacity(chain.len());
        for &enemy in chain {
            if let Ok(pos) = world.get::<&Position>(enemy) {
                points.push(*pos);
                burns.push((enemy, damage));
            }
        }
        arc_updates.push((*tower, points));
    }

    for (_entity, coil) in world.query_mut::<&mut TeslaCoil>() {
        coil.arc.clear();
    }
    for (tower, points) in arc_updates {
        if let Ok(mut coil) = world.get::<&mut TeslaCoil>(tower) {
            coil.arc = points;
        }
    }
    for (enemy, damage) in burns {
        if let Ok(mut target) = world.get::<&mut Enemy>(enemy) {
            target.hp -= damage;
        }
    }
}
