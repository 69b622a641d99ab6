//! Per-tower target resolution, run once per frame before any damage.
//!
//! Targets are re-derived from scratch every frame, so no tower ever holds
//! a handle to an entity across a despawn. Ties on distance or hit points
//! keep the earliest candidate in world iteration order, which is stable
//! for a given seed.

use hecs::{Entity, World};

use planetfall_core::components::{Cannon, Enemy, LaserEmitter, TeslaCoil, Tower};
use planetfall_core::enums::TowerVariant;
use planetfall_core::types::{wrap_angle, Position};

/// Targets resolved for one frame.
#[derive(Debug, Default)]
pub struct TargetTable {
    /// Cannon mounts (turret and missile) with a resolved target.
    pub cannon: Vec<(Entity, Entity)>,
    /// Laser emitters with a lock.
    pub beams: Vec<(Entity, Entity)>,
    /// Tesla chains, primary target first.
    pub chains: Vec<(Entity, Vec<Entity>)>,
}

/// Resolve every tower's target for this frame and smooth aim angles
/// toward them.
pub fn run(world: &mut World) -> TargetTable {
    // One pass over the field, reused by every tower scan.
    let enemies: Vec<(Entity, Position, f64)> = {
        let mut query = world.query::<(&Enemy, &Position)>();
        query
            .iter()
            .map(|(entity, (enemy, pos))| (entity, *pos, enemy.hp))
            .collect()
    };

    let mut table = TargetTable::default();

    for (tower_entity, (tower, cannon, pos)) in
        world.query_mut::<(&Tower, &mut Cannon, &Position)>()
    {
        let target = match tower.variant {
            // Turret scans do not filter on remaining hit points.
            TowerVariant::Turret => nearest_any(&enemies, pos, cannon.range),
            _ => toughest_living(&enemies, pos, cannon.range),
        };
        if let Some((enemy_entity, enemy_pos)) = target {
            table.cannon.push((tower_entity, enemy_entity));
            let desired = pos.heading_to(&enemy_pos);
            cannon.aim_angle += wrap_angle(desired - cannon.aim_angle) * cannon.aim_rate;
        }
    }

    for (tower_entity, (laser, pos)) in world.query_mut::<(&mut LaserEmitter, &Position)>() {
        if let Some((enemy_entity, enemy_pos)) = nearest_living(&enemies, pos, laser.range) {
            table.beams.push((tower_entity, enemy_entity));
            let desired = pos.heading_to(&enemy_pos);
            laser.aim_angle += wrap_angle(desired - laser.aim_angle) * laser.aim_rate;
        }
    }

    for (tower_entity, (coil, pos)) in world.query_mut::<(&TeslaCoil, &Position)>() {
        let chain = build_chain(&enemies, pos, coil);
        if !chain.is_empty() {
            table.chains.push((tower_entity, chain));
        }
    }

    table
}

/// Nearest enemy strictly within range, regardless of remaining hit points.
fn nearest_any(
    enemies: &[(Entity, Position, f64)],
    from: &Position,
    range: f64,
) -> Option<(Entity, Position)> {
    let mut best: Option<(Entity, Position)> = None;
    let mut best_dist = range;
    for &(entity, pos, _hp) in enemies {
        let dist = from.distance_to(&pos);
        if dist < best_dist {
            best = Some((entity, pos));
            best_dist = dist;
        }
    }
    best
}

/// Nearest enemy strictly within range that is still above zero hit points.
fn nearest_living(
    enemies: &[(Entity, Position, f64)],
    from: &Position,
    range: f64,
) -> Option<(Entity, Position)> {
    let mut best: Option<(Entity, Position)> = None;
    let mut best_dist = range;
    for &(entity, pos, hp) in enemies {
        if hp <= 0.0 {
            continue;
        }
        let dist = from.distance_to(&pos);
        if dist < best_dist {
            best = Some((entity, pos));
            best_dist = dist;
        }
    }
    best
}

/// Living enemy in range with the most hit points left.
fn toughest_living(
    enemies: &[(Entity, Position, f64)],
    from: &Position,
    range: f64,
) -> Option<(Entity, Position)> {
    let mut best: Option<(Entity, Position)> = None;
    let mut best_hp = 0.0;
    for &(entity, pos, hp) in enemies {
        if hp <= 0.0 {
            continue;
        }
        if from.distance_to(&pos) < range && hp > best_hp {
            best = Some((entity, pos));
            best_hp = hp;
        }
    }
    best
}

/// Build an arc chain: nearest living primary, then repeatedly the nearest
/// not-yet-chained living enemy within chain range of the last link.
fn build_chain(
    enemies: &[(Entity, Position, f64)],
    from: &Position,
    coil: &TeslaCoil,
) -> Vec<Entity> {
    let mut chain: Vec<Entity> = Vec::new();
    let (primary, mut last_pos) = match nearest_living(enemies, from, coil.range) {
        Some(found) => found,
        None => return chain,
    };
    chain.push(primary);

    while chain.len() < coil.chain_count {
        let mut next: Option<(Entity, Position)> = None;
        let mut best_dist = coil.chain_range;
        for &(entity, pos, hp) in enemies {
            if hp <= 0.0 || chain.contains(&entity) {
                continue;
            }
            let dist = last_pos.distance_to(&pos);
            if dist < best_dist {
                next = Some((entity, pos));
                best_dist = dist;
            }
        }
        match next {
            Some((entity, pos)) => {
                chain.push(entity);
                last_pos = pos;
            }
            None => break,
        }
    }
    chain
}
