//! Snapshot system: queries the ECS world and builds a complete
//! `GameSnapshot` for the frontend.
//!
//! This system is read-only. It never modifies the world, and every view
//! list is sorted by stable id so two identical sessions serialize to
//! identical JSON.

use hecs::World;

use planetfall_core::components::{
    Cannon, CapitalShip, Enemy, HomingGuidance, LaserEmitter, Projectile, ShieldDome, TeslaCoil,
    Tower,
};
use planetfall_core::constants::BASE_MAX_HP;
use planetfall_core::enums::{GamePhase, ShieldPhase, TowerVariant};
use planetfall_core::events::FxEvent;
use planetfall_core::state::{
    BeamView, BuildOption, CapitalShipView, EnemyView, GameSnapshot, HudView, ProjectileView,
    ShieldView, TowerView,
};
use planetfall_core::types::{Position, SimTime, Velocity};

use crate::state::{tower_cost, GameState};

/// Build a complete snapshot of the current frame.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    state: &GameState,
    fx_events: Vec<FxEvent>,
) -> GameSnapshot {
    GameSnapshot {
        time: *time,
        phase,
        hud: build_hud(state),
        enemies: build_enemies(world),
        towers: build_towers(world),
        projectiles: build_projectiles(world),
        capital_ships: build_capital_ships(world),
        fx_events,
    }
}

fn build_hud(state: &GameState) -> HudView {
    let build_menu = TowerVariant::ALL
        .iter()
        .map(|&variant| {
            let cost = tower_cost(variant);
            BuildOption {
                variant,
                cost,
                affordable: state.can_afford(cost),
            }
        })
        .collect();

    HudView {
        wave: state.wave,
        credits: state.credits,
        base_hp_percent: (state.base_hp.max(0) * 100 / BASE_MAX_HP) as u32,
        approach: state.approach,
        selected_tower: state.selected_tower,
        kills: state.kills,
        build_menu,
    }
}

fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut views: Vec<EnemyView> = world
        .query::<(&Enemy, &Position)>()
        .iter()
        .map(|(_entity, (enemy, pos))| EnemyView {
            id: enemy.id,
            position: *pos,
            heading: enemy.heading,
            variant: enemy.variant,
            hp_ratio: (enemy.hp / enemy.max_hp).max(0.0),
            size: enemy.size,
            slowed: enemy.slow_factor < 1.0,
        })
        .collect();
    views.sort_by_key(|view| view.id);
    views
}

fn build_towers(world: &World) -> Vec<TowerView> {
    let mut views: Vec<TowerView> = world
        .query::<(
            &Tower,
            &Position,
            Option<&Cannon>,
            Option<&LaserEmitter>,
            Option<&ShieldDome>,
            Option<&TeslaCoil>,
        )>()
        .iter()
        .map(|(_entity, (tower, pos, cannon, laser, dome, coil))| {
            let aim_angle = match (cannon, laser) {
                (Some(cannon), _) => cannon.aim_angle,
                (None, Some(laser)) => laser.aim_angle,
                (None, None) => 0.0,
            };
            TowerView {
                id: tower.id,
                position: *pos,
                variant: tower.variant,
                aim_angle,
                beam: laser.and_then(|laser| {
                    laser.beam_target.map(|target| BeamView {
                        target,
                        intensity: laser.beam_intensity,
                    })
                }),
                shield: dome.map(|dome| ShieldView {
                    radius: dome.radius,
                    hp_ratio: (dome.hp / dome.max_hp).max(0.0),
                    active: dome.phase == ShieldPhase::Active,
                }),
                chain: coil.map(|coil| coil.arc.clone()).unwrap_or_default(),
            }
        })
        .collect();
    views.sort_by_key(|view| view.id);
    views
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut views: Vec<ProjectileView> = world
        .query::<(&Projectile, &Position, &Velocity, Option<&HomingGuidance>)>()
        .iter()
        .map(|(_entity, (shell, pos, vel, guidance))| ProjectileView {
            id: shell.id,
            position: *pos,
            heading: vel.heading(),
            size: shell.size,
            homing: guidance.is_some(),
        })
        .collect();
    views.sort_by_key(|view| view.id);
    views
}

fn build_capital_ships(world: &World) -> Vec<CapitalShipView> {
    let mut views: Vec<CapitalShipView> = world
        .query::<(&CapitalShip, &Position, &Velocity)>()
        .iter()
        .map(|(_entity, (ship, pos, vel))| CapitalShipView {
            id: ship.id,
            position: *pos,
            drift: vel.x,
            length: ship.length,
            depth: ship.depth,
        })
        .collect();
    views.sort_by_key(|view| view.id);
    views
}
