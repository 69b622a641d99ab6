//! Tests for the simulation engine, wave direction, tower combat, and the
//! projectile pipeline.

use planetfall_core::commands::PlayerCommand;
use planetfall_core::components::{CapitalShip, Enemy};
use planetfall_core::enums::{EnemyVariant, GamePhase, TowerVariant};
use planetfall_core::events::FxEvent;
use planetfall_core::types::{Position, Velocity};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::engine::{GameEngine, SimConfig};
use crate::state::GameState;
use crate::systems::{movement, wave_director};
use crate::world_setup;

/// Running engine with the wave queue drained, so scripted entities are
/// alone on the field and the wave never advances under a test.
fn isolated_engine() -> GameEngine {
    let mut engine = GameEngine::new(SimConfig::default());
    engine.start_game();
    engine.state_mut().enemies_to_spawn = 0;
    engine
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = GameEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });
    let mut engine_b = GameEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });

    engine_a.queue_command(PlayerCommand::StartGame);
    engine_b.queue_command(PlayerCommand::StartGame);

    for _ in 0..300 {
        let snap_a = engine_a.update(16.0);
        let snap_b = engine_b.update(16.0);

        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = GameEngine::new(SimConfig {
        seed: 111,
        ..Default::default()
    });
    let mut engine_b = GameEngine::new(SimConfig {
        seed: 222,
        ..Default::default()
    });

    engine_a.queue_command(PlayerCommand::StartGame);
    engine_b.queue_command(PlayerCommand::StartGame);

    // Capital ship rolls and spawn geometry draw from the seeded stream, so
    // the sessions diverge within the first wave.
    let mut diverged = false;
    for _ in 0..500 {
        let snap_a = engine_a.update(16.0);
        let snap_b = engine_b.update(16.0);
        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        if json_a != json_b {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "Different seeds should produce divergent output");
}

// ---- Lifecycle & clock ----

#[test]
fn test_idle_engine_stays_frozen() {
    let mut engine = GameEngine::new(SimConfig::default());

    for _ in 0..10 {
        let snap = engine.update(16.0);
        assert_eq!(snap.phase, GamePhase::Idle);
        assert!(snap.enemies.is_empty());
        assert!(snap.fx_events.is_empty());
    }

    assert_eq!(engine.time().frame, 0, "Clock should not run before start");
    assert_eq!(engine.state().credits, 120);
    assert_eq!(engine.state().wave, 1);
}

#[test]
fn test_start_game_begins_wave_one() {
    let mut engine = GameEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::StartGame);
    let snap = engine.update(16.0);

    assert_eq!(snap.phase, GamePhase::Running);
    assert_eq!(snap.hud.wave, 1);
    assert_eq!(engine.time().frame, 1);

    // Wave 1 queue: 8 + 1 * 5 + floor(0 * 15) = 13.
    assert_eq!(engine.state().enemies_to_spawn, 13);

    let announced = snap.fx_events.iter().any(|event| {
        matches!(event, FxEvent::WaveStarted { wave: 1, shake } if (shake - 1.0).abs() < 1e-9)
    });
    assert!(announced, "First frame should carry the wave announcement");
}

#[test]
fn test_variable_frame_clock() {
    let mut engine = GameEngine::new(SimConfig::default());
    engine.start_game();

    engine.update(16.0);
    engine.update(33.5);
    engine.update(7.0);

    assert_eq!(engine.time().frame, 3);
    assert!(
        (engine.time().elapsed_ms - 56.5).abs() < 1e-9,
        "Frames accumulate real elapsed time, got {}",
        engine.time().elapsed_ms
    );
}

#[test]
fn test_negative_elapsed_is_empty_frame() {
    let mut engine = GameEngine::new(SimConfig::default());
    engine.start_game();

    engine.update(-50.0);

    assert_eq!(engine.time().frame, 1);
    assert_eq!(engine.time().elapsed_ms, 0.0);
    assert_eq!(engine.state().approach, 0.0);
    assert_eq!(engine.state().spawn_timer_ms, 0.0);
}

#[test]
fn test_restart_clears_field() {
    let mut engine = GameEngine::new(SimConfig::default());
    engine.start_game();
    for _ in 0..200 {
        engine.update(16.0);
    }
    assert!(
        engine.state().enemies_to_spawn < 13,
        "Wave should have released spawns before the restart"
    );

    engine.restart();
    let snap = engine.update(16.0);

    assert_eq!(snap.phase, GamePhase::Running);
    assert_eq!(snap.hud.wave, 1);
    assert_eq!(snap.hud.credits, 120);
    assert_eq!(snap.hud.kills, 0);
    assert!(snap.enemies.is_empty(), "Restart should clear the field");
    assert_eq!(engine.time().frame, 1, "Restart should reset the clock");
    assert_eq!(engine.state().enemies_to_spawn, 13);
}

// ---- Approach progression ----

#[test]
fn test_approach_progression_and_cap() {
    let mut engine = GameEngine::new(SimConfig::default());
    engine.start_game();

    for _ in 0..100 {
        engine.update(16.0);
    }
    // Wave 1 rate: (0.00006 + 0.00003) per reference frame.
    let expected = 100.0 * 0.00009;
    assert!(
        (engine.state().approach - expected).abs() < 1e-9,
        "Approach after 100 frames should be {expected}, got {}",
        engine.state().approach
    );

    let before = engine.state().approach;
    engine.update(16.0);
    assert!(engine.state().approach > before, "Approach is monotone");

    engine.state_mut().approach = 0.9499;
    for _ in 0..50 {
        engine.update(16.0);
    }
    assert!(
        (engine.state().approach - 0.95).abs() < 1e-12,
        "Approach should cap at 0.95, got {}",
        engine.state().approach
    );
}

// ---- Waves & spawning ----

#[test]
fn test_spawn_interval_formula() {
    assert!((wave_director::spawn_interval_ms(1, 0.0) - 670.0).abs() < 1e-9);
    // Wave reduction caps at 450 ms.
    assert!((wave_director::spawn_interval_ms(15, 0.0) - 250.0).abs() < 1e-9);
    assert!((wave_director::spawn_interval_ms(1, 0.95) - 351.75).abs() < 1e-9);
    // Floor at 150 ms no matter how hot the field runs.
    assert!((wave_director::spawn_interval_ms(50, 0.95) - 150.0).abs() < 1e-9);
}

#[test]
fn test_first_spawn_frame_wave_one() {
    let mut engine = GameEngine::new(SimConfig::default());
    engine.start_game();

    // At 16 ms frames the timer first exceeds the ~670 ms wave 1 interval
    // on frame 42, independent of seed.
    let mut first_spawn_frame = None;
    for frame in 1..=100u64 {
        let snap = engine.update(16.0);
        if snap
            .fx_events
            .iter()
            .any(|event| matches!(event, FxEvent::EnemySpawned { .. }))
        {
            first_spawn_frame = Some(frame);
            break;
        }
    }
    assert_eq!(first_spawn_frame, Some(42));
}

#[test]
fn test_one_spawn_release_per_frame() {
    let mut engine = GameEngine::new(SimConfig::default());
    engine.start_game();

    // A single long frame releases at most one spawn event no matter how
    // much time passed.
    let snap = engine.update(5000.0);
    let spawned = snap
        .fx_events
        .iter()
        .filter(|event| matches!(event, FxEvent::EnemySpawned { .. }))
        .count();
    assert_eq!(spawned, 1);
    assert_eq!(engine.state().enemies_to_spawn, 12);
}

#[test]
fn test_wave_one_spawns_all_standard() {
    let mut engine = GameEngine::new(SimConfig::default());
    engine.start_game();

    let mut spawned: Vec<EnemyVariant> = Vec::new();
    for _ in 0..600 {
        let snap = engine.update(16.0);
        for event in &snap.fx_events {
            if let FxEvent::EnemySpawned { variant, .. } = event {
                spawned.push(*variant);
            }
        }
    }

    assert_eq!(spawned.len(), 13, "Wave 1 should release its whole queue");
    assert!(
        spawned.iter().all(|v| *v == EnemyVariant::Standard),
        "Tank, swarm, and splitter rolls are locked until later waves"
    );
    assert_eq!(engine.state().enemies_to_spawn, 0);
}

#[test]
fn test_wave_advance_after_field_clear() {
    let mut engine = GameEngine::new(SimConfig::default());
    engine.start_game();

    // A picket line of turrets that clears wave 1 without a breach.
    for i in 0..6 {
        engine.place_tower_for_test(
            TowerVariant::Turret,
            Position::new(140.0 + i as f64 * 200.0, 550.0),
        );
    }

    let mut advanced = false;
    for _ in 0..1500 {
        let snap = engine.update(16.0);
        if snap
            .fx_events
            .iter()
            .any(|event| matches!(event, FxEvent::WaveStarted { wave: 2, .. }))
        {
            assert_eq!(snap.hud.base_hp_percent, 100, "No enemy should breach");
            assert!(
                !snap.capital_ships.is_empty(),
                "Even waves always roll a capital ship"
            );
            advanced = true;
            break;
        }
    }

    assert!(advanced, "Wave 2 should start once the field is cleared");
    assert_eq!(engine.state().wave, 2);
    assert_eq!(engine.state().kills, 13);
    // 13 standard kills at 15 credits each, nothing spent.
    assert_eq!(engine.state().credits, 120 + 13 * 15);
}

// ---- Base damage & game over ----

#[test]
fn test_unchecked_breaches_destroy_base() {
    let mut engine = GameEngine::new(SimConfig::default());
    engine.start_game();

    let mut breaches = 0;
    let mut saw_game_over = false;
    for _ in 0..2000 {
        let snap = engine.update(16.0);
        breaches += snap
            .fx_events
            .iter()
            .filter(|event| matches!(event, FxEvent::BaseHit { .. }))
            .count();
        if snap
            .fx_events
            .iter()
            .any(|event| matches!(event, FxEvent::GameOver { .. }))
        {
            assert_eq!(snap.phase, GamePhase::GameOver);
            assert_eq!(snap.hud.base_hp_percent, 0);
            saw_game_over = true;
            break;
        }
    }

    assert!(saw_game_over, "An undefended base falls within wave 1");
    assert!(breaches >= 10, "Ten breaches drain 100 base health");
    // Breaches pay no reward and count no kill.
    assert_eq!(engine.state().kills, 0);
    assert_eq!(engine.state().credits, 120);

    // The terminal field is frozen: identical snapshots, no clock.
    let frozen_frame = engine.time().frame;
    let json_a = serde_json::to_string(&engine.update(16.0)).unwrap();
    let json_b = serde_json::to_string(&engine.update(16.0)).unwrap();
    assert_eq!(json_a, json_b);
    assert_eq!(engine.time().frame, frozen_frame);
}

#[test]
fn test_game_over_ignores_placement_until_restart() {
    let mut engine = GameEngine::new(SimConfig::default());
    engine.start_game();
    for _ in 0..2000 {
        engine.update(16.0);
        if engine.phase() == GamePhase::GameOver {
            break;
        }
    }
    assert_eq!(engine.phase(), GamePhase::GameOver);

    engine.queue_command(PlayerCommand::PlaceTower { x: 640.0, y: 600.0 });
    let snap = engine.update(16.0);
    assert!(snap.towers.is_empty(), "Placement is dead after game over");
    assert_eq!(snap.hud.credits, 120);

    engine.queue_command(PlayerCommand::StartGame);
    let snap = engine.update(16.0);
    assert_eq!(snap.phase, GamePhase::Running);
    assert_eq!(snap.hud.wave, 1);
    assert!(snap.enemies.is_empty());
    assert_eq!(snap.hud.kills, 0);
}

// ---- Placement & economy ----

#[test]
fn test_select_and_place_tower() {
    let mut engine = GameEngine::new(SimConfig::default());
    engine.start_game();

    engine.queue_command(PlayerCommand::SelectTower {
        variant: TowerVariant::Laser,
    });
    engine.queue_command(PlayerCommand::PlaceTower { x: 400.0, y: 500.0 });
    let snap = engine.update(16.0);

    assert_eq!(snap.hud.selected_tower, TowerVariant::Laser);
    assert_eq!(snap.towers.len(), 1);
    assert_eq!(snap.towers[0].variant, TowerVariant::Laser);
    assert_eq!(snap.hud.credits, 120 - 75);
    assert!(snap
        .fx_events
        .iter()
        .any(|event| matches!(event, FxEvent::TowerPlaced { .. })));

    // Build menu lists every variant in order with live affordability.
    let costs: Vec<u32> = snap.hud.build_menu.iter().map(|o| o.cost).collect();
    assert_eq!(costs, vec![50, 75, 100, 125, 150]);
    assert!(
        snap.hud.build_menu.iter().all(|o| !o.affordable),
        "45 credits affords nothing"
    );
}

#[test]
fn test_placement_rejected_without_credits() {
    let mut engine = GameEngine::new(SimConfig::default());
    engine.start_game();

    engine.queue_command(PlayerCommand::PlaceTower { x: 100.0, y: 100.0 });
    engine.queue_command(PlayerCommand::PlaceTower { x: 300.0, y: 100.0 });
    engine.queue_command(PlayerCommand::PlaceTower { x: 500.0, y: 100.0 });
    let snap = engine.update(16.0);

    // Two turrets at 50 fit in 120; the third is silently dropped.
    assert_eq!(snap.towers.len(), 2);
    assert_eq!(snap.hud.credits, 20);
}

#[test]
fn test_placement_clearance() {
    let mut engine = GameEngine::new(SimConfig::default());
    engine.start_game();

    engine.queue_command(PlayerCommand::PlaceTower { x: 400.0, y: 400.0 });
    // 20 units away: inside the 30 unit clearance ring.
    engine.queue_command(PlayerCommand::PlaceTower { x: 420.0, y: 400.0 });
    // 31 units away: clear.
    engine.queue_command(PlayerCommand::PlaceTower { x: 431.0, y: 400.0 });
    let snap = engine.update(16.0);

    assert_eq!(snap.towers.len(), 2);
    assert_eq!(snap.hud.credits, 20, "Only two placements should be paid");
}

#[test]
fn test_placement_needs_running_phase() {
    let mut engine = GameEngine::new(SimConfig::default());

    engine.queue_command(PlayerCommand::SelectTower {
        variant: TowerVariant::Tesla,
    });
    engine.queue_command(PlayerCommand::PlaceTower { x: 640.0, y: 360.0 });
    let snap = engine.update(16.0);

    // Selection sticks even before the game starts; placement does not.
    assert_eq!(snap.hud.selected_tower, TowerVariant::Tesla);
    assert!(snap.towers.is_empty());
    assert_eq!(snap.hud.credits, 120);
}

// ---- Targeting & cannon fire ----

#[test]
fn test_turret_targets_nearest() {
    let mut engine = isolated_engine();
    engine.place_tower_for_test(TowerVariant::Turret, Position::new(640.0, 600.0));
    engine.spawn_enemy_for_test(
        EnemyVariant::Standard,
        Position::new(700.0, 500.0),
        Position::new(700.0, 900.0),
    );
    engine.spawn_enemy_for_test(
        EnemyVariant::Standard,
        Position::new(500.0, 500.0),
        Position::new(500.0, 900.0),
    );

    let snap = engine.update(16.0);

    assert_eq!(snap.projectiles.len(), 1, "Turret fires on frame one");
    // The nearer enemy sits to the tower's right, so the shell heads +x.
    assert!(
        snap.projectiles[0].heading.cos() > 0.0,
        "Shell should fly toward the nearer target"
    );
    // Barrel slews a fraction of the way toward the firing solution.
    let aim = snap.towers[0].aim_angle;
    assert!(aim < -0.1 && aim > -0.2, "Aim smoothing step, got {aim}");
}

#[test]
fn test_turret_fires_at_fresh_corpse() {
    let mut engine = isolated_engine();
    engine.place_tower_for_test(TowerVariant::Turret, Position::new(640.0, 600.0));
    let target = engine.spawn_enemy_for_test(
        EnemyVariant::Standard,
        Position::new(700.0, 500.0),
        Position::new(700.0, 900.0),
    );
    engine.spawn_enemy_for_test(
        EnemyVariant::Standard,
        Position::new(100.0, 50.0),
        Position::new(100.0, 900.0),
    );
    engine.set_enemy_hp(target, 0.0);

    // Turret scans skip no corpses, so the frame that sweeps the kill
    // still spends a shell on it.
    let snap = engine.update(16.0);
    assert_eq!(snap.projectiles.len(), 1);
    assert_eq!(engine.state().kills, 1);
    assert_eq!(engine.state().credits, 120 + 15, "Corpse pays exactly once");

    let snap = engine.update(16.0);
    assert_eq!(snap.projectiles.len(), 1, "No target left, no second shell");
}

#[test]
fn test_missile_prefers_toughest() {
    let mut engine = isolated_engine();
    engine.place_tower_for_test(TowerVariant::Missile, Position::new(640.0, 600.0));
    // Nearer standard to the right, tougher tank to the left.
    engine.spawn_enemy_for_test(
        EnemyVariant::Standard,
        Position::new(700.0, 500.0),
        Position::new(700.0, 900.0),
    );
    engine.spawn_enemy_for_test(
        EnemyVariant::Tank,
        Position::new(500.0, 480.0),
        Position::new(500.0, 900.0),
    );

    let snap = engine.update(16.0);

    assert_eq!(snap.projectiles.len(), 1);
    assert!(snap.projectiles[0].homing);
    assert!(
        snap.projectiles[0].heading.cos() < 0.0,
        "Shell should chase the tougher target, not the nearer one"
    );

    let snap = engine.update(16.0);
    assert_eq!(snap.projectiles.len(), 1, "Launcher is still on cooldown");
}

// ---- Lasers ----

#[test]
fn test_laser_ramp_and_lock() {
    let mut engine = isolated_engine();
    engine.place_tower_for_test(TowerVariant::Laser, Position::new(640.0, 600.0));
    engine.spawn_enemy_for_test(
        EnemyVariant::Standard,
        Position::new(640.0, 450.0),
        Position::new(640.0, 900.0),
    );

    let snap = engine.update(16.0);
    let beam = snap.towers[0].beam.as_ref().unwrap();
    assert!(
        (beam.intensity - 0.048).abs() < 1e-12,
        "One 16 ms frame of ramp, got {}",
        beam.intensity
    );
    assert!(snap.enemies[0].hp_ratio < 1.0, "Beam damage lands frame one");
    assert!(snap.enemies[0].hp_ratio > 0.99, "Cold beam barely burns");

    for _ in 0..30 {
        engine.update(16.0);
    }
    let snap = engine.update(16.0);
    let beam = snap.towers[0].beam.as_ref().unwrap();
    assert!(
        (beam.intensity - 1.0).abs() < 1e-12,
        "Ramp should saturate at full intensity"
    );
}

#[test]
fn test_laser_drops_dead_lock_and_pays_once() {
    let mut engine = isolated_engine();
    engine.place_tower_for_test(TowerVariant::Laser, Position::new(640.0, 600.0));
    let target = engine.spawn_enemy_for_test(
        EnemyVariant::Standard,
        Position::new(640.0, 450.0),
        Position::new(640.0, 900.0),
    );
    engine.spawn_enemy_for_test(
        EnemyVariant::Standard,
        Position::new(100.0, 50.0),
        Position::new(100.0, 900.0),
    );

    engine.update(16.0);
    engine.set_enemy_hp(target, 0.0);
    let snap = engine.update(16.0);

    assert!(
        snap.towers[0].beam.is_none(),
        "A dead target never holds a beam lock"
    );
    assert_eq!(engine.state().kills, 1);
    assert_eq!(engine.state().credits, 120 + 15);
    assert_eq!(snap.enemies.len(), 1, "Only the distant enemy remains");
}

// ---- Tesla ----

#[test]
fn test_tesla_chain_structure() {
    let mut engine = isolated_engine();
    engine.place_tower_for_test(TowerVariant::Tesla, Position::new(640.0, 600.0));
    // A ladder of enemies 120 apart: links reach, but only four fit.
    for i in 0..5 {
        let y = 500.0 - i as f64 * 120.0;
        engine.spawn_enemy_for_test(
            EnemyVariant::Standard,
            Position::new(640.0, y),
            Position::new(640.0, 900.0),
        );
    }

    let snap = engine.update(16.0);

    assert_eq!(snap.towers[0].chain.len(), 4, "Arc carries four links");
    // The chain walks the ladder upward from the closest rung.
    for (i, point) in snap.towers[0].chain.iter().enumerate() {
        let expected_y = 500.0 - i as f64 * 120.0;
        assert!(
            (point.y - expected_y).abs() < 5.0,
            "Link {i} should sit near y {expected_y}, got {}",
            point.y
        );
    }
    for (i, enemy) in snap.enemies.iter().enumerate() {
        if i < 4 {
            assert!(enemy.hp_ratio < 1.0, "Chained enemy {i} takes arc damage");
        } else {
            assert!(
                (enemy.hp_ratio - 1.0).abs() < 1e-12,
                "The rung past the chain limit is untouched"
            );
        }
    }
}

// ---- Shields ----

#[test]
fn test_shield_slows_and_burns_intruders() {
    let mut engine = isolated_engine();
    engine.place_tower_for_test(TowerVariant::Shield, Position::new(640.0, 600.0));
    engine.spawn_enemy_for_test(
        EnemyVariant::Standard,
        Position::new(640.0, 520.0),
        Position::new(640.0, 900.0),
    );

    let snap1 = engine.update(16.0);
    assert!(snap1.enemies[0].slowed, "Dome stamps the slow on contact");
    assert!(snap1.enemies[0].hp_ratio < 1.0, "Dome burn lands");
    let shield = snap1.towers[0].shield.as_ref().unwrap();
    assert!(shield.active);
    assert!(shield.hp_ratio < 1.0, "Strain drains the dome");

    let snap2 = engine.update(16.0);

    // The slow is consumed one frame after it is stamped: full descent
    // speed on frame 1, 35% of it on frame 2.
    let y0 = 520.0;
    let delta1 = snap1.enemies[0].position.y - y0;
    let delta2 = snap2.enemies[0].position.y - snap1.enemies[0].position.y;
    assert!(
        (delta2 / delta1 - 0.35).abs() < 1e-9,
        "Slowed descent should run at 35%, got ratio {}",
        delta2 / delta1
    );
}

#[test]
fn test_shield_collapse_and_recharge() {
    let mut engine = isolated_engine();
    engine.place_tower_for_test(TowerVariant::Shield, Position::new(640.0, 600.0));
    // Enough tanks inside the dome to out-strain it in a single 250 ms
    // frame: 35 * 0.3 * (250 / 16) > 150.
    for i in 0..35 {
        engine.spawn_enemy_for_test(
            EnemyVariant::Tank,
            Position::new(606.0 + i as f64 * 2.0, 500.0),
            Position::new(606.0 + i as f64 * 2.0, 900.0),
        );
    }

    let snap = engine.update(250.0);
    assert!(snap
        .fx_events
        .iter()
        .any(|event| matches!(event, FxEvent::ShieldDown { .. })));
    let shield = snap.towers[0].shield.as_ref().unwrap();
    assert!(!shield.active);
    assert_eq!(shield.hp_ratio, 0.0);
    assert!(snap.enemies.iter().all(|e| e.slowed), "Stamped pre-collapse");

    // Frame 2: the dome is down, nobody gets slowed or burned.
    let snap = engine.update(250.0);
    assert!(snap.enemies.iter().all(|e| !e.slowed));

    // 4000 ms recharge at 250 ms frames: back up on the 16th frame after.
    let mut restored = false;
    for _ in 0..20 {
        let snap = engine.update(250.0);
        if snap
            .fx_events
            .iter()
            .any(|event| matches!(event, FxEvent::ShieldRestored { .. }))
        {
            let shield = snap.towers[0].shield.as_ref().unwrap();
            assert!(shield.active);
            assert!(
                (shield.hp_ratio - 0.5).abs() < 1e-12,
                "Dome reactivates at half strength"
            );
            assert_eq!(snap.hud.base_hp_percent, 100, "No breach during test");
            restored = true;
            break;
        }
    }
    assert!(restored, "Dome should come back after its recharge window");
}

// ---- Projectiles ----

#[test]
fn test_shell_kill_pays_reward() {
    let mut engine = isolated_engine();
    engine.queue_command(PlayerCommand::PlaceTower { x: 640.0, y: 600.0 });
    engine.spawn_enemy_for_test(
        EnemyVariant::Standard,
        Position::new(640.0, 500.0),
        Position::new(640.0, 900.0),
    );
    engine.spawn_enemy_for_test(
        EnemyVariant::Standard,
        Position::new(100.0, 50.0),
        Position::new(100.0, 900.0),
    );

    for _ in 0..10 {
        engine.update(16.0);
    }
    let snap = engine.update(16.0);
    // One 15 damage shell has landed on the 30 hp enemy.
    assert!(
        (snap.enemies[0].hp_ratio - 0.5).abs() < 1e-9,
        "First hit should halve the target, got {}",
        snap.enemies[0].hp_ratio
    );
    assert!(snap.projectiles.is_empty(), "Shell is consumed on impact");

    let mut destroyed = false;
    for _ in 0..30 {
        let snap = engine.update(16.0);
        if snap.fx_events.iter().any(|event| {
            matches!(
                event,
                FxEvent::EnemyDestroyed {
                    variant: EnemyVariant::Standard,
                    reward: 15,
                    ..
                }
            )
        }) {
            destroyed = true;
            break;
        }
    }
    assert!(destroyed, "Second shell should finish the target");
    assert_eq!(engine.state().kills, 1);
    // 120 opening, 50 spent on the turret, one 15 credit bounty.
    assert_eq!(engine.state().credits, 85);
    assert_eq!(engine.update(16.0).enemies.len(), 1);
}

#[test]
fn test_splash_spares_primary_and_far() {
    let mut engine = isolated_engine();
    engine.place_tower_for_test(TowerVariant::Missile, Position::new(640.0, 600.0));
    // Tank draws the lock; the standard beside it eats splash; the far one
    // is outside the blast radius.
    engine.spawn_enemy_for_test(
        EnemyVariant::Tank,
        Position::new(640.0, 450.0),
        Position::new(640.0, 900.0),
    );
    engine.spawn_enemy_for_test(
        EnemyVariant::Standard,
        Position::new(680.0, 440.0),
        Position::new(680.0, 900.0),
    );
    engine.spawn_enemy_for_test(
        EnemyVariant::Standard,
        Position::new(400.0, 300.0),
        Position::new(400.0, 900.0),
    );

    let mut detonated = false;
    for _ in 0..60 {
        let snap = engine.update(16.0);
        if snap
            .fx_events
            .iter()
            .any(|event| matches!(event, FxEvent::SplashDetonation { .. }))
        {
            // Direct hit only: 85 - 45. Splash would have left 17.
            assert!(
                (snap.enemies[0].hp_ratio - 40.0 / 85.0).abs() < 1e-9,
                "Primary takes the warhead, never its own splash"
            );
            // Bystander: 30 - round(45 / 2) = 7.
            assert!(
                (snap.enemies[1].hp_ratio - 7.0 / 30.0).abs() < 1e-9,
                "Neighbor takes rounded half damage"
            );
            assert!(
                (snap.enemies[2].hp_ratio - 1.0).abs() < 1e-12,
                "Outside the blast radius nothing lands"
            );
            detonated = true;
            break;
        }
    }
    assert!(detonated, "Homing shell should reach the tank");
}

#[test]
fn test_homing_contact_with_bystander() {
    let mut engine = isolated_engine();
    engine.place_tower_for_test(TowerVariant::Missile, Position::new(640.0, 600.0));
    // Lock goes to the tank at the top; a standard sits in the flight path.
    engine.spawn_enemy_for_test(
        EnemyVariant::Tank,
        Position::new(640.0, 300.0),
        Position::new(640.0, 900.0),
    );
    engine.spawn_enemy_for_test(
        EnemyVariant::Standard,
        Position::new(640.0, 480.0),
        Position::new(640.0, 900.0),
    );

    let mut blocker_died = false;
    for _ in 0..40 {
        let snap = engine.update(16.0);
        if let Some(FxEvent::EnemyDestroyed { variant, reward, .. }) = snap
            .fx_events
            .iter()
            .find(|event| matches!(event, FxEvent::EnemyDestroyed { .. }))
        {
            assert_eq!(*variant, EnemyVariant::Standard);
            assert_eq!(*reward, 15);
            assert!(
                (snap.enemies[0].hp_ratio - 1.0).abs() < 1e-12,
                "The locked tank is untouched; contact beats guidance"
            );
            assert!(snap.projectiles.is_empty());
            blocker_died = true;
            break;
        }
    }
    assert!(blocker_died, "Shell should detonate on whatever it touches");
}

#[test]
fn test_no_bottom_cull_and_ttl_expiry() {
    let mut engine = isolated_engine();
    engine.place_tower_for_test(TowerVariant::Missile, Position::new(640.0, 140.0));
    // Target breaches almost immediately, leaving the shell chasing a
    // ghost toward the bottom of the field.
    engine.spawn_enemy_for_test(
        EnemyVariant::Tank,
        Position::new(640.0, 665.0),
        Position::new(640.0, 900.0),
    );
    engine.spawn_enemy_for_test(
        EnemyVariant::Standard,
        Position::new(60.0, 30.0),
        Position::new(60.0, 900.0),
    );

    let mut breached = false;
    for _ in 0..99 {
        let snap = engine.update(16.0);
        if snap
            .fx_events
            .iter()
            .any(|event| matches!(event, FxEvent::BaseHit { .. }))
        {
            breached = true;
        }
    }
    assert!(breached, "Tank should reach the base line");

    // 99 frames in: the shell is far below the field and still alive,
    // because only the top and side margins cull.
    let snap = engine.update(16.0);
    assert_eq!(snap.projectiles.len(), 1);
    assert!(snap.projectiles[0].position.y > 720.0);

    // The 3000 ms clock runs out by frame 188.
    for _ in 0..90 {
        engine.update(16.0);
    }
    let snap = engine.update(16.0);
    assert!(snap.projectiles.is_empty(), "Shell expires on its clock");
}

// ---- Splitters ----

#[test]
fn test_splitter_brood_released_on_kill() {
    let mut engine = isolated_engine();
    let splitter = engine.spawn_enemy_for_test(
        EnemyVariant::Splitter,
        Position::new(640.0, 500.0),
        Position::new(640.0, 900.0),
    );
    engine.spawn_enemy_for_test(
        EnemyVariant::Standard,
        Position::new(100.0, 50.0),
        Position::new(100.0, 900.0),
    );
    engine.set_enemy_hp(splitter, 0.0);

    let snap = engine.update(16.0);

    let burst = snap
        .fx_events
        .iter()
        .find_map(|event| match event {
            FxEvent::SplitterBurst { position } => Some(*position),
            _ => None,
        })
        .unwrap();
    let destroyed = snap
        .fx_events
        .iter()
        .filter(|event| matches!(event, FxEvent::EnemyDestroyed { .. }))
        .count();
    assert_eq!(destroyed, 1, "Only the splitter itself died");

    // Sentinel plus three swarm offspring scattered around the burst.
    assert_eq!(snap.enemies.len(), 4);
    let swarm: Vec<_> = snap
        .enemies
        .iter()
        .filter(|e| e.variant == EnemyVariant::Swarm)
        .collect();
    assert_eq!(swarm.len(), 3);
    for child in &swarm {
        assert!((child.position.x - burst.x).abs() <= 15.0 + 1e-9);
        assert!((child.position.y - burst.y).abs() <= 15.0 + 1e-9);
    }
    assert_eq!(engine.state().kills, 1);
    assert_eq!(engine.state().credits, 120 + 20);
}

// ---- Capital ships ----

#[test]
fn test_wave_start_capital_ship_rolls() {
    // Even waves skip the roll entirely and always field a ship.
    for seed in 0..10 {
        let mut world = hecs::World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut state = GameState::new(1280.0, 720.0, 120);
        state.wave = 2;
        state.approach = 0.6;
        let mut next_id = 0u32;
        let mut fx = Vec::new();

        wave_director::start_wave(&mut world, &mut rng, &mut state, &mut next_id, &mut fx);

        // 8 + 2 * 5 + floor(0.6 * 15) = 27.
        assert_eq!(state.enemies_to_spawn, 27);
        let ships = {
            let mut query = world.query::<&CapitalShip>();
            query.iter().count()
        };
        assert!(
            (1..=2).contains(&ships),
            "Even wave with deep approach fields 1 or 2 ships, got {ships}"
        );
        match &fx[0] {
            FxEvent::WaveStarted { wave, shake } => {
                assert_eq!(*wave, 2);
                assert!((shake - 10.0).abs() < 1e-9, "1 + 0.6 * 15 = 10");
            }
            other => panic!("First event should announce the wave, got {other:?}"),
        }
    }

    // Odd wave at zero approach: the single 40% roll, never a second ship.
    for seed in 0..10 {
        let mut world = hecs::World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut state = GameState::new(1280.0, 720.0, 120);
        let mut next_id = 0u32;
        let mut fx = Vec::new();

        wave_director::start_wave(&mut world, &mut rng, &mut state, &mut next_id, &mut fx);

        assert_eq!(state.enemies_to_spawn, 13);
        let ships = {
            let mut query = world.query::<&CapitalShip>();
            query.iter().count()
        };
        assert!(ships <= 1);
    }
}

#[test]
fn test_capital_ship_entry_geometry() {
    let mut world = hecs::World::new();
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let state = GameState::new(1280.0, 720.0, 120);
    let mut next_id = 0u32;

    for _ in 0..20 {
        world_setup::spawn_capital_ship(&mut world, &mut rng, &state, &mut next_id);
    }
    assert_eq!(next_id, 20);

    for (_entity, (ship, pos, vel)) in
        world.query_mut::<(&CapitalShip, &Position, &Velocity)>()
    {
        assert!(
            pos.x == -300.0 || pos.x == 1280.0 + 300.0,
            "Ships enter just off either edge, got {}",
            pos.x
        );
        assert!(pos.y >= 72.0 && pos.y < 288.0, "Upper band, got {}", pos.y);
        let drift = vel.x.abs();
        assert!((0.01..0.025).contains(&drift), "Drift rate, got {drift}");
        assert!(
            (pos.x < 0.0) == (vel.x > 0.0),
            "Ships drift onto the field, not away"
        );
        assert!((300.0..500.0).contains(&ship.length));
        assert!((60.0..100.0).contains(&ship.depth));
    }
}

#[test]
fn test_capital_ship_cull_past_margin() {
    let mut world = hecs::World::new();
    let state = GameState::new(1280.0, 720.0, 120);
    let mut despawn_buffer = Vec::new();

    world.spawn((
        CapitalShip {
            id: 0,
            length: 300.0,
            depth: 60.0,
        },
        Position::new(-495.0, 100.0),
        Velocity::new(-0.5, 0.0),
    ));
    world.spawn((
        CapitalShip {
            id: 1,
            length: 300.0,
            depth: 60.0,
        },
        Position::new(640.0, 100.0),
        Velocity::new(0.02, 0.0),
    ));

    movement::run_capital_ships(&mut world, &state, &mut despawn_buffer, 16.0);

    let survivors: Vec<u32> = {
        let mut query = world.query::<&CapitalShip>();
        query.iter().map(|(_, ship)| ship.id).collect()
    };
    assert_eq!(survivors, vec![1], "Only the mid-field ship remains");

    let (_, pos) = {
        let mut query = world.query::<(&CapitalShip, &Position)>();
        let (_, (ship, pos)) = query.iter().next().unwrap();
        (ship.id, *pos)
    };
    assert!(
        (pos.x - 640.32).abs() < 1e-9,
        "Drift advances by rate times elapsed, got {}",
        pos.x
    );
}

// ---- Enemy motion ----

#[test]
fn test_enemy_motion_wobble_and_breach() {
    let mut world = hecs::World::new();
    let mut state = GameState::new(1280.0, 720.0, 120);
    let mut next_id = 0u32;
    let mut despawn_buffer = Vec::new();
    let mut fx = Vec::new();

    world_setup::spawn_enemy_at(
        &mut world,
        &state,
        &mut next_id,
        EnemyVariant::Standard,
        Position::new(640.0, 100.0),
        Position::new(640.0, 900.0),
    );
    world_setup::spawn_enemy_at(
        &mut world,
        &state,
        &mut next_id,
        EnemyVariant::Standard,
        Position::new(640.0, 669.0),
        Position::new(640.0, 900.0),
    );

    let destroyed =
        movement::run_enemies(&mut world, &mut state, &mut despawn_buffer, &mut fx, 16.0);

    assert!(!destroyed);
    assert_eq!(state.base_hp, 90, "One breach costs 10 base health");
    assert_eq!(fx.len(), 1);
    match &fx[0] {
        FxEvent::BaseHit { base_hp, .. } => assert_eq!(*base_hp, 90),
        other => panic!("Expected a base hit, got {other:?}"),
    }

    let remaining = {
        let mut query = world.query::<(&Enemy, &Position)>();
        let (_, (_, pos)) = query.iter().next().unwrap();
        *pos
    };
    // Straight descent at wave 1 speed plus the lateral wobble.
    assert!((remaining.y - 101.52).abs() < 1e-9, "got {}", remaining.y);
    assert!(remaining.x != 640.0 && (remaining.x - 640.0).abs() <= 0.5);

    // A breach against an almost-dead base finishes it.
    state.base_hp = 10;
    world_setup::spawn_enemy_at(
        &mut world,
        &state,
        &mut next_id,
        EnemyVariant::Standard,
        Position::new(640.0, 669.0),
        Position::new(640.0, 900.0),
    );
    fx.clear();
    let destroyed =
        movement::run_enemies(&mut world, &mut state, &mut despawn_buffer, &mut fx, 16.0);
    assert!(destroyed);
    assert_eq!(state.base_hp, 0);
}

// ---- Serialization ----

#[test]
fn test_sim_config_serde_round_trip() {
    let config = SimConfig {
        seed: 7,
        width: 1920.0,
        height: 1080.0,
        starting_credits: 200,
    };
    let json = serde_json::to_string(&config).unwrap();
    let back: SimConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back.seed, 7);
    assert_eq!(back.starting_credits, 200);
    assert!((back.width - 1920.0).abs() < 1e-12);
    assert!((back.height - 1080.0).abs() < 1e-12);
}

#[test]
fn test_commands_parse_from_json() {
    let mut engine = GameEngine::new(SimConfig::default());

    let start: PlayerCommand = serde_json::from_str(r#"{"type":"StartGame"}"#).unwrap();
    let select: PlayerCommand =
        serde_json::from_str(r#"{"type":"SelectTower","variant":"Shield"}"#).unwrap();
    let place: PlayerCommand =
        serde_json::from_str(r#"{"type":"PlaceTower","x":400.0,"y":360.0}"#).unwrap();

    engine.queue_command(start);
    engine.queue_command(select);
    engine.queue_command(place);
    let snap = engine.update(16.0);

    assert_eq!(snap.phase, GamePhase::Running);
    assert_eq!(snap.hud.selected_tower, TowerVariant::Shield);
    assert_eq!(snap.towers.len(), 1);
    assert_eq!(snap.towers[0].variant, TowerVariant::Shield);
    assert_eq!(snap.hud.credits, 20);
}
