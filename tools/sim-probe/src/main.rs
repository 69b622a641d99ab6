//! sim-probe: headless session driver for the planetfall simulation.
//!
//! Usage:
//!   sim-probe run --seed 7 --duration 120000 --turrets 4 --credits 300
//!   sim-probe snapshot --seed 7 --duration 5000 --out snap.json

use std::path::PathBuf;
use std::process;

use planetfall_core::commands::PlayerCommand;
use planetfall_core::enums::GamePhase;
use planetfall_core::events::FxEvent;
use planetfall_core::state::GameSnapshot;
use planetfall_sim::{GameEngine, SimConfig};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "run" => cmd_run(&args[2..]),
        "snapshot" => cmd_snapshot(&args[2..]),
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!(
        "sim-probe: PLANETFALL headless session driver\n\
         \n\
         Commands:\n\
         \n\
         run       Drive a session to its end and report how it went\n\
         \n\
           --seed <N>       RNG seed (default: 0)\n\
           --duration <ms>  Simulated time budget (default: 120000)\n\
           --step <ms>      Frame length (default: 16)\n\
           --width <px>     Playfield width (default: 1280)\n\
           --height <px>    Playfield height (default: 720)\n\
           --credits <N>    Opening credits balance (default: 120)\n\
           --turrets <N>    Turret picket placed on the first frame (default: 0)\n\
         \n\
         snapshot  Drive a session, then emit the final snapshot as JSON\n\
         \n\
           Takes the same flags as run, plus:\n\
           --out <path>     Write JSON here instead of stdout\n\
         \n\
         Examples:\n\
         \n\
           sim-probe run --seed 42 --duration 300000 --credits 400 --turrets 6\n\
           sim-probe snapshot --seed 42 --duration 10000 --out snap.json\n"
    );
}

fn parse_f64(args: &[String], name: &str, default: f64) -> f64 {
    for i in 0..args.len() {
        if args[i] == name && i + 1 < args.len() {
            if let Ok(v) = args[i + 1].parse::<f64>() {
                return v;
            }
        }
    }
    default
}

fn parse_u64(args: &[String], name: &str, default: u64) -> u64 {
    for i in 0..args.len() {
        if args[i] == name && i + 1 < args.len() {
            if let Ok(v) = args[i + 1].parse::<u64>() {
                return v;
            }
        }
    }
    default
}

fn parse_u32(args: &[String], name: &str, default: u32) -> u32 {
    for i in 0..args.len() {
        if args[i] == name && i + 1 < args.len() {
            if let Ok(v) = args[i + 1].parse::<u32>() {
                return v;
            }
        }
    }
    default
}

fn parse_out(args: &[String]) -> Option<PathBuf> {
    for i in 0..args.len() {
        if args[i] == "--out" && i + 1 < args.len() {
            return Some(PathBuf::from(&args[i + 1]));
        }
    }
    None
}

fn build_config(args: &[String]) -> SimConfig {
    let defaults = SimConfig::default();
    SimConfig {
        seed: parse_u64(args, "--seed", defaults.seed),
        width: parse_f64(args, "--width", defaults.width),
        height: parse_f64(args, "--height", defaults.height),
        starting_credits: parse_u32(args, "--credits", defaults.starting_credits),
    }
}

/// Run a session until the time budget runs out or the base falls.
/// Returns the final snapshot and the number of frames simulated.
fn drive_session(args: &[String]) -> (GameSnapshot, u64) {
    let config = build_config(args);
    let step = parse_f64(args, "--step", 16.0).max(1.0);
    let duration = parse_f64(args, "--duration", 120_000.0);
    let turrets = parse_u32(args, "--turrets", 0);

    eprintln!(
        "Session: seed={} field={}x{} credits={} step={}ms",
        config.seed, config.width, config.height, config.starting_credits, step
    );

    let mut engine = GameEngine::new(config.clone());
    engine.queue_command(PlayerCommand::StartGame);
    // A picket of turrets across the field, placed as ordinary commands so
    // the economy and clearance rules still apply.
    for i in 0..turrets {
        let x = config.width * (i + 1) as f64 / (turrets + 1) as f64;
        let y = config.height - 170.0;
        engine.queue_command(PlayerCommand::PlaceTower { x, y });
    }

    let mut simulated = 0.0;
    let mut frames: u64 = 0;
    let mut snapshot = engine.update(step);
    simulated += step;
    frames += 1;
    report_events(&snapshot, simulated);

    while simulated < duration && snapshot.phase != GamePhase::GameOver {
        snapshot = engine.update(step);
        simulated += step;
        frames += 1;
        report_events(&snapshot, simulated);
    }

    (snapshot, frames)
}

fn report_events(snapshot: &GameSnapshot, simulated_ms: f64) {
    for event in &snapshot.fx_events {
        match event {
            FxEvent::WaveStarted { wave, shake } => {
                eprintln!(
                    "[{:>7.1}s] wave {wave} begins (shake {shake:.1})",
                    simulated_ms / 1000.0
                );
            }
            FxEvent::BaseHit { base_hp, .. } => {
                eprintln!(
                    "[{:>7.1}s] breach! base integrity {base_hp}",
                    simulated_ms / 1000.0
                );
            }
            FxEvent::GameOver { wave } => {
                eprintln!(
                    "[{:>7.1}s] base destroyed in wave {wave}",
                    simulated_ms / 1000.0
                );
            }
            _ => {}
        }
    }
}

// --- Run command ---

fn cmd_run(args: &[String]) {
    let (snapshot, frames) = drive_session(args);

    eprintln!(
        "Done: {} frames, {:.1}s simulated",
        frames,
        snapshot.time.elapsed_ms / 1000.0
    );
    eprintln!(
        "Final: wave={} kills={} credits={} base={}% approach={:.3}",
        snapshot.hud.wave,
        snapshot.hud.kills,
        snapshot.hud.credits,
        snapshot.hud.base_hp_percent,
        snapshot.hud.approach,
    );
    eprintln!(
        "Field: {} enemies, {} towers, {} projectiles, {} capital ships",
        snapshot.enemies.len(),
        snapshot.towers.len(),
        snapshot.projectiles.len(),
        snapshot.capital_ships.len(),
    );
    if snapshot.phase == GamePhase::GameOver {
        eprintln!("Outcome: base destroyed");
    } else {
        eprintln!("Outcome: base holding");
    }
}

// --- Snapshot command ---

fn cmd_snapshot(args: &[String]) {
    let (snapshot, _frames) = drive_session(args);

    let json = match serde_json::to_string_pretty(&snapshot) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("Error serializing snapshot: {e}");
            process::exit(1);
        }
    };

    match parse_out(args) {
        Some(path) => match std::fs::write(&path, &json) {
            Ok(()) => eprintln!("Wrote snapshot to {} ({} bytes)", path.display(), json.len()),
            Err(e) => {
                eprintln!("Error writing {}: {e}", path.display());
                process::exit(1);
            }
        },
        None => println!("{json}"),
    }
}
