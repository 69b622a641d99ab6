//! Simulation engine — the heart of the defense.
//!
//! `GameEngine` owns the hecs ECS world, processes queued player commands,
//! runs all systems in a fixed per-frame order, and produces `GameSnapshot`s
//! for the frontend. Frames are variable-length: the host passes the real
//! elapsed time and every rate in the simulation is scaled by it.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use planetfall_core::commands::PlayerCommand;
use planetfall_core::components::Tower;
use planetfall_core::constants::{
    DEFAULT_HEIGHT, DEFAULT_WIDTH, STARTING_CREDITS, TOWER_CLEARANCE,
};
use planetfall_core::enums::GamePhase;
use planetfall_core::events::FxEvent;
use planetfall_core::state::GameSnapshot;
use planetfall_core::types::{Position, SimTime};

use crate::state::{tower_cost, GameState};
use crate::systems;
use crate::world_setup;

/// Configuration for a new simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same session.
    pub seed: u64,
    /// Playfield extent in world units.
    pub width: f64,
    pub height: f64,
    /// Opening credits balance.
    pub starting_credits: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            starting_credits: STARTING_CREDITS,
        }
    }
}

/// The simulation engine. Owns all game state.
pub struct GameEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    state: GameState,
    rng: ChaCha8Rng,
    next_id: u32,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    fx_events: Vec<FxEvent>,
    config: SimConfig,
}

impl GameEngine {
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::Idle,
            state: GameState::new(config.width, config.height, config.starting_credits),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            next_id: 0,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            fx_events: Vec::new(),
            config,
        }
    }

    /// Queue a player command for processing at the start of the next frame.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Begin a fresh session. Also serves as restart: the world is cleared
    /// and session state rebuilt, but the RNG stream continues.
    pub fn start_game(&mut self) {
        self.world.clear();
        self.command_queue.clear();
        self.despawn_buffer.clear();
        self.fx_events.clear();
        self.time = SimTime::default();
        self.next_id = 0;
        self.state = GameState::new(
            self.config.width,
            self.config.height,
            self.config.starting_credits,
        );
        self.phase = GamePhase::Running;

        systems::wave_director::start_wave(
            &mut self.world,
            &mut self.rng,
            &mut self.state,
            &mut self.next_id,
            &mut self.fx_events,
        );
    }

    /// Restart after a game over. Identical to starting fresh.
    pub fn restart(&mut self) {
        self.start_game();
    }

    /// Advance the simulation by `elapsed_ms` and return a snapshot.
    ///
    /// Commands are drained in every phase, but the world only simulates
    /// while the game is running. Idle and game-over frames return a
    /// snapshot of the frozen field.
    pub fn update(&mut self, elapsed_ms: f64) -> GameSnapshot {
        // Negative host deltas are treated as empty frames.
        let elapsed_ms = elapsed_ms.max(0.0);

        self.process_commands();

        if self.phase == GamePhase::Running {
            self.run_systems(elapsed_ms);
            self.time.advance(elapsed_ms);
        }

        let fx_events = std::mem::take(&mut self.fx_events);
        systems::snapshot::build_snapshot(&self.world, &self.time, self.phase, &self.state, fx_events)
    }

    fn run_systems(&mut self, elapsed_ms: f64) {
        // 1. Approach progression
        self.state.advance_approach(elapsed_ms);

        // 2. Spawn scheduling
        systems::wave_director::run(
            &mut self.world,
            &mut self.rng,
            &mut self.state,
            &mut self.next_id,
            &mut self.fx_events,
            elapsed_ms,
        );

        // 3. Enemy motion and base breaches
        let base_destroyed = systems::movement::run_enemies(
            &mut self.world,
            &mut self.state,
            &mut self.despawn_buffer,
            &mut self.fx_events,
            elapsed_ms,
        );

        // 4. Tower targeting, then damage and fire
        let targets = systems::targeting::run(&mut self.world);
        systems::combat::run(
            &mut self.world,
            &targets,
            &mut self.next_id,
            &mut self.fx_events,
            elapsed_ms,
        );

        // 5. Capital ship drift
        systems::movement::run_capital_ships(
            &mut self.world,
            &self.state,
            &mut self.despawn_buffer,
            elapsed_ms,
        );

        // 6. Projectile flight and collision
        systems::projectiles::run(
            &mut self.world,
            &self.state,
            &mut self.despawn_buffer,
            &mut self.fx_events,
            elapsed_ms,
        );

        // 7. Death cleanup: rewards, splitter broods, despawns
        systems::cleanup::run(
            &mut self.world,
            &mut self.rng,
            &mut self.state,
            &mut self.next_id,
            &mut self.fx_events,
            &mut self.despawn_buffer,
        );

        // 8. Terminal check, then wave advance on a still-live base
        if base_destroyed {
            self.phase = GamePhase::GameOver;
            self.fx_events.push(FxEvent::GameOver { wave: self.state.wave });
        } else {
            systems::wave_director::check_wave_advance(
                &mut self.world,
                &mut self.rng,
                &mut self.state,
                &mut self.next_id,
                &mut self.fx_events,
            );
        }
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    // Invalid commands are silently ignored. The frontend may issue commands
    // based on stale state, so rejection is normal, not exceptional.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::SelectTower { variant } => {
                self.state.selected_tower = variant;
            }
            PlayerCommand::PlaceTower { x, y } => {
                self.try_place_tower(Position::new(x, y));
            }
            PlayerCommand::StartGame => self.start_game(),
        }
    }

    fn try_place_tower(&mut self, position: Position) {
        if self.phase != GamePhase::Running {
            return;
        }
        let variant = self.state.selected_tower;
        let cost = tower_cost(variant);
        if !self.state.can_afford(cost) {
            return;
        }
        // Clearance against every standing tower.
        for (_entity, (_tower, pos)) in self.world.query_mut::<(&Tower, &Position)>() {
            if pos.distance_to(&position) < TOWER_CLEARANCE {
                return;
            }
        }

        self.state.spend(cost);
        world_setup::place_tower(&mut self.world, &mut self.next_id, variant, position);
        self.fx_events.push(FxEvent::TowerPlaced { position, variant });
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Spawn an enemy directly, bypassing the wave director.
    #[cfg(test)]
    pub fn spawn_enemy_for_test(
        &mut self,
        variant: planetfall_core::enums::EnemyVariant,
        position: Position,
        target: Position,
    ) -> hecs::Entity {
        world_setup::spawn_enemy_at(
            &mut self.world,
            &self.state,
            &mut self.next_id,
            variant,
            position,
            target,
        )
    }

    /// Place a tower directly, bypassing economy and clearance checks.
    #[cfg(test)]
    pub fn place_tower_for_test(
        &mut self,
        variant: planetfall_core::enums::TowerVariant,
        position: Position,
    ) -> hecs::Entity {
        world_setup::place_tower(&mut self.world, &mut self.next_id, variant, position)
    }

    #[cfg(test)]
    pub fn set_enemy_hp(&mut self, entity: hecs::Entity, hp: f64) {
        if let Ok(mut enemy) = self.world.get::<&mut planetfall_core::components::Enemy>(entity) {
            enemy.hp = hp;
        }
    }

    #[cfg(test)]
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}
