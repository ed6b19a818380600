//! Simulation engine, the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player commands,
//! runs all systems, and produces `GameStateSnapshot`s. Completely headless,
//! enabling deterministic testing.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use citadel_core::balance::tower_archetype;
use citadel_core::commands::PlayerCommand;
use citadel_core::enums::{GamePhase, TowerKind};
use citadel_core::events::{GameEvent, RejectReason};
use citadel_core::state::GameStateSnapshot;
use citadel_core::types::{Position, SimTime};
use citadel_level::{build_waypoints, TileCoord, TileGrid};

use crate::economy::{Economy, EconomyLedger};
use crate::merge::{self, Absorbed};
use crate::registry::TowerRegistry;
use crate::schedule::WaveScheduler;
use crate::shop::ShopState;
use crate::spatial::live_enemy_count;
use crate::systems;

pub use crate::config::{ConfigError, SimConfig, MAX_TIME_SCALE};

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    time_scale: f64,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    events: Vec<GameEvent>,

    // --- Level ---
    grid: TileGrid,
    waypoints: Vec<Position>,
    starting_money: i64,
    starting_health: i32,

    // --- Run state ---
    economy: Economy,
    scheduler: WaveScheduler,
    shop: ShopState,
    registry: TowerRegistry,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let level = config.resolve_level();
        let grid = level.validate()?;
        let waypoints = build_waypoints(&grid);
        let starting_money = config.starting_money(&level);
        let starting_health = config.starting_health(&level);

        info!(
            level = %level.name,
            seed = config.seed,
            waypoints = waypoints.len(),
            buildable = level.buildable_count(),
            "simulation engine created"
        );

        Ok(Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            time_scale: config.time_scale,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            events: Vec::new(),
            grid,
            waypoints,
            starting_money,
            starting_health,
            economy: Economy::new(starting_money, starting_health),
            scheduler: WaveScheduler::default(),
            shop: ShopState::default(),
            registry: TowerRegistry::default(),
        })
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Active {
            self.run_systems();
            self.time.advance();
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            &self.economy,
            &self.scheduler,
            &self.shop,
            events,
        )
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn economy(&self) -> &Economy {
        &self.economy
    }

    pub fn scheduler(&self) -> &WaveScheduler {
        &self.scheduler
    }

    pub fn shop(&self) -> &ShopState {
        &self.shop
    }

    pub fn registry(&self) -> &TowerRegistry {
        &self.registry
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// World-space path enemies follow, start to end.
    pub fn waypoints(&self) -> &[Position] {
        &self.waypoints
    }

    /// Mutable world access (for tests that stage enemies directly).
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Replace the scheduler (for tests driving waves by hand).
    #[cfg(test)]
    pub fn set_scheduler(&mut self, scheduler: WaveScheduler) {
        self.scheduler = scheduler;
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartRun => {
                if self.phase == GamePhase::MainMenu || self.phase.is_over() {
                    self.start_run();
                } else {
                    self.reject(RejectReason::RunNotActive);
                }
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
            PlayerCommand::SetTimeScale { scale } => {
                if scale.is_finite() {
                    self.time_scale = scale.clamp(0.0, MAX_TIME_SCALE);
                }
            }
            gameplay => {
                if !matches!(self.phase, GamePhase::Active | GamePhase::Paused) {
                    self.reject(RejectReason::RunNotActive);
                    return;
                }
                if let Err(reason) = self.handle_gameplay(gameplay) {
                    self.reject(reason);
                }
            }
        }
    }

    fn handle_gameplay(&mut self, command: PlayerCommand) -> Result<(), RejectReason> {
        match command {
            PlayerCommand::BuyTower { slot, row, col } => {
                let archetype = tower_archetype(self.purchasable_offer(slot)?);
                let tile = TileCoord::new(row, col);
                let tower_id = merge::place_tower(
                    &mut self.world,
                    &self.grid,
                    &mut self.registry,
                    &mut self.economy,
                    archetype,
                    tile,
                )?;
                self.shop.mark_purchased(slot);
                self.events.push(GameEvent::TowerPlaced {
                    tower_id,
                    kind: archetype.kind,
                    row,
                    col,
                });
            }
            PlayerCommand::BuyIntoTower { slot, tower_id } => {
                let archetype = tower_archetype(self.purchasable_offer(slot)?);
                let absorbed = merge::buy_and_absorb(
                    &mut self.world,
                    &self.registry,
                    &mut self.economy,
                    archetype,
                    tower_id,
                )?;
                self.shop.mark_purchased(slot);
                self.push_absorbed(absorbed);
            }
            PlayerCommand::RefreshShop => {
                if !self.shop.refresh(&mut self.rng) {
                    return Err(RejectReason::NoFreeRefreshes);
                }
                self.events.push(GameEvent::ShopRefreshed {
                    free_refreshes_left: self.shop.free_refreshes_left(),
                });
            }
            PlayerCommand::MergeTowers {
                source_id,
                target_id,
            } => {
                let absorbed =
                    merge::merge_towers(&mut self.world, &mut self.registry, source_id, target_id)?;
                self.push_absorbed(absorbed);
            }
            PlayerCommand::MoveTower { tower_id, row, col } => {
                merge::move_tower(
                    &mut self.world,
                    &self.grid,
                    &mut self.registry,
                    tower_id,
                    TileCoord::new(row, col),
                )?;
                self.events
                    .push(GameEvent::TowerMoved { tower_id, row, col });
            }
            PlayerCommand::StartRun
            | PlayerCommand::Pause
            | PlayerCommand::Resume
            | PlayerCommand::SetTimeScale { .. } => {}
        }
        Ok(())
    }

    /// Kind on offer in `slot`, if it can still be bought.
    fn purchasable_offer(&self, slot: usize) -> Result<TowerKind, RejectReason> {
        let offer = self.shop.offer(slot).ok_or(RejectReason::UnknownSlot)?;
        if offer.purchased {
            return Err(RejectReason::OfferAlreadyPurchased);
        }
        Ok(offer.kind)
    }

    fn push_absorbed(&mut self, absorbed: Absorbed) {
        self.events.push(GameEvent::TowerAbsorbed {
            tower_id: absorbed.tower_id,
            level: absorbed.level,
            exp: absorbed.exp,
        });
        if absorbed.leveled_up {
            info!(tower_id = absorbed.tower_id, level = absorbed.level, "tower leveled up");
            self.events.push(GameEvent::TowerLeveledUp {
                tower_id: absorbed.tower_id,
                level: absorbed.level,
            });
        }
    }

    fn reject(&mut self, reason: RejectReason) {
        warn!(?reason, phase = ?self.phase, "command rejected");
        self.events.push(GameEvent::CommandRejected { reason });
    }

    /// Reset every piece of run state and enter the Active phase.
    fn start_run(&mut self) {
        self.world.clear();
        self.registry.clear();
        self.economy = Economy::new(self.starting_money, self.starting_health);
        self.scheduler = WaveScheduler::default();
        self.shop = ShopState::new(&mut self.rng);
        self.time = SimTime::default();
        self.phase = GamePhase::Active;

        info!(
            money = self.starting_money,
            base_health = self.starting_health,
            enemies = self.scheduler.schedule().total_enemies(),
            "run started"
        );
        self.events.push(GameEvent::RunStarted {
            money: self.starting_money,
            base_health: self.starting_health,
        });
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let dt = self.time.dt();
        let now = self.time.elapsed_secs;

        // 1. Wave scheduling and spawning
        let scheduled = systems::wave_scheduler::run(
            &mut self.world,
            &mut self.scheduler,
            &self.waypoints,
            dt,
            &mut self.events,
        );
        if let Some(config) = scheduled.wave_started {
            self.shop.on_wave_started(config.wave);
        }
        // 2. Tower attacks and active skills
        systems::tower_combat::run(&mut self.world, dt, &mut self.economy, &mut self.events);
        // 3. Projectile travel and impact
        systems::projectile::run(&mut self.world, dt, now, &mut self.economy, &mut self.events);
        // 4. Enemy movement and breaches
        systems::enemy_movement::run(&mut self.world, dt, now, &mut self.economy, &mut self.events);
        // 5. Win/loss
        self.check_outcome();
    }

    fn check_outcome(&mut self) {
        if self.economy.is_game_over() && !self.economy.is_victory() {
            let wave = self.scheduler.current_wave();
            info!(wave, "base destroyed");
            self.phase = GamePhase::Defeat;
            self.events.push(GameEvent::Defeat { wave });
            return;
        }

        if self.scheduler.is_finished() && live_enemy_count(&self.world) == 0 {
            self.economy.declare_victory();
            debug!(
                total_damage = self.economy.total_damage(),
                total_earned = self.economy.total_earned(),
                towers = self.registry.len(),
                "final stats"
            );
            info!(money = self.economy.money(), "all waves cleared");
            self.phase = GamePhase::Victory;
            self.events.push(GameEvent::Victory);
        }
    }
}
