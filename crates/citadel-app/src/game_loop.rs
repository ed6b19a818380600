//! Game loop thread: runs the simulation engine at 30Hz and stores snapshots.
//!
//! The engine is built before the thread starts so configuration errors reach
//! the caller. Commands arrive via `mpsc` channel; the latest snapshot is kept
//! in shared state for polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tracing::{debug, info};

use citadel_core::constants::TICK_RATE;
use citadel_sim::engine::{SimConfig, SimulationEngine};

use crate::state::{GameLoopCommand, GameLoopHandle, HostError, SharedSnapshot};

/// Nominal duration of one tick at 1x speed.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Spawns the game loop in a new thread.
pub fn spawn_game_loop(config: SimConfig) -> Result<GameLoopHandle, HostError> {
    let engine = SimulationEngine::new(config)?;
    let latest_snapshot: SharedSnapshot = Arc::new(Mutex::new(None));
    let (command_tx, command_rx) = mpsc::channel::<GameLoopCommand>();

    let shared = Arc::clone(&latest_snapshot);
    let thread = std::thread::Builder::new()
        .name("citadel-game-loop".into())
        .spawn(move || run_game_loop(engine, command_rx, &shared))?;

    Ok(GameLoopHandle {
        command_tx,
        thread,
        latest_snapshot,
    })
}

/// The game loop. Runs until Shutdown, channel disconnect, or the end of the run.
fn run_game_loop(
    mut engine: SimulationEngine,
    command_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<citadel_core::state::GameStateSnapshot>>,
) {
    let mut next_tick_time = Instant::now();
    info!("game loop started");

    loop {
        // 1. Drain all pending commands
        loop {
            match command_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(command)) => {
                    engine.queue_command(command);
                }
                Ok(GameLoopCommand::Shutdown) => {
                    info!("game loop shut down");
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    debug!("command channel closed");
                    return;
                }
            }
        }

        // 2. Advance one tick (engine handles pause semantics internally)
        let snapshot = engine.tick();
        let finished = snapshot.phase.is_over();

        // 3. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        if finished {
            info!(phase = ?engine.phase(), "run over, game loop exiting");
            return;
        }

        // 4. Sleep until next tick, adjusting for time_scale
        let time_scale = engine.time_scale();
        let effective_tick_duration = if time_scale > 0.001 {
            TICK_DURATION.div_f64(time_scale)
        } else {
            TICK_DURATION
        };

        next_tick_time += effective_tick_duration;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > effective_tick_duration * 2 {
            // Too far behind, reset to avoid a catch-up spiral
            next_tick_time = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use citadel_core::commands::PlayerCommand;
    use citadel_core::enums::GamePhase;
    use citadel_core::state::GameStateSnapshot;
    use citadel_level::default_level;

    use crate::autoplay::path_side_tiles;

    fn wait_until(
        handle: &GameLoopHandle,
        done: impl Fn(&GameStateSnapshot) -> bool,
    ) -> Option<GameStateSnapshot> {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if let Some(snapshot) = handle.snapshot().filter(|s| done(s)) {
                return Some(snapshot);
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        None
    }

    #[test]
    fn test_shop_and_board_commands_reach_engine() {
        let handle = spawn_game_loop(SimConfig {
            initial_money: Some(1000),
            ..Default::default()
        })
        .unwrap();
        handle.send(PlayerCommand::StartRun).unwrap();
        let started = wait_until(&handle, |s| s.phase == GamePhase::Active).unwrap();
        let offers = started.shop.offers.clone();

        let grid = default_level().validate().unwrap();
        let tiles = path_side_tiles(&grid);
        for (slot, tile) in tiles.iter().take(2).enumerate() {
            handle
                .send(PlayerCommand::BuyTower {
                    slot,
                    row: tile.row,
                    col: tile.col,
                })
                .unwrap();
        }
        let bought = wait_until(&handle, |s| s.towers.len() == 2).unwrap();
        assert_eq!(
            bought.economy.money,
            1000 - offers[0].cost - offers[1].cost
        );
        assert!(bought.shop.offers[0].purchased);
        assert!(bought.shop.offers[1].purchased);

        let first = bought.towers.iter().find(|t| t.tower_id == 0).unwrap();
        assert_eq!((first.row, first.col), (tiles[0].row, tiles[0].col));
        handle
            .send(PlayerCommand::MoveTower {
                tower_id: 0,
                row: tiles[2].row,
                col: tiles[2].col,
            })
            .unwrap();
        let moved = wait_until(&handle, |s| {
            s.towers
                .iter()
                .any(|t| t.tower_id == 0 && (t.row, t.col) == (tiles[2].row, tiles[2].col))
        });
        assert!(moved.is_some());

        handle.shutdown();
    }

    #[test]
    fn test_pause_freezes_sim_clock() {
        let handle = spawn_game_loop(SimConfig::default()).unwrap();
        handle.send(PlayerCommand::StartRun).unwrap();
        assert!(wait_until(&handle, |s| s.phase == GamePhase::Active).is_some());

        handle.send(PlayerCommand::Pause).unwrap();
        let paused = wait_until(&handle, |s| s.phase == GamePhase::Paused).unwrap();
        std::thread::sleep(Duration::from_millis(100));
        let still = handle.snapshot().unwrap();
        assert_eq!(still.phase, GamePhase::Paused);
        assert_eq!(still.time.tick, paused.time.tick);
        assert_eq!(still.wave.prepare_remaining_secs, paused.wave.prepare_remaining_secs);

        handle.send(PlayerCommand::Resume).unwrap();
        let resumed = wait_until(&handle, |s| s.time.tick > paused.time.tick).unwrap();
        assert_eq!(resumed.phase, GamePhase::Active);

        handle.shutdown();
    }

    #[test]
    fn test_invalid_config_reported_before_spawn() {
        let result = spawn_game_loop(SimConfig {
            time_scale: 99.0,
            ..Default::default()
        });
        assert!(matches!(result, Err(HostError::Config(_))));
    }

    #[test]
    fn test_snapshot_serialization_under_3ms() {
        let mut engine = SimulationEngine::new(SimConfig::default()).unwrap();
        engine.queue_command(PlayerCommand::StartRun);
        for _ in 0..900 {
            engine.tick();
        }

        let snapshot = engine.tick();
        let start = Instant::now();
        let json = serde_json::to_string(&snapshot).unwrap();
        let elapsed = start.elapsed();

        assert!(
            elapsed < Duration::from_millis(3),
            "Snapshot serialization took {:?}, should be <3ms",
            elapsed
        );
        assert!(!json.is_empty());
    }
}
