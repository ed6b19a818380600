//! Unpaced autoplay session.
//!
//! Plays a run as fast as the engine ticks: once per simulated second it buys
//! every affordable offer, feeding duplicates into an existing tower of the same
//! kind and placing the rest next to the enemy path.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, info, warn};

use citadel_core::commands::PlayerCommand;
use citadel_core::constants::{MAX_TOWER_LEVEL, TICK_RATE};
use citadel_core::enums::{GamePhase, TileKind};
use citadel_core::state::GameStateSnapshot;
use citadel_level::{TileCoord, TileGrid};
use citadel_sim::SimulationEngine;

/// End-of-session report, logged as JSON by the binary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub outcome: GamePhase,
    pub waves_reached: u32,
    pub ticks: u64,
    pub money: i64,
    pub base_health: i32,
    pub towers: usize,
    pub total_damage: u64,
    pub total_earned: u64,
}

impl SessionSummary {
    fn from_snapshot(snapshot: &GameStateSnapshot) -> Self {
        Self {
            outcome: snapshot.phase,
            waves_reached: snapshot.wave.current_wave,
            ticks: snapshot.time.tick,
            money: snapshot.economy.money,
            base_health: snapshot.economy.base_health,
            towers: snapshot.towers.len(),
            total_damage: snapshot.economy.total_damage,
            total_earned: snapshot.economy.total_earned,
        }
    }
}

/// Buildable tiles touching the enemy path, in row-major order.
pub fn path_side_tiles(grid: &TileGrid) -> Vec<TileCoord> {
    let mut tiles = Vec::new();
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let coord = TileCoord::new(row, col);
            if !grid.is_buildable(row, col) {
                continue;
            }
            let touches_path = grid.neighbors(coord).any(|n| {
                matches!(
                    grid.tile(n.row, n.col),
                    Some(TileKind::Path | TileKind::Start | TileKind::End)
                )
            });
            if touches_path {
                tiles.push(coord);
            }
        }
    }
    tiles
}

/// Commands buying everything affordable in the current shop.
pub fn plan_purchases(snapshot: &GameStateSnapshot, candidates: &[TileCoord]) -> Vec<PlayerCommand> {
    let mut commands = Vec::new();
    let mut money = snapshot.economy.money;
    let mut taken: HashSet<(usize, usize)> =
        snapshot.towers.iter().map(|t| (t.row, t.col)).collect();
    let mut free_tiles = candidates
        .iter()
        .filter(|c| !taken.contains(&(c.row, c.col)))
        .copied()
        .collect::<Vec<_>>()
        .into_iter();

    for offer in snapshot.shop.offers.iter().filter(|o| !o.purchased) {
        if offer.cost > money {
            continue;
        }

        let merge_target = snapshot
            .towers
            .iter()
            .find(|t| t.kind == offer.kind && t.level < MAX_TOWER_LEVEL);
        if let Some(target) = merge_target {
            commands.push(PlayerCommand::BuyIntoTower {
                slot: offer.slot,
                tower_id: target.tower_id,
            });
            money -= offer.cost;
            continue;
        }

        let Some(tile) = free_tiles.next() else {
            continue;
        };
        taken.insert((tile.row, tile.col));
        commands.push(PlayerCommand::BuyTower {
            slot: offer.slot,
            row: tile.row,
            col: tile.col,
        });
        money -= offer.cost;
    }

    let all_bought = snapshot.shop.offers.iter().all(|o| o.purchased);
    if commands.is_empty() && all_bought && snapshot.shop.free_refreshes_left > 0 {
        commands.push(PlayerCommand::RefreshShop);
    }
    commands
}

/// Start a run and play it until it ends or `max_ticks` have run.
pub fn run_session(engine: &mut SimulationEngine, max_ticks: Option<u64>) -> SessionSummary {
    let candidates = path_side_tiles(engine.grid());
    debug!(candidates = candidates.len(), "autoplay tiles");

    engine.queue_command(PlayerCommand::StartRun);
    let mut snapshot = engine.tick();
    let mut last_wave = 0;
    let mut ticks_run: u64 = 1;

    while !snapshot.phase.is_over() {
        if max_ticks.is_some_and(|max| ticks_run >= max) {
            break;
        }

        if snapshot.time.tick % TICK_RATE as u64 == 0 {
            engine.queue_commands(plan_purchases(&snapshot, &candidates));
        }
        if snapshot.wave.current_wave != last_wave {
            last_wave = snapshot.wave.current_wave;
            info!(
                wave = last_wave,
                money = snapshot.economy.money,
                base_health = snapshot.economy.base_health,
                towers = snapshot.towers.len(),
                "autoplay progress"
            );
        }

        snapshot = engine.tick();
        ticks_run += 1;
    }

    if engine.registry().is_empty() {
        warn!("autoplay placed no towers");
    }
    SessionSummary::from_snapshot(&snapshot)
}
