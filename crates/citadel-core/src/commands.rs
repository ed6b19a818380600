//! Player commands sent from the host to the simulation.
//!
//! Commands are validated and queued for processing at the next tick boundary.

use serde::{Deserialize, Serialize};

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Shop ---
    /// Buy the offer in `slot` and place it as a new LV1 tower on an empty tile.
    BuyTower { slot: usize, row: usize, col: usize },
    /// Buy the offer in `slot` and feed it straight into a placed tower.
    BuyIntoTower { slot: usize, tower_id: u32 },
    /// Spend a free refresh to reroll every offer.
    RefreshShop,

    // --- Placed towers ---
    /// Absorb the LV1 tower `source_id` into `target_id`.
    MergeTowers { source_id: u32, target_id: u32 },
    /// Relocate a placed tower to another empty tile.
    MoveTower { tower_id: u32, row: usize, col: usize },

    // --- Simulation control ---
    /// Set time scale (1.0 = normal, 2.0 = double).
    SetTimeScale { scale: f64 },
    /// Start a fresh run from the main menu or after a finished run.
    StartRun,
    /// Pause the simulation.
    Pause,
    /// Resume from pause.
    Resume,
}
