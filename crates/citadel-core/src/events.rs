//! Events emitted by the simulation for presentation feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Gameplay events drained into each snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    RunStarted { money: i64, base_health: i32 },
    WaveStarted {
        wave: u32,
        kind: EnemyKind,
        count: u32,
    },
    EnemyKilled { kind: EnemyKind, reward: u32 },
    /// An enemy reached the end tile.
    BaseBreached { kind: EnemyKind, base_health: i32 },
    TowerPlaced {
        tower_id: u32,
        kind: TowerKind,
        row: usize,
        col: usize,
    },
    /// A LV1 tower was consumed to advance `tower_id`.
    TowerAbsorbed { tower_id: u32, level: u8, exp: u32 },
    TowerLeveledUp { tower_id: u32, level: u8 },
    TowerMoved { tower_id: u32, row: usize, col: usize },
    ShopRefreshed { free_refreshes_left: u32 },
    /// A player command failed validation. State is unchanged.
    CommandRejected { reason: RejectReason },
    Defeat { wave: u32 },
    Victory,
}

/// Why a player command was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    InsufficientFunds,
    TileNotBuildable,
    TileOccupied,
    UnknownTower,
    UnknownSlot,
    OfferAlreadyPurchased,
    /// Archetypes differ, source is not LV1, or target is at max level.
    CannotAbsorb,
    NoFreeRefreshes,
    RunNotActive,
}
