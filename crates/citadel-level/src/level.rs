//! Level data: layout plus optional starting economy overrides.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use citadel_core::enums::TileKind;

use crate::grid::TileGrid;

/// Errors raised while loading or validating a level.
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("level layout is empty")]
    EmptyLayout,
    #[error("layout row {row} has {found} tiles, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("level has no start tile")]
    MissingStart,
    #[error("level has no end tile")]
    MissingEnd,
    #[error("invalid level json: {0}")]
    Json(#[from] serde_json::Error),
}

/// A playable level. Layout codes: 0 void, 1 path, 2 empty, 3 start, 4 end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelData {
    pub id: u32,
    pub name: String,
    pub layout: Vec<Vec<u8>>,
    #[serde(default)]
    pub initial_money: Option<i64>,
    #[serde(default)]
    pub initial_health: Option<i32>,
}

impl LevelData {
    /// Parse a level from JSON. Does not validate the layout.
    pub fn from_json_str(json: &str) -> Result<Self, LevelError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decode the layout into a grid.
    pub fn grid(&self) -> Result<TileGrid, LevelError> {
        TileGrid::from_layout(&self.layout)
    }

    /// Decode and check that enemies have somewhere to enter and leave.
    pub fn validate(&self) -> Result<TileGrid, LevelError> {
        let grid = self.grid()?;
        if grid.start().is_none() {
            return Err(LevelError::MissingStart);
        }
        if grid.end().is_none() {
            return Err(LevelError::MissingEnd);
        }
        Ok(grid)
    }

    /// Number of buildable tiles.
    pub fn buildable_count(&self) -> usize {
        self.layout
            .iter()
            .flatten()
            .filter(|&&c| TileKind::from_code(c) == TileKind::Empty)
            .count()
    }
}

/// Built-in serpentine level used when no level is configured.
pub fn default_level() -> LevelData {
    LevelData {
        id: 1,
        name: "Switchback".into(),
        layout: vec![
            vec![2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2],
            vec![3, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2],
            vec![2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 1, 2],
            vec![2, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2],
            vec![2, 1, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2],
            vec![2, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2],
            vec![2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 1, 2],
            vec![0, 0, 0, 0, 0, 0, 0, 0, 0, 2, 4, 2],
        ],
        initial_money: None,
        initial_health: None,
    }
}
