//! TileGrid: decoded tile layout with world-space projection.

use serde::{Deserialize, Serialize};

use citadel_core::constants::TILE_SIZE;
use citadel_core::enums::TileKind;
use citadel_core::types::Position;

use crate::level::LevelError;

/// Row/column address of a tile. Row 0 is the top row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    pub row: usize,
    pub col: usize,
}

impl TileCoord {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Rectangular tile grid centered on the world origin.
#[derive(Debug, Clone)]
pub struct TileGrid {
    rows: usize,
    cols: usize,
    /// Tile kinds, row-major.
    tiles: Vec<TileKind>,
}

impl TileGrid {
    /// Decode a layout of tile codes. Rows must all have the same length.
    pub fn from_layout(layout: &[Vec<u8>]) -> Result<Self, LevelError> {
        let rows = layout.len();
        let cols = layout.first().map(Vec::len).unwrap_or(0);
        if rows == 0 || cols == 0 {
            return Err(LevelError::EmptyLayout);
        }

        let mut tiles = Vec::with_capacity(rows * cols);
        for (row, codes) in layout.iter().enumerate() {
            if codes.len() != cols {
                return Err(LevelError::RaggedRow {
                    row,
                    expected: cols,
                    found: codes.len(),
                });
            }
            tiles.extend(codes.iter().map(|&c| TileKind::from_code(c)));
        }

        Ok(Self { rows, cols, tiles })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Tile kind at (row, col), or `None` outside the grid.
    pub fn tile(&self, row: usize, col: usize) -> Option<TileKind> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.tiles.get(row * self.cols + col).copied()
    }

    /// World-space center of a tile.
    pub fn tile_center(&self, coord: TileCoord) -> Position {
        let x = (coord.col as f64 - (self.cols as f64 - 1.0) / 2.0) * TILE_SIZE;
        let y = ((self.rows as f64 - 1.0) / 2.0 - coord.row as f64) * TILE_SIZE;
        Position::new(x, y)
    }

    /// All tiles of `kind` in row-major order.
    pub fn tiles_of_kind(&self, kind: TileKind) -> impl Iterator<Item = TileCoord> + '_ {
        let cols = self.cols;
        self.tiles
            .iter()
            .enumerate()
            .filter(move |&(_, &k)| k == kind)
            .map(move |(i, _)| TileCoord::new(i / cols, i % cols))
    }

    /// Whether towers may be built on this tile (ignores occupancy).
    pub fn is_buildable(&self, row: usize, col: usize) -> bool {
        self.tile(row, col) == Some(TileKind::Empty)
    }

    /// First Start tile in row-major order.
    pub fn start(&self) -> Option<TileCoord> {
        self.tiles_of_kind(TileKind::Start).next()
    }

    /// First End tile in row-major order.
    pub fn end(&self) -> Option<TileCoord> {
        self.tiles_of_kind(TileKind::End).next()
    }

    /// Orthogonal neighbors inside the grid.
    pub fn neighbors(&self, coord: TileCoord) -> impl Iterator<Item = TileCoord> + '_ {
        let TileCoord { row, col } = coord;
        [
            row.checked_sub(1).map(|r| TileCoord::new(r, col)),
            Some(TileCoord::new(row + 1, col)),
            col.checked_sub(1).map(|c| TileCoord::new(row, c)),
            Some(TileCoord::new(row, col + 1)),
        ]
        .into_iter()
        .flatten()
        .filter(move |c| c.row < self.rows && c.col < self.cols)
    }
}
