//! Level grid for CITADEL.
//!
//! Tile layout decoding, tile-to-world projection, placement queries,
//! and greedy waypoint path construction.

pub use citadel_core as core;

pub mod grid;
pub mod level;
pub mod path;

// Re-export key types for convenience.
pub use grid::{TileCoord, TileGrid};
pub use level::{default_level, LevelData, LevelError};
pub use path::build_waypoints;

#[cfg(test)]
mod tests;
