//! Greedy waypoint construction.
//!
//! Starting at the Start tile, repeatedly pick the unvisited Path tile with the
//! lowest `distance_to_current + PATH_END_BIAS × distance_to_end`, then finish
//! at End. An approximation, not a shortest path. Ties go to the earlier tile
//! in row-major order.

use citadel_core::constants::PATH_END_BIAS;
use citadel_core::enums::TileKind;
use citadel_core::types::Position;

use crate::grid::TileGrid;

/// Build the world-space waypoint list. Empty if Start or End is missing.
pub fn build_waypoints(grid: &TileGrid) -> Vec<Position> {
    let (Some(start), Some(end)) = (grid.start(), grid.end()) else {
        return Vec::new();
    };
    let start = grid.tile_center(start);
    let end = grid.tile_center(end);

    let mut remaining: Vec<Position> = grid
        .tiles_of_kind(TileKind::Path)
        .map(|c| grid.tile_center(c))
        .collect();

    let mut waypoints = Vec::with_capacity(remaining.len() + 2);
    waypoints.push(start);
    let mut current = start;

    while !remaining.is_empty() {
        let mut best = 0;
        let mut best_score = f64::INFINITY;
        for (i, candidate) in remaining.iter().enumerate() {
            let score = current.distance_to(candidate) + PATH_END_BIAS * candidate.distance_to(&end);
            if score < best_score {
                best = i;
                best_score = score;
            }
        }
        current = remaining.remove(best);
        waypoints.push(current);
    }

    waypoints.push(end);
    waypoints
}
