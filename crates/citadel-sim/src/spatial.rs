//! Distance-bounded queries over live entities.
//!
//! Enemies are despawned the moment they die, so every enemy the world still
//! holds is live. Results follow hecs iteration order.

use hecs::{Entity, World};

use citadel_core::components::{Enemy, Tower};
use citadel_core::types::Position;

/// Enemies whose distance from `center` is at most `radius`.
pub fn enemies_within(world: &World, center: Position, radius: f64) -> Vec<(Entity, Position)> {
    let mut query = world.query::<(&Enemy, &Position)>();
    query
        .iter()
        .filter(|(_, (_, pos))| center.distance_to(pos) <= radius)
        .map(|(entity, (_, pos))| (entity, *pos))
        .collect()
}

/// Closest enemy strictly inside `max_range`, skipping `exclude`.
/// The first one found wins a tie.
pub fn nearest_enemy(
    world: &World,
    center: Position,
    max_range: f64,
    exclude: &[Entity],
) -> Option<(Entity, Position)> {
    let mut best: Option<(Entity, Position)> = None;
    let mut best_dist = max_range;

    let mut query = world.query::<(&Enemy, &Position)>();
    for (entity, (_, pos)) in query.iter() {
        if exclude.contains(&entity) {
            continue;
        }
        let dist = center.distance_to(pos);
        if dist < best_dist {
            best_dist = dist;
            best = Some((entity, *pos));
        }
    }
    best
}

/// Towers within `radius` of `center`, other than `exclude`.
pub fn towers_within(
    world: &World,
    center: Position,
    radius: f64,
    exclude: Option<Entity>,
) -> Vec<Entity> {
    let mut query = world.query::<(&Tower, &Position)>();
    query
        .iter()
        .filter(|(entity, (_, pos))| Some(*entity) != exclude && center.distance_to(pos) <= radius)
        .map(|(entity, _)| entity)
        .collect()
}

/// Number of enemies still in the world.
pub fn live_enemy_count(world: &World) -> usize {
    let mut query = world.query::<&Enemy>();
    query.iter().count()
}
