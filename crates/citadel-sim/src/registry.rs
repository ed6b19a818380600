//! Tower registry: command ids to entities, and tile occupancy.
//!
//! Stored in `SimulationEngine`, NOT as ECS entities.

use std::collections::{BTreeMap, HashMap};

use hecs::Entity;

use citadel_level::TileCoord;

#[derive(Debug, Clone, Default)]
pub struct TowerRegistry {
    by_id: BTreeMap<u32, (Entity, TileCoord)>,
    by_tile: HashMap<TileCoord, u32>,
    next_id: u32,
}

impl TowerRegistry {
    /// Reserve the next tower id.
    pub fn allocate_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn insert(&mut self, id: u32, entity: Entity, tile: TileCoord) {
        self.by_id.insert(id, (entity, tile));
        self.by_tile.insert(tile, id);
    }

    /// Forget a tower and free its tile.
    pub fn remove(&mut self, id: u32) -> Option<Entity> {
        let (entity, tile) = self.by_id.remove(&id)?;
        self.by_tile.remove(&tile);
        Some(entity)
    }

    pub fn relocate(&mut self, id: u32, to: TileCoord) {
        if let Some((_, tile)) = self.by_id.get_mut(&id) {
            self.by_tile.remove(tile);
            *tile = to;
            self.by_tile.insert(to, id);
        }
    }

    pub fn entity(&self, id: u32) -> Option<Entity> {
        self.by_id.get(&id).map(|(e, _)| *e)
    }

    pub fn tile(&self, id: u32) -> Option<TileCoord> {
        self.by_id.get(&id).map(|(_, t)| *t)
    }

    pub fn occupant(&self, tile: TileCoord) -> Option<u32> {
        self.by_tile.get(&tile).copied()
    }

    pub fn is_occupied(&self, tile: TileCoord) -> bool {
        self.occupant(tile).is_some()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn clear(&mut self) {
        self.by_id.clear();
        self.by_tile.clear();
        self.next_id = 0;
    }
}
