//! Merge and placement rules: buying, placing, absorbing, and moving towers.
//!
//! Every operation validates first and mutates second. A rejected operation
//! leaves world, registry, and economy untouched.

use hecs::{Entity, World};
use tracing::debug;

use citadel_core::balance::TowerArchetype;
use citadel_core::components::{Tower, TowerProgress};
use citadel_core::enums::TowerKind;
use citadel_core::events::RejectReason;
use citadel_core::types::Position;
use citadel_level::{TileCoord, TileGrid};
use citadel_rules::leveling::{absorb, can_absorb, AbsorbOutcome};

use crate::economy::EconomyLedger;
use crate::registry::TowerRegistry;
use crate::world_setup::spawn_tower;

/// State of the target tower after a successful absorption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Absorbed {
    pub tower_id: u32,
    pub level: u8,
    pub exp: u32,
    pub leveled_up: bool,
}

fn check_tile(grid: &TileGrid, registry: &TowerRegistry, tile: TileCoord) -> Result<(), RejectReason> {
    if !grid.is_buildable(tile.row, tile.col) {
        return Err(RejectReason::TileNotBuildable);
    }
    if registry.is_occupied(tile) {
        return Err(RejectReason::TileOccupied);
    }
    Ok(())
}

/// Pay for and place a new LV1 tower. Returns its id.
pub fn place_tower(
    world: &mut World,
    grid: &TileGrid,
    registry: &mut TowerRegistry,
    economy: &mut dyn EconomyLedger,
    archetype: &TowerArchetype,
    tile: TileCoord,
) -> Result<u32, RejectReason> {
    check_tile(grid, registry, tile)?;
    if !economy.try_spend(archetype.base_cost) {
        return Err(RejectReason::InsufficientFunds);
    }

    let id = registry.allocate_id();
    let entity = spawn_tower(world, id, archetype, tile, grid.tile_center(tile));
    registry.insert(id, entity, tile);
    debug!(tower_id = id, kind = ?archetype.kind, row = tile.row, col = tile.col, "tower placed");
    Ok(id)
}

/// Absorb the placed LV1 tower `source_id` into `target_id`. Free of charge;
/// the source is removed and its tile freed.
pub fn merge_towers(
    world: &mut World,
    registry: &mut TowerRegistry,
    source_id: u32,
    target_id: u32,
) -> Result<Absorbed, RejectReason> {
    if source_id == target_id {
        return Err(RejectReason::CannotAbsorb);
    }
    let source = registry.entity(source_id).ok_or(RejectReason::UnknownTower)?;
    let target = registry.entity(target_id).ok_or(RejectReason::UnknownTower)?;

    let (source_kind, source_level) = {
        let tower = world.get::<&Tower>(source).map_err(|_| RejectReason::UnknownTower)?;
        let progress = world
            .get::<&TowerProgress>(source)
            .map_err(|_| RejectReason::UnknownTower)?;
        (tower.archetype.kind, progress.level)
    };

    let absorbed = absorb_into(world, target, target_id, source_kind, source_level)?;

    let _ = world.despawn(source);
    registry.remove(source_id);
    Ok(absorbed)
}

/// Pay for a fresh LV1 tower of `archetype` and absorb it straight into `target_id`.
/// Nothing is charged if the absorption would be rejected.
pub fn buy_and_absorb(
    world: &mut World,
    registry: &TowerRegistry,
    economy: &mut dyn EconomyLedger,
    archetype: &TowerArchetype,
    target_id: u32,
) -> Result<Absorbed, RejectReason> {
    let target = registry.entity(target_id).ok_or(RejectReason::UnknownTower)?;
    {
        let tower = world.get::<&Tower>(target).map_err(|_| RejectReason::UnknownTower)?;
        let progress = world
            .get::<&TowerProgress>(target)
            .map_err(|_| RejectReason::UnknownTower)?;
        if !can_absorb(&tower.archetype, &progress, archetype.kind, 1) {
            return Err(RejectReason::CannotAbsorb);
        }
    }
    if !economy.try_spend(archetype.base_cost) {
        return Err(RejectReason::InsufficientFunds);
    }

    absorb_into(world, target, target_id, archetype.kind, 1)
}

fn absorb_into(
    world: &mut World,
    target: Entity,
    target_id: u32,
    other_kind: TowerKind,
    other_level: u8,
) -> Result<Absorbed, RejectReason> {
    let (tower, progress) = world
        .query_one_mut::<(&Tower, &mut TowerProgress)>(target)
        .map_err(|_| RejectReason::UnknownTower)?;

    let outcome = absorb(&tower.archetype, progress, other_kind, other_level);
    if !outcome.is_success() {
        return Err(RejectReason::CannotAbsorb);
    }

    debug!(tower_id = target_id, level = progress.level, exp = progress.exp, "tower absorbed");
    Ok(Absorbed {
        tower_id: target_id,
        level: progress.level,
        exp: progress.exp,
        leveled_up: matches!(outcome, AbsorbOutcome::LeveledUp { .. }),
    })
}

/// Relocate a placed tower to another empty tile.
pub fn move_tower(
    world: &mut World,
    grid: &TileGrid,
    registry: &mut TowerRegistry,
    tower_id: u32,
    tile: TileCoord,
) -> Result<(), RejectReason> {
    let entity = registry.entity(tower_id).ok_or(RejectReason::UnknownTower)?;
    check_tile(grid, registry, tile)?;

    let (tower, pos) = world
        .query_one_mut::<(&mut Tower, &mut Position)>(entity)
        .map_err(|_| RejectReason::UnknownTower)?;
    tower.row = tile.row;
    tower.col = tile.col;
    *pos = grid.tile_center(tile);

    debug!(tower_id, from = ?registry.tile(tower_id), to = ?tile, "tower moved");
    registry.relocate(tower_id, tile);
    Ok(())
}
