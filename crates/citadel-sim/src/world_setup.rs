//! Spawn factories for enemies, towers, and projectiles.

use hecs::{Entity, World};

use citadel_core::balance::TowerArchetype;
use citadel_core::components::*;
use citadel_core::constants::PROJECTILE_SPEED;
use citadel_core::enums::EnemyKind;
use citadel_core::types::Position;
use citadel_level::TileCoord;
use citadel_rules::enemy::derive_enemy_stats;
use citadel_rules::leveling::initial_progress;

use crate::systems::projectile::Projectile;

/// Spawn an enemy at the first waypoint with stats scaled for `wave`.
pub fn spawn_enemy(world: &mut World, kind: EnemyKind, wave: u32, waypoints: &[Position]) -> Entity {
    let stats = derive_enemy_stats(wave, kind);
    let position = waypoints.first().copied().unwrap_or_default();

    world.spawn((
        Enemy { kind, wave },
        Health {
            hp: stats.max_hp,
            max_hp: stats.max_hp,
        },
        Bounty {
            kill_reward: stats.kill_reward,
        },
        Mobility {
            original_speed: stats.speed,
            current_speed: stats.speed,
        },
        SlowEffect::default(),
        PathFollower {
            waypoints: waypoints.to_vec(),
            next_index: 0,
        },
        position,
    ))
}

/// Spawn a LV1 tower on `tile`.
pub fn spawn_tower(
    world: &mut World,
    id: u32,
    archetype: &TowerArchetype,
    tile: TileCoord,
    position: Position,
) -> Entity {
    world.spawn((
        Tower {
            id,
            archetype: *archetype,
            row: tile.row,
            col: tile.col,
        },
        initial_progress(archetype),
        AttackClock::default(),
        TowerBuff::default(),
        position,
    ))
}

/// Spawn a projectile at `origin` homing on `target`.
pub fn spawn_projectile(
    world: &mut World,
    origin: Position,
    target: Entity,
    payload: ProjectilePayload,
) -> Entity {
    world.spawn((
        Projectile {
            target,
            payload,
            speed: PROJECTILE_SPEED,
        },
        origin,
    ))
}
