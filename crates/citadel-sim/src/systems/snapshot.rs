//! Snapshot system: builds a GameStateSnapshot from the ECS world.

use hecs::World;

use citadel_core::components::*;
use citadel_core::enums::GamePhase;
use citadel_core::events::GameEvent;
use citadel_core::state::*;
use citadel_core::types::{Position, SimTime};
use citadel_rules::leveling::next_level_needed;

use crate::economy::Economy;
use crate::schedule::WaveScheduler;
use crate::shop::ShopState;
use crate::systems::projectile::Projectile;

/// Build a complete snapshot of the current game state.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    economy: &Economy,
    scheduler: &WaveScheduler,
    shop: &ShopState,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        phase,
        economy: economy.view(),
        wave: scheduler.view(),
        enemies: build_enemies(world),
        towers: build_towers(world),
        projectiles: build_projectiles(world),
        shop: shop.view(),
        events,
    }
}

fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut query = world.query::<(&Enemy, &Health, &Mobility, &SlowEffect, &Position)>();
    query
        .iter()
        .map(|(_, (enemy, health, mobility, slow, pos))| EnemyView {
            kind: enemy.kind,
            position: *pos,
            hp: health.hp,
            max_hp: health.max_hp,
            speed: mobility.current_speed,
            slowed: slow.active,
        })
        .collect()
}

fn build_towers(world: &World) -> Vec<TowerView> {
    let mut query = world.query::<(&Tower, &TowerProgress, &TowerBuff, &Position)>();
    let mut towers: Vec<TowerView> = query
        .iter()
        .map(|(_, (tower, progress, buff, pos))| TowerView {
            tower_id: tower.id,
            kind: tower.archetype.kind,
            row: tower.row,
            col: tower.col,
            position: *pos,
            level: progress.level,
            exp: progress.exp,
            exp_needed: next_level_needed(progress.level),
            damage: progress.damage,
            attack_interval: progress.attack_interval,
            range: tower.archetype.base_range,
            buffed: buff.remaining_secs > 0.0,
        })
        .collect();
    towers.sort_by_key(|t| t.tower_id);
    towers
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut query = world.query::<(&Projectile, &Position)>();
    query
        .iter()
        .map(|(_, (projectile, pos))| ProjectileView {
            position: *pos,
            skill: projectile.payload.skill,
        })
        .collect()
}
