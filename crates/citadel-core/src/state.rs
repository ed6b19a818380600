//! Game state snapshot: the complete visible state handed to the host each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::GameEvent;
use crate::types::{Position, SimTime};

/// Complete game state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub economy: EconomyView,
    pub wave: WaveView,
    pub enemies: Vec<EnemyView>,
    pub towers: Vec<TowerView>,
    pub projectiles: Vec<ProjectileView>,
    pub shop: ShopView,
    pub events: Vec<GameEvent>,
}

/// Shared counters read by the presentation layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EconomyView {
    pub money: i64,
    pub base_health: i32,
    pub game_over: bool,
    pub victory: bool,
    pub total_damage: u64,
    pub total_earned: u64,
}

/// Wave progress readout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaveView {
    /// 0 while preparing.
    pub current_wave: u32,
    pub total_waves: u32,
    pub phase: WavePhase,
    pub prepare_remaining_secs: f64,
    /// Exact during the gap countdown, estimated otherwise.
    pub next_wave_remaining_secs: f64,
    pub in_combat: bool,
    pub enemies_left_to_spawn: u32,
    /// Fraction of the current wave's estimated duration elapsed (0.0 - 1.0).
    pub progress: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub kind: EnemyKind,
    pub position: Position,
    pub hp: u32,
    pub max_hp: u32,
    pub speed: f64,
    pub slowed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TowerView {
    pub tower_id: u32,
    pub kind: TowerKind,
    pub row: usize,
    pub col: usize,
    pub position: Position,
    pub level: u8,
    pub exp: u32,
    /// Absorptions needed for the next level. Zero at max level.
    pub exp_needed: u32,
    pub damage: u32,
    pub attack_interval: f64,
    pub range: f64,
    pub buffed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub position: Position,
    pub skill: SkillType,
}

/// Current shop offers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShopView {
    pub offers: Vec<ShopOfferView>,
    pub free_refreshes_left: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ShopOfferView {
    pub slot: usize,
    pub kind: TowerKind,
    pub cost: i64,
    pub rarity: Rarity,
    pub purchased: bool,
}
