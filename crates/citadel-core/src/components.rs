//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in the rules crate and in systems, not components.

use serde::{Deserialize, Serialize};

use crate::balance::TowerArchetype;
use crate::enums::*;
use crate::types::Position;

// --- Enemies ---

/// Marker and identity for an enemy entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    /// Wave the enemy was spawned in (drives stat scaling).
    pub wave: u32,
}

/// Hit points. `hp` never goes below zero.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub hp: u32,
    pub max_hp: u32,
}

/// Gold paid out when the enemy is killed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bounty {
    pub kill_reward: u32,
}

/// Movement speed. `current_speed` differs from `original_speed` only while slowed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Mobility {
    pub original_speed: f64,
    pub current_speed: f64,
}

/// Active slow tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SlowEffect {
    pub active: bool,
    /// Sim time (seconds) at which the slow may be lifted.
    pub end_time: f64,
}

/// Ordered waypoints and the index of the one currently being walked to.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathFollower {
    pub waypoints: Vec<Position>,
    pub next_index: usize,
}

// --- Towers ---

/// Identity and placement of a tower entity.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Tower {
    /// Stable id used by player commands.
    pub id: u32,
    pub archetype: TowerArchetype,
    pub row: usize,
    pub col: usize,
}

/// Range/count bonus recorded at max level and carried by projectiles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelBonus {
    pub kind: MaxLevelBonus,
    pub value: f64,
}

/// Merge progress and level-derived combat stats.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TowerProgress {
    pub level: u8,
    /// LV1 towers absorbed toward the next level.
    pub exp: u32,
    pub damage: u32,
    pub attack_interval: f64,
    /// Set once the tower reaches max level with a range/count bonus.
    pub bonus: Option<LevelBonus>,
}

/// Attack and skill cooldown accumulators.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AttackClock {
    pub attack_timer: f64,
    pub skill_timer: f64,
}

/// Transient buff received from a support tower.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TowerBuff {
    pub damage_buff: f64,
    pub speed_buff: f64,
    pub remaining_secs: f64,
}

// --- Projectiles ---

/// Snapshot of the firing tower carried by a projectile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ProjectilePayload {
    pub damage: u32,
    pub skill: SkillType,
    pub skill_value: f64,
    pub level: u8,
    /// Present only when the tower fired at max level.
    pub bonus: Option<LevelBonus>,
}
