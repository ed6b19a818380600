//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Shop rarity tier. Drives offer weighting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rarity {
    #[default]
    White,
    Green,
    Blue,
}

/// Broad tower category, informational only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TowerCategory {
    #[default]
    Physical,
    Magic,
    Support,
    Aoe,
}

/// Tower skill type.
///
/// `AreaDamage`, `BuffDamage` and `BuffSpeed` are active skills run by the tower
/// on a cooldown. `Slow`, `Splash` and `Chain` resolve on projectile impact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillType {
    #[default]
    None,
    AreaDamage,
    Slow,
    BuffDamage,
    BuffSpeed,
    Chain,
    Splash,
}

impl SkillType {
    /// Whether the tower itself fires this skill on its skill timer.
    pub fn is_active(self) -> bool {
        matches!(
            self,
            SkillType::AreaDamage | SkillType::BuffDamage | SkillType::BuffSpeed
        )
    }
}

/// One-time bonus unlocked when a tower reaches max level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaxLevelBonus {
    #[default]
    None,
    AttackSpeed,
    Damage,
    SlowRange,
    SplashRange,
    ChainCount,
}

/// Enemy archetype. A wave contains a single kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    #[default]
    Normal,
    Fast,
    Tank,
    Elite,
    Boss,
}

/// Tower archetype identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TowerKind {
    #[default]
    Archer,
    Mage,
    Guard,
    Cannon,
    Ice,
    Lightning,
}

impl TowerKind {
    pub const ALL: [TowerKind; 6] = [
        TowerKind::Archer,
        TowerKind::Mage,
        TowerKind::Guard,
        TowerKind::Cannon,
        TowerKind::Ice,
        TowerKind::Lightning,
    ];

    /// Stable string id used by level data and save-compatible tooling.
    pub fn id(self) -> &'static str {
        match self {
            TowerKind::Archer => "tower_archer",
            TowerKind::Mage => "tower_mage",
            TowerKind::Guard => "tower_guard",
            TowerKind::Cannon => "tower_cannon",
            TowerKind::Ice => "tower_ice",
            TowerKind::Lightning => "tower_lightning",
        }
    }
}

/// Kind of a grid tile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Void,
    Path,
    /// Buildable ground.
    #[default]
    Empty,
    Start,
    End,
}

impl TileKind {
    /// Decode a layout code. Unknown codes are treated as buildable ground.
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => TileKind::Void,
            1 => TileKind::Path,
            2 => TileKind::Empty,
            3 => TileKind::Start,
            4 => TileKind::End,
            _ => TileKind::Empty,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            TileKind::Void => 0,
            TileKind::Path => 1,
            TileKind::Empty => 2,
            TileKind::Start => 3,
            TileKind::End => 4,
        }
    }
}

/// Wave scheduler phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WavePhase {
    /// Countdown before wave 1. Nothing spawns.
    #[default]
    Preparing,
    Spawning,
    WaitingForClear,
    GapCountdown,
    /// All 30 waves spawned and cleared.
    Finished,
}

/// Overall game phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    MainMenu,
    Active,
    Paused,
    /// Base health reached zero.
    Defeat,
    /// Boss wave cleared.
    Victory,
}

impl GamePhase {
    pub fn is_over(self) -> bool {
        matches!(self, GamePhase::Defeat | GamePhase::Victory)
    }
}
