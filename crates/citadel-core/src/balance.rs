//! Static balance tables: tower archetypes, enemy archetypes, per-wave lookups.
//!
//! Pure data. Everything here is read-only after construction.

use serde::Serialize;

use crate::constants::*;
use crate::enums::*;

/// Immutable tower template.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TowerArchetype {
    pub kind: TowerKind,
    pub name: &'static str,
    pub rarity: Rarity,
    pub category: TowerCategory,
    pub base_cost: i64,
    pub base_damage: u32,
    /// Seconds between shots at level 1.
    pub base_attack_interval: f64,
    pub base_range: f64,
    pub skill: SkillType,
    /// Multiplier, slow percent, or link count depending on `skill`.
    pub skill_value: f64,
    /// Seconds between active skill uses. Zero for passive skills.
    pub skill_cooldown: f64,
    pub max_level_bonus: MaxLevelBonus,
    pub max_level_bonus_value: f64,
}

/// Immutable enemy template.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnemyArchetype {
    pub kind: EnemyKind,
    pub base_hp: u32,
    pub hp_per_wave: u32,
    pub speed: f64,
    pub base_reward: u32,
    pub reward_per_5_waves: u32,
}

pub const TOWER_ARCHETYPES: [TowerArchetype; 6] = [
    TowerArchetype {
        kind: TowerKind::Archer,
        name: "Archer",
        rarity: Rarity::White,
        category: TowerCategory::Physical,
        base_cost: 30,
        base_damage: 5,
        base_attack_interval: 0.6,
        base_range: RANGE_LONG,
        skill: SkillType::None,
        skill_value: 0.0,
        skill_cooldown: 0.0,
        max_level_bonus: MaxLevelBonus::AttackSpeed,
        max_level_bonus_value: 0.5,
    },
    TowerArchetype {
        kind: TowerKind::Mage,
        name: "Mage",
        rarity: Rarity::White,
        category: TowerCategory::Magic,
        base_cost: 35,
        base_damage: 10,
        base_attack_interval: 1.0,
        base_range: RANGE_MEDIUM,
        skill: SkillType::None,
        skill_value: 0.0,
        skill_cooldown: 0.0,
        max_level_bonus: MaxLevelBonus::Damage,
        max_level_bonus_value: 0.8,
    },
    TowerArchetype {
        kind: TowerKind::Guard,
        name: "Guard",
        rarity: Rarity::White,
        category: TowerCategory::Physical,
        base_cost: 40,
        base_damage: 18,
        base_attack_interval: 1.5,
        base_range: RANGE_SHORT,
        skill: SkillType::None,
        skill_value: 0.0,
        skill_cooldown: 0.0,
        max_level_bonus: MaxLevelBonus::Damage,
        max_level_bonus_value: 1.0,
    },
    TowerArchetype {
        kind: TowerKind::Cannon,
        name: "Cannon",
        rarity: Rarity::Green,
        category: TowerCategory::Aoe,
        base_cost: 60,
        base_damage: 20,
        base_attack_interval: 2.0,
        base_range: RANGE_MEDIUM,
        skill: SkillType::Splash,
        skill_value: 0.5,
        skill_cooldown: 0.0,
        max_level_bonus: MaxLevelBonus::SplashRange,
        max_level_bonus_value: 0.8,
    },
    TowerArchetype {
        kind: TowerKind::Ice,
        name: "Frost",
        rarity: Rarity::Green,
        category: TowerCategory::Support,
        base_cost: 65,
        base_damage: 8,
        base_attack_interval: 2.0,
        base_range: RANGE_MEDIUM,
        skill: SkillType::Slow,
        skill_value: 0.25,
        skill_cooldown: 0.0,
        max_level_bonus: MaxLevelBonus::SlowRange,
        max_level_bonus_value: 0.6,
    },
    TowerArchetype {
        kind: TowerKind::Lightning,
        name: "Lightning",
        rarity: Rarity::Blue,
        category: TowerCategory::Magic,
        base_cost: 120,
        base_damage: 15,
        base_attack_interval: 1.0,
        base_range: RANGE_LONG,
        skill: SkillType::Chain,
        skill_value: 3.0,
        skill_cooldown: 2.0,
        max_level_bonus: MaxLevelBonus::ChainCount,
        max_level_bonus_value: 3.0,
    },
];

pub const ENEMY_ARCHETYPES: [EnemyArchetype; 5] = [
    EnemyArchetype {
        kind: EnemyKind::Normal,
        base_hp: 12,
        hp_per_wave: 8,
        speed: 50.0,
        base_reward: 2,
        reward_per_5_waves: 0,
    },
    EnemyArchetype {
        kind: EnemyKind::Fast,
        base_hp: 8,
        hp_per_wave: 6,
        speed: 90.0,
        base_reward: 2,
        reward_per_5_waves: 0,
    },
    EnemyArchetype {
        kind: EnemyKind::Tank,
        base_hp: 40,
        hp_per_wave: 18,
        speed: 35.0,
        base_reward: 3,
        reward_per_5_waves: 0,
    },
    EnemyArchetype {
        kind: EnemyKind::Elite,
        base_hp: 200,
        hp_per_wave: 40,
        speed: 45.0,
        base_reward: 8,
        reward_per_5_waves: 2,
    },
    EnemyArchetype {
        kind: EnemyKind::Boss,
        base_hp: BOSS_HP,
        hp_per_wave: 0,
        speed: BOSS_SPEED,
        base_reward: 0,
        reward_per_5_waves: 0,
    },
];

/// Look up a tower archetype by kind.
pub fn tower_archetype(kind: TowerKind) -> &'static TowerArchetype {
    match kind {
        TowerKind::Archer => &TOWER_ARCHETYPES[0],
        TowerKind::Mage => &TOWER_ARCHETYPES[1],
        TowerKind::Guard => &TOWER_ARCHETYPES[2],
        TowerKind::Cannon => &TOWER_ARCHETYPES[3],
        TowerKind::Ice => &TOWER_ARCHETYPES[4],
        TowerKind::Lightning => &TOWER_ARCHETYPES[5],
    }
}

/// Look up a tower archetype by its string id (e.g. `"tower_ice"`).
pub fn tower_archetype_by_id(id: &str) -> Option<&'static TowerArchetype> {
    TOWER_ARCHETYPES.iter().find(|a| a.kind.id() == id)
}

/// Look up an enemy archetype by kind.
pub fn enemy_archetype(kind: EnemyKind) -> &'static EnemyArchetype {
    match kind {
        EnemyKind::Normal => &ENEMY_ARCHETYPES[0],
        EnemyKind::Fast => &ENEMY_ARCHETYPES[1],
        EnemyKind::Tank => &ENEMY_ARCHETYPES[2],
        EnemyKind::Elite => &ENEMY_ARCHETYPES[3],
        EnemyKind::Boss => &ENEMY_ARCHETYPES[4],
    }
}

/// Shop weight for a rarity tier.
pub fn rarity_weight(rarity: Rarity) -> u32 {
    match rarity {
        Rarity::White => RARITY_WEIGHT_WHITE,
        Rarity::Green => RARITY_WEIGHT_GREEN,
        Rarity::Blue => RARITY_WEIGHT_BLUE,
    }
}

/// LV1 absorptions needed to advance from `level`. Zero at max level.
pub fn merge_cost(level: u8) -> u32 {
    if level >= MAX_TOWER_LEVEL {
        return 0;
    }
    level
        .checked_sub(1)
        .and_then(|i| MERGE_COST.get(i as usize))
        .copied()
        .unwrap_or(MERGE_COST_FALLBACK)
}

/// Enemy count for a regular wave. `None` for elite/boss waves and unknown keys.
pub fn wave_enemy_count(wave: u32) -> Option<u32> {
    let count = match wave {
        1 | 2 => 30,
        3 => 32,
        4 | 5 => 35,
        6 | 7 => 32,
        8 | 9 => 38,
        10 => 36,
        11 | 12 => 34,
        13 | 14 => 40,
        16 => 38,
        17 | 18 => 35,
        19 => 42,
        20 | 21 => 40,
        22 => 42,
        23 => 44,
        24 => 45,
        26 => 42,
        27 => 44,
        28 => 45,
        29 => 35,
        _ => return None,
    };
    Some(count)
}

/// Enemy kind for a regular wave. `None` for elite/boss waves and unknown keys.
pub fn wave_enemy_kind(wave: u32) -> Option<EnemyKind> {
    let kind = match wave {
        1..=3 => EnemyKind::Normal,
        4 | 5 => EnemyKind::Fast,
        6 | 7 => EnemyKind::Normal,
        8 | 9 => EnemyKind::Tank,
        10 => EnemyKind::Fast,
        11 | 12 => EnemyKind::Normal,
        13 | 14 => EnemyKind::Tank,
        16 => EnemyKind::Fast,
        17 | 18 => EnemyKind::Normal,
        19 => EnemyKind::Tank,
        20 | 21 => EnemyKind::Fast,
        22..=24 => EnemyKind::Tank,
        26 => EnemyKind::Fast,
        27 | 28 => EnemyKind::Tank,
        29 => EnemyKind::Normal,
        _ => return None,
    };
    Some(kind)
}
