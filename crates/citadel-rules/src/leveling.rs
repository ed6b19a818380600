//! Tower merge/level state machine.
//!
//! Level runs 1..=MAX and is terminal at MAX. Only LV1 towers can be absorbed,
//! into any target of the same archetype below MAX. Each absorption adds one
//! exp; reaching the per-level merge cost levels the tower up and resets exp.

use citadel_core::balance::{merge_cost, TowerArchetype};
use citadel_core::components::{LevelBonus, TowerProgress};
use citadel_core::constants::*;
use citadel_core::enums::{MaxLevelBonus, TowerKind};

/// Result of an absorb attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbsorbOutcome {
    /// Validation failed. Nothing changed.
    Rejected,
    /// Exp advanced without a level-up.
    Progressed { exp: u32 },
    LeveledUp { level: u8 },
}

impl AbsorbOutcome {
    pub fn is_success(self) -> bool {
        !matches!(self, AbsorbOutcome::Rejected)
    }
}

/// Level-scaled combat stats before any max-level bonus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelStats {
    pub damage: u32,
    pub attack_interval: f64,
}

/// LV1 absorptions needed to leave `level`. Zero at MAX.
pub fn next_level_needed(level: u8) -> u32 {
    merge_cost(level)
}

/// Damage and attack interval for `archetype` at `level`.
pub fn stats_for_level(archetype: &TowerArchetype, level: u8) -> LevelStats {
    let steps = level.saturating_sub(1) as f64;
    let damage =
        (archetype.base_damage as f64 * (1.0 + steps * DAMAGE_GROWTH_PER_LEVEL)).floor() as u32;
    let attack_interval = (archetype.base_attack_interval
        - steps * ATTACK_INTERVAL_REDUCTION_PER_LEVEL)
        .max(MIN_ATTACK_INTERVAL);
    LevelStats {
        damage,
        attack_interval,
    }
}

/// Fresh LV1 progress for a newly placed tower.
pub fn initial_progress(archetype: &TowerArchetype) -> TowerProgress {
    let stats = stats_for_level(archetype, 1);
    TowerProgress {
        level: 1,
        exp: 0,
        damage: stats.damage,
        attack_interval: stats.attack_interval,
        bonus: None,
    }
}

/// Whether a tower of `other_kind` at `other_level` may be absorbed into `target`.
pub fn can_absorb(
    target_archetype: &TowerArchetype,
    target: &TowerProgress,
    other_kind: TowerKind,
    other_level: u8,
) -> bool {
    target.level < MAX_TOWER_LEVEL && other_kind == target_archetype.kind && other_level == 1
}

/// Absorb one tower into `target`. On rejection `target` is untouched.
pub fn absorb(
    target_archetype: &TowerArchetype,
    target: &mut TowerProgress,
    other_kind: TowerKind,
    other_level: u8,
) -> AbsorbOutcome {
    if !can_absorb(target_archetype, target, other_kind, other_level) {
        return AbsorbOutcome::Rejected;
    }

    target.exp += 1;
    if target.exp < next_level_needed(target.level) {
        return AbsorbOutcome::Progressed { exp: target.exp };
    }

    target.level += 1;
    target.exp = 0;
    let stats = stats_for_level(target_archetype, target.level);
    target.damage = stats.damage;
    target.attack_interval = stats.attack_interval;

    if target.level == MAX_TOWER_LEVEL {
        apply_max_level_bonus(target_archetype, target);
    }

    AbsorbOutcome::LeveledUp {
        level: target.level,
    }
}

/// One-time max-level enhancement. Range/count bonuses are only recorded here
/// and consumed at projectile impact.
fn apply_max_level_bonus(archetype: &TowerArchetype, progress: &mut TowerProgress) {
    let value = archetype.max_level_bonus_value;
    match archetype.max_level_bonus {
        MaxLevelBonus::None => {}
        MaxLevelBonus::AttackSpeed => {
            progress.attack_interval *= 1.0 - value;
        }
        MaxLevelBonus::Damage => {
            progress.damage = (progress.damage as f64 * (1.0 + value)).floor() as u32;
        }
        kind @ (MaxLevelBonus::SlowRange
        | MaxLevelBonus::SplashRange
        | MaxLevelBonus::ChainCount) => {
            progress.bonus = Some(LevelBonus { kind, value });
        }
    }
}
