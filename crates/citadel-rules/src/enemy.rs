//! Per-instance enemy stat derivation from wave number and archetype.

use citadel_core::balance::enemy_archetype;
use citadel_core::constants::*;
use citadel_core::enums::EnemyKind;

/// Stats fixed at spawn time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStats {
    pub max_hp: u32,
    pub speed: f64,
    pub kill_reward: u32,
}

/// HP multiplier for the wave band.
pub fn hp_multiplier(wave: u32) -> f64 {
    if wave <= HP_BAND_EARLY_END {
        HP_MULTIPLIER_EARLY
    } else if wave <= HP_BAND_MID_END {
        HP_MULTIPLIER_MID
    } else {
        HP_MULTIPLIER_LATE
    }
}

/// Derive stats for an enemy of `kind` spawned in `wave`.
pub fn derive_enemy_stats(wave: u32, kind: EnemyKind) -> EnemyStats {
    if kind == EnemyKind::Boss {
        return EnemyStats {
            max_hp: BOSS_HP,
            speed: BOSS_SPEED,
            kill_reward: 0,
        };
    }

    let archetype = enemy_archetype(kind);
    let wave_bonus = wave.saturating_sub(1);
    let reward_tier = wave_bonus / 5;

    let raw_hp = (archetype.base_hp + wave_bonus * archetype.hp_per_wave) as f64
        * hp_multiplier(wave);
    let max_hp = raw_hp.max(1.0).floor() as u32;

    EnemyStats {
        max_hp,
        speed: archetype.speed,
        kill_reward: archetype.base_reward + reward_tier * archetype.reward_per_5_waves,
    }
}
