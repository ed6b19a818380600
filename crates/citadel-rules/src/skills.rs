//! Skill parameters: on-hit slow/splash/chain scaling, active skill damage, buffs.

use citadel_core::components::LevelBonus;
use citadel_core::constants::*;
use citadel_core::enums::MaxLevelBonus;

/// Slow percent for a Slow tower at `level`. Max level replaces level scaling.
pub fn slow_percent_for_level(base: f64, level: u8) -> f64 {
    match level {
        2 => base + SLOW_BONUS_LV2,
        3 => base + SLOW_BONUS_LV3,
        l if l >= MAX_TOWER_LEVEL => SLOW_PERCENT_MAX_LEVEL,
        _ => base,
    }
}

/// Scale `base_radius` by `(1 + value)` if `bonus` is of kind `wanted`.
pub fn bonus_scaled_radius(
    base_radius: f64,
    bonus: Option<LevelBonus>,
    wanted: MaxLevelBonus,
) -> f64 {
    match bonus {
        Some(b) if b.kind == wanted => base_radius * (1.0 + b.value),
        _ => base_radius,
    }
}

/// Number of chain links beyond the primary target.
pub fn chain_count(skill_value: f64, bonus: Option<LevelBonus>) -> u32 {
    let extra = match bonus {
        Some(b) if b.kind == MaxLevelBonus::ChainCount => b.value,
        _ => 0.0,
    };
    (skill_value + extra).max(0.0).floor() as u32
}

/// Damage of the first chain link.
pub fn first_chain_damage(damage: u32) -> u32 {
    decay(damage)
}

/// Damage of the link after one dealing `previous`.
pub fn next_chain_damage(previous: u32) -> u32 {
    decay(previous)
}

fn decay(damage: u32) -> u32 {
    (damage as f64 * CHAIN_DECAY).floor() as u32
}

/// `floor(damage × multiplier)`, used by splash and area damage.
pub fn scaled_damage(damage: u32, multiplier: f64) -> u32 {
    (damage as f64 * multiplier).max(0.0).floor() as u32
}

/// Shot damage including an active damage buff.
pub fn buffed_damage(damage: u32, damage_buff: f64) -> u32 {
    scaled_damage(damage, 1.0 + damage_buff)
}

/// Attack interval shortened by an active speed buff.
pub fn effective_attack_interval(attack_interval: f64, speed_buff: f64) -> f64 {
    attack_interval * (1.0 - speed_buff)
}
