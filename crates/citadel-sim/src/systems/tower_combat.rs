//! Tower combat system: buff countdown, attack cycle, and active skills.
//!
//! The attack timer resets every time it elapses, target or not. Passive
//! skills (slow, splash, chain) ride on the projectile and are resolved at impact.

use hecs::{Entity, World};

use citadel_core::balance::TowerArchetype;
use citadel_core::components::*;
use citadel_core::constants::{BUFF_DURATION_SECS, BUFF_RANGE_FACTOR};
use citadel_core::enums::SkillType;
use citadel_core::events::GameEvent;
use citadel_core::types::Position;
use citadel_rules::skills::{buffed_damage, effective_attack_interval, scaled_damage};

use crate::damage::apply_damage;
use crate::economy::EconomyLedger;
use crate::spatial::{enemies_within, nearest_enemy, towers_within};
use crate::world_setup::spawn_projectile;

/// A tower whose attack timer elapsed this tick.
struct ShotRequest {
    origin: Position,
    range: f64,
    payload: ProjectilePayload,
}

/// A tower whose active skill came off cooldown this tick.
struct SkillRequest {
    tower: Entity,
    origin: Position,
    archetype: TowerArchetype,
    damage: u32,
}

/// Run one tick of tower combat.
pub fn run(
    world: &mut World,
    dt: f64,
    economy: &mut dyn EconomyLedger,
    events: &mut Vec<GameEvent>,
) {
    let mut shots: Vec<ShotRequest> = Vec::new();
    let mut skills: Vec<SkillRequest> = Vec::new();

    for (entity, (tower, progress, clock, buff, pos)) in world.query_mut::<(
        &Tower,
        &TowerProgress,
        &mut AttackClock,
        &mut TowerBuff,
        &Position,
    )>() {
        if buff.remaining_secs > 0.0 {
            buff.remaining_secs -= dt;
            if buff.remaining_secs <= 0.0 {
                *buff = TowerBuff::default();
            }
        }

        let archetype = tower.archetype;
        clock.attack_timer += dt;
        if clock.attack_timer >= effective_attack_interval(progress.attack_interval, buff.speed_buff) {
            clock.attack_timer = 0.0;
            shots.push(ShotRequest {
                origin: *pos,
                range: archetype.base_range,
                payload: ProjectilePayload {
                    damage: buffed_damage(progress.damage, buff.damage_buff),
                    skill: archetype.skill,
                    skill_value: archetype.skill_value,
                    level: progress.level,
                    bonus: progress.bonus,
                },
            });
        }

        if archetype.skill.is_active() && archetype.skill_cooldown > 0.0 {
            clock.skill_timer += dt;
            if clock.skill_timer >= archetype.skill_cooldown {
                clock.skill_timer = 0.0;
                skills.push(SkillRequest {
                    tower: entity,
                    origin: *pos,
                    archetype,
                    damage: progress.damage,
                });
            }
        }
    }

    for shot in shots {
        if let Some((target, _)) = nearest_enemy(world, shot.origin, shot.range, &[]) {
            spawn_projectile(world, shot.origin, target, shot.payload);
        }
    }

    for skill in skills {
        run_skill(world, &skill, economy, events);
    }
}

fn run_skill(
    world: &mut World,
    skill: &SkillRequest,
    economy: &mut dyn EconomyLedger,
    events: &mut Vec<GameEvent>,
) {
    let archetype = &skill.archetype;
    match archetype.skill {
        SkillType::AreaDamage => {
            let damage = scaled_damage(skill.damage, archetype.skill_value);
            for (enemy, _) in enemies_within(world, skill.origin, archetype.base_range) {
                apply_damage(world, enemy, damage as f64, economy, events);
            }
        }
        SkillType::BuffDamage | SkillType::BuffSpeed => {
            let reach = archetype.base_range * BUFF_RANGE_FACTOR;
            for other in towers_within(world, skill.origin, reach, Some(skill.tower)) {
                if let Ok(mut buff) = world.get::<&mut TowerBuff>(other) {
                    if archetype.skill == SkillType::BuffDamage {
                        buff.damage_buff = archetype.skill_value;
                    } else {
                        buff.speed_buff = archetype.skill_value;
                    }
                    buff.remaining_secs = BUFF_DURATION_SECS;
                }
            }
        }
        SkillType::None | SkillType::Slow | SkillType::Chain | SkillType::Splash => {}
    }
}
