//! Projectile system: homing travel and on-hit resolution.

use hecs::{Entity, World};

use citadel_core::components::{Mobility, ProjectilePayload, SlowEffect};
use citadel_core::constants::*;
use citadel_core::enums::{MaxLevelBonus, SkillType};
use citadel_core::events::GameEvent;
use citadel_core::types::Position;
use citadel_rules::skills::*;
use citadel_rules::slow::apply_slow;

use crate::damage::apply_damage;
use crate::economy::EconomyLedger;
use crate::spatial::{enemies_within, nearest_enemy};

/// A projectile in flight.
#[derive(Debug, Clone, Copy)]
pub struct Projectile {
    /// Enemy being homed on. Resolves to nothing once the enemy is gone.
    pub target: Entity,
    pub payload: ProjectilePayload,
    /// Travel speed (units/s).
    pub speed: f64,
}

/// Advance all projectiles one tick.
pub fn run(
    world: &mut World,
    dt: f64,
    now: f64,
    economy: &mut dyn EconomyLedger,
    events: &mut Vec<GameEvent>,
) {
    let flying: Vec<(Entity, Projectile, Position)> = {
        let mut query = world.query::<(&Projectile, &Position)>();
        query
            .iter()
            .map(|(entity, (projectile, pos))| (entity, *projectile, *pos))
            .collect()
    };

    for (entity, projectile, pos) in flying {
        let target_pos = world.get::<&Position>(projectile.target).map(|p| *p).ok();
        let Some(target_pos) = target_pos else {
            // Target gone mid-flight
            let _ = world.despawn(entity);
            continue;
        };

        if pos.distance_to(&target_pos) < PROJECTILE_HIT_DISTANCE {
            resolve_hit(
                world,
                projectile.target,
                target_pos,
                &projectile.payload,
                now,
                economy,
                events,
            );
            let _ = world.despawn(entity);
            continue;
        }

        let next = pos.step_toward(&target_pos, projectile.speed * dt);
        if let Ok(mut p) = world.get::<&mut Position>(entity) {
            *p = next;
        }
    }
}

/// Damage the primary target, then apply the payload's area skill around `hit_point`.
pub fn resolve_hit(
    world: &mut World,
    primary: Entity,
    hit_point: Position,
    payload: &ProjectilePayload,
    now: f64,
    economy: &mut dyn EconomyLedger,
    events: &mut Vec<GameEvent>,
) {
    apply_damage(world, primary, payload.damage as f64, economy, events);

    match payload.skill {
        SkillType::Slow => {
            let percent = slow_percent_for_level(payload.skill_value, payload.level);
            let radius = bonus_scaled_radius(SLOW_RADIUS, payload.bonus, MaxLevelBonus::SlowRange);
            for (enemy, _) in enemies_within(world, hit_point, radius) {
                if let Ok((mobility, slow)) =
                    world.query_one_mut::<(&mut Mobility, &mut SlowEffect)>(enemy)
                {
                    apply_slow(mobility, slow, percent, SLOW_DURATION_SECS, now);
                }
            }
        }
        SkillType::Splash => {
            let damage = scaled_damage(payload.damage, payload.skill_value);
            let radius =
                bonus_scaled_radius(SPLASH_RADIUS, payload.bonus, MaxLevelBonus::SplashRange);
            for (enemy, _) in enemies_within(world, hit_point, radius) {
                if enemy != primary {
                    apply_damage(world, enemy, damage as f64, economy, events);
                }
            }
        }
        SkillType::Chain => {
            let links = chain_count(payload.skill_value, payload.bonus);
            let mut hit = vec![primary];
            let mut from = hit_point;
            let mut damage = first_chain_damage(payload.damage);
            for _ in 0..links {
                let Some((next, next_pos)) = nearest_enemy(world, from, CHAIN_RADIUS, &hit) else {
                    break;
                };
                apply_damage(world, next, damage as f64, economy, events);
                hit.push(next);
                from = next_pos;
                damage = next_chain_damage(damage);
            }
        }
        SkillType::None
        | SkillType::AreaDamage
        | SkillType::BuffDamage
        | SkillType::BuffSpeed => {}
    }
}
