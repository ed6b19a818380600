//! Enemy movement system: slow expiry, waypoint following, and base breaches.

use hecs::{Entity, World};
use tracing::{debug, warn};

use citadel_core::components::{Enemy, Mobility, PathFollower, SlowEffect};
use citadel_core::constants::{BREACH_DAMAGE, WAYPOINT_REACH_DISTANCE};
use citadel_core::enums::EnemyKind;
use citadel_core::events::GameEvent;
use citadel_core::types::Position;
use citadel_rules::slow;

use crate::economy::EconomyLedger;

/// Move every enemy one tick along its path. `now` is the sim time in seconds.
pub fn run(
    world: &mut World,
    dt: f64,
    now: f64,
    economy: &mut dyn EconomyLedger,
    events: &mut Vec<GameEvent>,
) {
    let mut breached: Vec<(Entity, EnemyKind)> = Vec::new();
    let mut stranded: Vec<Entity> = Vec::new();

    for (entity, (enemy, pos, mobility, slow_effect, path)) in world.query_mut::<(
        &Enemy,
        &mut Position,
        &mut Mobility,
        &mut SlowEffect,
        &mut PathFollower,
    )>() {
        slow::tick_recovery(mobility, slow_effect, now);

        if path.waypoints.is_empty() {
            stranded.push(entity);
            continue;
        }

        let Some(target) = path.waypoints.get(path.next_index).copied() else {
            breached.push((entity, enemy.kind));
            continue;
        };

        if pos.distance_to(&target) < WAYPOINT_REACH_DISTANCE {
            path.next_index += 1;
            if path.next_index >= path.waypoints.len() {
                breached.push((entity, enemy.kind));
            }
        } else {
            *pos = pos.step_toward(&target, mobility.current_speed * dt);
        }
    }

    for (entity, kind) in breached {
        let base_health = economy.breach(BREACH_DAMAGE);
        debug!(?kind, base_health, "base breached");
        events.push(GameEvent::BaseBreached { kind, base_health });
        let _ = world.despawn(entity);
    }

    for entity in stranded {
        warn!(?entity, "enemy has no path, removing");
        let _ = world.despawn(entity);
    }
}
