//! Damage application against enemy entities.

use hecs::{Entity, World};
use tracing::debug;

use citadel_core::components::{Bounty, Enemy, Health};
use citadel_core::events::GameEvent;

use crate::economy::EconomyLedger;

/// What a single damage application did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Target was already gone. Nothing changed.
    Missed,
    Hit { dealt: u32 },
    Killed { dealt: u32, reward: u32 },
}

/// Floor `damage` to an integer and subtract it from the target's hp.
///
/// On reaching zero hp the kill reward is credited and the entity is despawned
/// immediately, so a second application resolves to `Missed` and never pays twice.
pub fn apply_damage(
    world: &mut World,
    entity: Entity,
    damage: f64,
    economy: &mut dyn EconomyLedger,
    events: &mut Vec<GameEvent>,
) -> DamageOutcome {
    let amount = if damage.is_finite() && damage > 0.0 {
        damage.floor() as u32
    } else {
        0
    };

    let (dealt, killed) = {
        let Ok(mut health) = world.get::<&mut Health>(entity) else {
            return DamageOutcome::Missed;
        };
        if health.hp == 0 {
            return DamageOutcome::Missed;
        }
        let dealt = amount.min(health.hp);
        health.hp -= dealt;
        (dealt, health.hp == 0)
    };

    economy.record_damage(dealt);
    if !killed {
        return DamageOutcome::Hit { dealt };
    }

    let reward = world.get::<&Bounty>(entity).map(|b| b.kill_reward).unwrap_or(0);
    let kind = world.get::<&Enemy>(entity).map(|e| e.kind).unwrap_or_default();
    economy.credit_reward(reward);
    let _ = world.despawn(entity);

    debug!(?kind, reward, "enemy killed");
    events.push(GameEvent::EnemyKilled { kind, reward });

    DamageOutcome::Killed { dealt, reward }
}
