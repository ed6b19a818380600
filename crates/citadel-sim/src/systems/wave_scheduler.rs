//! Wave scheduling system: advances the scheduler and spawns its enemies.

use hecs::World;
use tracing::info;

use citadel_core::events::GameEvent;
use citadel_core::types::Position;

use crate::schedule::{SchedulerTick, WaveScheduler};
use crate::spatial::live_enemy_count;
use crate::world_setup;

/// Advance the scheduler by `dt` and spawn anything it asks for.
pub fn run(
    world: &mut World,
    scheduler: &mut WaveScheduler,
    waypoints: &[Position],
    dt: f64,
    events: &mut Vec<GameEvent>,
) -> SchedulerTick {
    let live = live_enemy_count(world);
    let tick = scheduler.tick(dt, live);

    if let Some(config) = tick.wave_started {
        info!(
            wave = config.wave,
            kind = ?config.enemy_kind,
            count = config.enemy_count,
            "wave started"
        );
        events.push(GameEvent::WaveStarted {
            wave: config.wave,
            kind: config.enemy_kind,
            count: config.enemy_count,
        });
    }

    if let Some(kind) = tick.spawn {
        world_setup::spawn_enemy(world, kind, scheduler.current_wave(), waypoints);
    }

    tick
}
