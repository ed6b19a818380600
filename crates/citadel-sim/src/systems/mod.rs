//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are plain functions that take `&mut World` (or `&World` for read-only).
//! They do not own state. All state lives in components, the economy, and the scheduler.

pub mod enemy_movement;
pub mod projectile;
pub mod snapshot;
pub mod tower_combat;
pub mod wave_scheduler;
