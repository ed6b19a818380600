//! Combat and progression rules for CITADEL.
//!
//! Enemy stat scaling, the tower merge/level state machine, slow-effect
//! resolution, and on-hit skill parameters. Pure functions over plain
//! component data. No ECS dependency.

pub mod enemy;
pub mod leveling;
pub mod skills;
pub mod slow;

pub use citadel_core as core;

#[cfg(test)]
mod tests;
