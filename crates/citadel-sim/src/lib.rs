//! Simulation engine for CITADEL.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate,
//! and produces GameStateSnapshots for the host.

pub mod config;
pub mod damage;
pub mod economy;
pub mod engine;
pub mod merge;
pub mod registry;
pub mod schedule;
pub mod shop;
pub mod spatial;
pub mod systems;
pub mod world_setup;

pub use citadel_core as core;
pub use engine::SimulationEngine;
