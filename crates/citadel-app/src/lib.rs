//! CITADEL headless host.
//!
//! Wires the simulation engine to a fixed-rate game loop thread and an
//! unpaced autoplay session used by the `citadel` binary.

pub mod autoplay;
pub mod game_loop;
pub mod state;

pub use citadel_core as core;
