//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// 2D position in world units. Origin is the center of the tile grid,
/// x grows to the right and y grows upward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        self.to_vec().distance(other.to_vec())
    }

    /// Move toward `target` by at most `step` units. Never overshoots.
    pub fn step_toward(&self, target: &Position, step: f64) -> Position {
        let from = self.to_vec();
        let delta = target.to_vec() - from;
        let dist = delta.length();
        if dist <= step || dist <= f64::EPSILON {
            return *target;
        }
        Position::from_vec(from + delta / dist * step)
    }

    pub fn to_vec(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    pub fn from_vec(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl SimTime {
    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f64 {
        crate::constants::DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}
