//! Engine configuration, loadable from TOML.
//!
//! Starting money and health resolve in order: explicit config value, then the
//! level's own override, then the built-in constants.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use citadel_core::constants::{INITIAL_HEALTH, INITIAL_MONEY};
use citadel_level::{default_level, LevelData, LevelError};

/// Highest accepted time scale.
pub const MAX_TIME_SCALE: f64 = 4.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config toml: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("time scale {0} outside 0..=4")]
    InvalidTimeScale(f64),
    #[error("initial health must be positive, got {0}")]
    InvalidInitialHealth(i32),
    #[error("initial money must not be negative, got {0}")]
    NegativeInitialMoney(i64),
    #[error(transparent)]
    Level(#[from] LevelError),
}

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Initial time scale (1.0 = normal).
    pub time_scale: f64,
    pub initial_money: Option<i64>,
    pub initial_health: Option<i32>,
    /// Level to play. The built-in level when absent.
    pub level: Option<LevelData>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
            initial_money: None,
            initial_health: None,
            level: None,
        }
    }
}

impl SimConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=MAX_TIME_SCALE).contains(&self.time_scale) {
            return Err(ConfigError::InvalidTimeScale(self.time_scale));
        }
        let level = self.resolve_level();
        if let Some(health) = self.initial_health.or(level.initial_health) {
            if health <= 0 {
                return Err(ConfigError::InvalidInitialHealth(health));
            }
        }
        if let Some(money) = self.initial_money.or(level.initial_money) {
            if money < 0 {
                return Err(ConfigError::NegativeInitialMoney(money));
            }
        }
        level.validate()?;
        Ok(())
    }

    /// The configured level, or the built-in one.
    pub fn resolve_level(&self) -> LevelData {
        self.level.clone().unwrap_or_else(default_level)
    }

    pub fn starting_money(&self, level: &LevelData) -> i64 {
        self.initial_money
            .or(level.initial_money)
            .unwrap_or(INITIAL_MONEY)
    }

    pub fn starting_health(&self, level: &LevelData) -> i32 {
        self.initial_health
            .or(level.initial_health)
            .unwrap_or(INITIAL_HEALTH)
    }
}
