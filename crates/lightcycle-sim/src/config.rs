use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::grid::{Cell, Direction, GridConfig};

/// Environment variable naming a config file to load first.
pub const CONFIG_ENV_VAR: &str = "LIGHTCYCLE_CONFIG";
/// Fallback config path, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config/lightcycle.toml";

/// Data-driven configuration for one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Ticks per second the host should drive the simulation at.
    pub tick_rate: u32,
    /// Cell size, speed and turn tolerance.
    pub grid: GridConfig,
    /// Where the pawn starts and which way it faces.
    pub start: StartConfig,
}

/// Starting placement of the pawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StartConfig {
    pub cell: Cell,
    pub direction: Direction,
}

impl Default for StartConfig {
    fn default() -> Self {
        Self {
            cell: Cell::new(1, 1),
            direction: Direction::Right,
        }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60,
            grid: GridConfig::default(),
            start: StartConfig::default(),
        }
    }
}

impl SimConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config = toml::from_str::<Self>(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref()).map_err(|source| {
            ConfigError::Read {
                path: path.as_ref().display().to_string(),
                source,
            }
        })?;
        Self::from_toml_str(&contents)
    }

    /// Checks not already enforced by the grid's own constructor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        Ok(())
    }

    /// Wall-clock time between ticks at `tick_rate`.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.tick_rate.max(1)))
    }

    /// Load config from the environment or the default TOML file, falling
    /// back to defaults. Unreadable or invalid files are logged and skipped.
    pub fn load() -> Self {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR)
            && !path.is_empty()
        {
            match Self::from_file(&path) {
                Ok(config) => {
                    tracing::info!(%path, "Loaded simulation config");
                    return config;
                },
                Err(e) => {
                    tracing::warn!(%path, error = %e, "Ignoring simulation config");
                },
            }
        }
        if Path::new(DEFAULT_CONFIG_PATH).exists() {
            match Self::from_file(DEFAULT_CONFIG_PATH) {
                Ok(config) => {
                    tracing::info!(path = DEFAULT_CONFIG_PATH, "Loaded simulation config");
                    return config;
                },
                Err(e) => {
                    tracing::warn!(
                        path = DEFAULT_CONFIG_PATH,
                        error = %e,
                        "Ignoring simulation config"
                    );
                },
            }
        }
        tracing::info!("No simulation config found, using defaults");
        Self::default()
    }
}
