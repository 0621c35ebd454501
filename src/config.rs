//! Race configuration.
//!
//! A race is configured once, when the lap timer is initialized. The
//! configuration is handed to the timer explicitly by whoever drives it;
//! there is no process-wide settings store.

use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::path::Path;
use thiserror::Error;

/// Errors raised while building or loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("A race needs at least one lap (got {0})")]
    InvalidLapCount(u32),

    #[error("Lap key and bonus key must differ (both are {key:?})")]
    KeyCollision { key: char },

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to open configuration file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Settings of a single race.
///
/// # Example
///
/// ```rust
/// use lapcount::config::RaceConfig;
///
/// let config = RaceConfig::from_json(r#"{ "lap_count": 3, "has_bonus_checkpoint": true }"#)
///     .unwrap();
/// assert_eq!(config.lap_count, 3);
/// assert!(config.has_bonus_checkpoint);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceConfig {
    /// Number of laps required to finish.
    pub lap_count: u32,
    /// Whether the bonus checkpoint is part of this race.
    #[serde(default)]
    pub has_bonus_checkpoint: bool,
}

impl RaceConfig {
    /// Build a validated configuration.
    pub fn new(lap_count: u32, has_bonus_checkpoint: bool) -> Result<Self, ConfigError> {
        let config = Self {
            lap_count,
            has_bonus_checkpoint,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lap_count == 0 {
            return Err(ConfigError::InvalidLapCount(self.lap_count));
        }
        Ok(())
    }

    /// Decode and validate a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, decode and validate a JSON configuration file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let fh = OpenOptions::new()
            .read(true)
            .open(path)
            .map_err(|source| ConfigError::Io {
                path: path.display().to_string(),
                source,
            })?;

        let config: Self = serde_json::from_reader(&fh)?;
        config.validate()?;
        Ok(config)
    }
}
