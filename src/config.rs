//! Game configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Upper bound for `celebration.confetti_pieces`.
pub const MAX_CONFETTI_PIECES: usize = 5_000;

/// Upper bound for `celebration.fireworks`.
pub const MAX_FIREWORKS: usize = 32;

/// Top-level configuration. Every key is optional.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seconds between a finished game and the automatic reset.
    auto_reset_secs: u64,

    /// End-of-game effect settings.
    celebration: CelebrationConfig,
}

/// Confetti and fireworks settings.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct CelebrationConfig {
    /// Show the effect at all.
    enabled: bool,

    /// Confetti pieces spawned per celebration.
    confetti_pieces: usize,

    /// Firework bursts per celebration.
    fireworks: usize,

    /// Downward acceleration, in cells per tick squared.
    gravity: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            auto_reset_secs: 4,
            celebration: CelebrationConfig::default(),
        }
    }
}

impl Default for CelebrationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            confetti_pieces: 200,
            fireworks: 3,
            gravity: 0.3,
        }
    }
}

impl GameConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(auto_reset_secs = config.auto_reset_secs, "Config loaded successfully");
        Ok(config)
    }

    /// Parses and validates configuration from a TOML string.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the file if it exists, defaults otherwise.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Checks value ranges.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auto_reset_secs == 0 {
            return Err(ConfigError::new("auto_reset_secs must be > 0".to_string()));
        }
        if !(self.celebration.gravity > 0.0) {
            return Err(ConfigError::new(
                "celebration.gravity must be > 0".to_string(),
            ));
        }
        if self.celebration.confetti_pieces > MAX_CONFETTI_PIECES {
            return Err(ConfigError::new(format!(
                "celebration.confetti_pieces must be <= {}",
                MAX_CONFETTI_PIECES
            )));
        }
        if self.celebration.fireworks > MAX_FIREWORKS {
            return Err(ConfigError::new(format!(
                "celebration.fireworks must be <= {}",
                MAX_FIREWORKS
            )));
        }
        Ok(())
    }

    /// Auto-reset delay as a `Duration`.
    pub fn auto_reset_delay(&self) -> Duration {
        Duration::from_secs(self.auto_reset_secs)
    }

    /// Default configuration rendered as TOML.
    pub fn default_toml() -> Result<String, ConfigError> {
        toml::to_string_pretty(&Self::default())
            .map_err(|e| ConfigError::new(format!("Failed to render config: {}", e)))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
