use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use decide_core::AutoSaveConfig;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the saved-item JSON files
    pub data_dir: PathBuf,
    /// Auto-save quiet period in milliseconds
    pub autosave_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            data_dir: home.join(".decide"),
            autosave_delay_ms: 1500,
        }
    }
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        // Start with defaults
        let mut config = Self::default();

        // Try to load from config file
        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            config = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;
        }

        // Apply environment variable overrides
        if let Ok(data_dir) = std::env::var("DECIDE_DATA_DIR") {
            config.data_dir = PathBuf::from(data_dir);
        }
        if let Ok(delay) = std::env::var("DECIDE_AUTOSAVE_DELAY_MS") {
            if let Ok(ms) = delay.parse() {
                config.autosave_delay_ms = ms;
            }
        }

        Ok(config)
    }

    /// Default config file path: ~/.config/decide/config.yaml
    pub fn default_config_path() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".config").join("decide").join("config.yaml")
    }

    /// Auto-save timing for screens that embed an
    /// [`decide_core::AutoSaveController`].
    pub fn autosave_config(&self) -> AutoSaveConfig {
        AutoSaveConfig {
            delay: Duration::from_millis(self.autosave_delay_ms),
            ..AutoSaveConfig::default()
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
