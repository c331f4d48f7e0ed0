use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use bevy::log::{error, info, warn};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_HISTORY_CAPACITY, DEFAULT_LOG_FILTER, MAX_HISTORY_CAPACITY};

fn default_history_capacity() -> usize {
    DEFAULT_HISTORY_CAPACITY.get()
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

/// Session configuration persisted to disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfigData {
    /// Maximum number of commands kept for undo
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,

    /// `tracing` env-filter directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for AppConfigData {
    fn default() -> Self {
        Self {
            history_capacity: default_history_capacity(),
            log_filter: default_log_filter(),
        }
    }
}

impl AppConfigData {
    /// The configured history capacity, falling back to the default for 0
    /// and clamped to [`MAX_HISTORY_CAPACITY`]
    pub fn capacity(&self) -> NonZeroUsize {
        match NonZeroUsize::new(self.history_capacity.min(MAX_HISTORY_CAPACITY)) {
            Some(capacity) => capacity,
            None => {
                warn!("history_capacity must be at least 1, using default");
                DEFAULT_HISTORY_CAPACITY
            }
        }
    }
}

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// The persisted configuration data
    pub data: AppConfigData,
    /// Path to the config file
    pub config_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: AppConfigData::default(),
            config_path: crate::paths::config_file(),
        }
    }
}

/// Result of loading config from disk
pub struct LoadConfigResult {
    pub config: AppConfig,
    /// Error message if config was reset to defaults due to an error
    pub reset_reason: Option<String>,
}

/// Load configuration from `config_path`, using defaults when it's missing or broken
pub fn load_config(config_path: &Path) -> LoadConfigResult {
    let (data, reset_reason) = if config_path.exists() {
        match std::fs::read_to_string(config_path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(data) => {
                    info!("Loaded config from {:?}", config_path);
                    (data, None)
                }
                Err(e) => {
                    warn!("Failed to parse config file: {}", e);
                    (
                        AppConfigData::default(),
                        Some(format!("Configuration file was corrupted: {}", e)),
                    )
                }
            },
            Err(e) => {
                warn!("Failed to read config file: {}", e);
                (
                    AppConfigData::default(),
                    Some(format!("Could not read configuration file: {}", e)),
                )
            }
        }
    } else {
        info!("No config file found, using defaults");
        (AppConfigData::default(), None)
    };

    LoadConfigResult {
        config: AppConfig {
            data,
            config_path: config_path.to_path_buf(),
        },
        reset_reason,
    }
}

/// Save configuration to disk, returns whether it was written
pub fn save_config(config: &AppConfig) -> bool {
    match serde_json::to_string_pretty(&config.data) {
        Ok(json) => {
            if let Err(e) = std::fs::write(&config.config_path, json) {
                error!("Failed to save config: {}", e);
                false
            } else {
                info!("Config saved to {:?}", config.config_path);
                true
            }
        }
        Err(e) => {
            error!("Failed to serialize config: {}", e);
            false
        }
    }
}
