//! Persistent user settings for Effacer
//!
//! Settings are stored in a TOML configuration file at:
//! - Linux/macOS: `~/.config/effacer/effacer_config.toml`
//! - Windows: `%APPDATA%\effacer\effacer_config.toml`
//!
//! # Example Configuration
//!
//! ```toml
//! [log]
//! file = "/var/log/effacer.log"
//! nogui = false
//!
//! [wipe]
//! method = "prng"
//! rounds = 1
//! blank = true
//! verify = "last"
//! ```

use crate::config::{RunOptions, VerifyMode};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration file name
const CONFIG_FILE_NAME: &str = "effacer_config.toml";

/// Application name for config directory
const APP_NAME: &str = "effacer";

/// User settings loaded from configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Log destination settings
    pub log: LogSettings,

    /// Wipe run settings
    pub wipe: WipeSettings,
}

/// Settings for the log destination
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogSettings {
    /// Log file path; empty disables file persistence
    pub file: String,

    /// Run without the interactive UI
    pub nogui: bool,
}

/// Settings for the wipe run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WipeSettings {
    /// Wipe method name (display label)
    pub method: String,

    /// Number of wipe rounds
    pub rounds: u32,

    /// Run a final blanking pass
    pub blank: bool,

    /// Verification mode: "off", "last", or "all"
    pub verify: String,
}

impl Default for WipeSettings {
    fn default() -> Self {
        Self {
            method: "prng".to_string(),
            rounds: 1,
            blank: true,
            verify: "last".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from the configuration file
    ///
    /// Returns default settings if the file doesn't exist or can't be parsed
    pub fn load() -> Self {
        Self::load_from_path(Self::config_path())
    }

    /// Load settings from a specific path
    pub fn load_from_path(path: Option<PathBuf>) -> Self {
        let Some(path) = path else {
            tracing::debug!("No config path available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!("Config file not found at {:?}, using defaults", path);
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(settings) => {
                    tracing::debug!("Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config file {:?}: {}", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config file {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Save settings to the configuration file
    pub fn save(&self) -> Result<PathBuf, SettingsError> {
        self.save_to_path(Self::config_path())
    }

    /// Save settings to a specific path
    pub fn save_to_path(&self, path: Option<PathBuf>) -> Result<PathBuf, SettingsError> {
        let path = path.ok_or(SettingsError::NoConfigDir)?;

        // Create parent directory if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| SettingsError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let contents = toml::to_string_pretty(self).map_err(SettingsError::Serialize)?;

        std::fs::write(&path, contents).map_err(|e| SettingsError::Io {
            path: path.clone(),
            source: e,
        })?;

        tracing::info!("Saved settings to {:?}", path);
        Ok(path)
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Option<PathBuf> {
        dirs_next::config_dir().map(|p| p.join(APP_NAME).join(CONFIG_FILE_NAME))
    }

    /// Bridge the persisted settings to the runtime options the core consumes
    ///
    /// An unrecognized `verify` value falls back to no verification with a
    /// diagnostic; the round count is clamped to at least 1.
    pub fn to_run_options(&self) -> RunOptions {
        let verify_mode = match self.wipe.verify.as_str() {
            "off" => VerifyMode::None,
            "last" => VerifyMode::Last,
            "all" => VerifyMode::All,
            other => {
                tracing::warn!("Unknown verify mode '{other}' in settings, verification disabled");
                VerifyMode::None
            }
        };

        let mut options = RunOptions::new()
            .no_gui(self.log.nogui)
            .blanking(self.wipe.blank)
            .verify_mode(verify_mode)
            .rounds(self.wipe.rounds)
            .method_label(self.wipe.method.clone());
        if !self.log.file.is_empty() {
            options = options.log_file(&self.log.file);
        }
        options
    }
}

/// Errors that can occur when working with settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// No configuration directory available
    #[error("Could not determine configuration directory")]
    NoConfigDir,

    /// Failed to read or write config file
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path that caused the error
        path: PathBuf,
        /// The underlying error
        source: std::io::Error,
    },

    /// Failed to serialize settings
    #[error("Failed to serialize settings: {0}")]
    Serialize(toml::ser::Error),
}
