//! Configuration module for mediapick
//!
//! Manages host settings: picker root, capability tier, output and logging.
//! Configuration is stored in the user's config directory and can be
//! overridden with `MEDIAPICK_*` environment variables, using `__` to reach
//! nested keys (`MEDIAPICK_DIAGNOSTICS__CAPACITY=50`).
//!
//! The per-workflow picker policies are fixed and not part of this file.

use crate::permission::CapabilityTier;
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "mediapick";
const ENV_PREFIX: &str = "MEDIAPICK";

/// Path display format
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PathFormat {
    /// Display absolute paths
    #[default]
    Absolute,
    /// Display relative paths (relative to current directory)
    Relative,
}

/// Settings for the in-memory log ring and its export
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct DiagnosticsConfig {
    /// Records kept in the ring
    pub capacity: usize,

    /// Targets recorded at every level, not only WARN and above
    pub verbose_targets: Vec<String>,

    /// File name of the exported log inside the cache directory
    pub file_name: String,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            capacity: 100,
            verbose_targets: vec!["mediapick::surface".to_string()],
            file_name: "logcat.txt".to_string(),
        }
    }
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// Directory the picker enumerates; the home directory when unset
    pub root: Option<PathBuf>,

    /// Permission model the gate follows
    pub capability_tier: CapabilityTier,

    /// Default format for displaying paths (absolute or relative)
    pub path_format: PathFormat,

    /// Suppress informational output by default
    pub quiet: bool,

    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,

    pub diagnostics: DiagnosticsConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            root: None,
            capability_tier: CapabilityTier::default(),
            path_format: PathFormat::default(),
            quiet: false,
            log_level: "warn".to_string(),
            diagnostics: DiagnosticsConfig::default(),
        }
    }
}

impl AppConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join(APP_DIR).join("config.toml"))
    }

    /// Directory the exported log is written to
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system cache directory cannot be determined.
    pub fn cache_dir() -> Result<PathBuf, ConfigError> {
        dirs::cache_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| ConfigError::Message("Could not determine cache directory".to_string()))
    }

    /// Load configuration from the default location, creating it if it doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let default_config = Self::default();
            default_config.save_to(&config_path)?;
        }

        Self::from_sources(&config_path, Environment::with_prefix(ENV_PREFIX))
    }

    /// Load configuration from an explicit file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file does not exist or cannot be parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::Message(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        Self::from_sources(path, Environment::with_prefix(ENV_PREFIX))
    }

    fn from_sources(path: &Path, env: Environment) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .add_source(env.prefix_separator("_").separator("__").try_parsing(true))
            .build()?;

        settings.try_deserialize()
    }

    /// Save configuration to file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, config_path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = self.to_toml()?;

        fs::write(config_path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Configuration rendered as TOML
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))
    }

    /// Directory the picker enumerates
    #[must_use]
    pub fn picker_root(&self) -> PathBuf {
        self.root
            .clone()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
