//! Configuration loading and saving.
//!
//! Handles:
//! - The exclusive label string (replaced as a whole, never edited in place)
//! - Gate options
//! - Log level
//!
//! Values come from a TOML file, then `EXLABEL_*` environment overrides.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use exlabel_admission::{ExclusiveRegistry, GateOptions};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration file name.
const CONFIG_FILE: &str = "config.toml";

/// Environment override for the exclusive label string.
pub const ENV_EXCLUSIVE_LABELS: &str = "EXLABEL_EXCLUSIVE_LABELS";

/// Environment override for the log level.
pub const ENV_LOG_LEVEL: &str = "EXLABEL_LOG_LEVEL";

/// Default config file path in the platform config directory.
pub fn default_path() -> Result<PathBuf, ConfigError> {
    ProjectDirs::from("dev", "exlabel", "exlabelctl")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
        .ok_or(ConfigError::NoConfigDir)
}

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Space-separated exclusive labels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusive_labels: Option<String>,

    /// Reject when the requirement text does not name the worker's exclusive label.
    #[serde(default)]
    pub require_name_mention: bool,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            exclusive_labels: None,
            require_name_mention: false,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load config from `path`, or return the default if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply `EXLABEL_*` overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(labels) = lookup(ENV_EXCLUSIVE_LABELS) {
            self.exclusive_labels = Some(labels);
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = level;
        }
        self
    }

    /// Save config to `path`, replacing the file atomically.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        let write_err = |source: std::io::Error| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(write_err)?;
        }

        let tmp = path.with_extension("toml.tmp");
        fs::write(&tmp, contents).map_err(write_err)?;
        fs::rename(&tmp, path).map_err(write_err)?;
        Ok(())
    }

    /// The exclusive label registry described by this config.
    pub fn registry(&self) -> ExclusiveRegistry {
        ExclusiveRegistry::from_config(self.exclusive_labels.as_deref())
    }

    pub fn gate_options(&self) -> GateOptions {
        GateOptions {
            require_name_mention: self.require_name_mention,
        }
    }
}
