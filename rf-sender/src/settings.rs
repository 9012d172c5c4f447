//! Application settings

use std::path::PathBuf;

use rf_gpio::{DEFAULT_GPIO_ROOT, DEFAULT_SPIN_THRESHOLD_US};
use rf_sim::VirtualPinConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable naming an explicit settings file
pub const CONFIG_ENV: &str = "RFSEND_CONFIG";

/// Which pin driver to transmit through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DriverKind {
    /// Linux sysfs GPIO
    #[default]
    Sysfs,
    /// Dry run against a virtual pin and clock
    Simulated,
}

/// Errors loading the settings file
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// Pin driver
    #[serde(default)]
    pub driver: DriverKind,
    /// Root of the sysfs GPIO class
    #[serde(default = "default_gpio_root")]
    pub gpio_root: PathBuf,
    /// Busy-wait window at the end of each hold (microseconds)
    #[serde(default = "default_spin_threshold")]
    pub spin_threshold_us: u64,
    /// Tracing filter used when RUST_LOG is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    /// Virtual pin used by the simulated driver
    #[serde(default)]
    pub simulated_pin: VirtualPinConfig,
}

fn default_gpio_root() -> PathBuf {
    PathBuf::from(DEFAULT_GPIO_ROOT)
}

fn default_spin_threshold() -> u64 {
    DEFAULT_SPIN_THRESHOLD_US
}

fn default_log_filter() -> String {
    "rfsend=info,rf_protocol=info,rf_gpio=info,rf_tx=info,rf_sim=info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            driver: DriverKind::default(),
            gpio_root: default_gpio_root(),
            spin_threshold_us: default_spin_threshold(),
            log_filter: default_log_filter(),
            simulated_pin: VirtualPinConfig::default(),
        }
    }
}

impl Settings {
    /// Get the XDG config directory for rfsend
    /// Uses $XDG_CONFIG_HOME/rfsend, falls back to ~/.config/rfsend
    fn config_dir() -> Option<PathBuf> {
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_config);
            if path.is_absolute() {
                return Some(path.join("rfsend"));
            }
        }

        dirs::home_dir().map(|h| h.join(".config").join("rfsend"))
    }

    /// Get the settings file path, honouring $RFSEND_CONFIG
    pub fn settings_path() -> Option<PathBuf> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) if !path.is_empty() => Some(PathBuf::from(path)),
            _ => Self::config_dir().map(|p| p.join("settings.json")),
        }
    }

    /// Load settings from disk
    ///
    /// A missing file yields the defaults; an unreadable or malformed file
    /// is an error so the caller can report it.
    pub fn load() -> Result<Self, SettingsError> {
        match Self::settings_path() {
            Some(path) if path.exists() => Self::load_from(path),
            _ => Ok(Self::default()),
        }
    }

    /// Load settings from a specific file
    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
        let path = path.into();
        let json = std::fs::read_to_string(&path).map_err(|source| SettingsError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| SettingsError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}
