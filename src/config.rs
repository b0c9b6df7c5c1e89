//! TOML configuration: initial option values and startup command lines.
//!
//! ```toml
//! log_filter = "pms=debug"
//! startup = ["bind list <C-d> cursor +10"]
//!
//! [options]
//! wrapscroll = true
//! volumestep = 2
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::options::OptionValue;

/// Bindings every session starts with. Configured startup lines run after
/// these and may unbind them.
pub const DEFAULT_STARTUP: &[&str] = &[
    "bind global q quit",
    "bind global <C-c> quit",
    "bind list j cursor down",
    "bind list k cursor up",
    "bind list <down> cursor down",
    "bind list <up> cursor up",
    "bind list gg cursor home",
    "bind list G cursor end",
    "bind list <home> cursor home",
    "bind list <end> cursor end",
    "bind list <C-j> cursor current",
    "bind list <space> select toggle",
    "bind list v select visual",
    "bind list <esc> select clear",
    "bind list <C-a> select all",
    "bind list x cut",
    "bind list y yank",
    "bind list p paste after",
    "bind list P paste before",
    "bind list <enter> play cursor",
    "bind global c pause",
    "bind global s stop",
    "bind global b prev",
    "bind global n next",
    "bind global + volume +",
    "bind global - volume -",
    "bind global <left> seek -",
    "bind global <right> seek +",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file {path} failed")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse config file failed")]
    Parse {
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_filter: Option<String>,
    pub options: BTreeMap<String, OptionValue>,
    pub startup: Vec<String>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|source| ConfigError::Parse { source })
    }

    /// `pms/config.toml` under the per-user config directory.
    pub fn default_path() -> PathBuf {
        user_config_dir().join("pms").join("config.toml")
    }
}

fn user_config_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA")
            .map(PathBuf::from)
            .unwrap_or_else(std::env::temp_dir)
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(std::env::temp_dir)
            .join("Library")
            .join("Application Support")
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    {
        if let Some(config_home) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
            return config_home;
        }
        std::env::var_os("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(std::env::temp_dir)
            .join(".config")
    }
}
