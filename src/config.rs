use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::models::Theme;

const CONFIG_ENV: &str = "FRONTEND_GUIDE_CONFIG";
const DEFAULT_CONFIG_NAME: &str = "config.json";
const DEFAULT_LOG_FILTER: &str = "warn";

/// User preferences read at startup. Never written back.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: Theme,
    /// Open the interview filter panel when the TUI starts
    pub show_filters: bool,
    /// env_logger filter used when RUST_LOG is unset
    pub log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            show_filters: false,
            log: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path())
    }

    // A missing file is not an error, an unreadable or malformed one is
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

pub fn config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        return PathBuf::from(path);
    }

    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("frontend-guide")
        .join(DEFAULT_CONFIG_NAME)
}
