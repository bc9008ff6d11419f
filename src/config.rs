//! User configuration.
//!
//! Loaded from `$XDG_CONFIG_HOME/arithon/config.toml` unless a path is given
//! explicitly. A missing default file is not an error; every key is optional.

use crate::engine::DEFAULT_HISTORY_LIMIT;
use crate::ui::{Layout, Theme};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Maximum number of history entries kept (at least 1).
    pub history_limit: usize,
    pub theme: Theme,
    pub layout: Layout,
    /// Default tracing filter when neither `RUST_LOG` nor `--verbose` is set.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            theme: Theme::default(),
            layout: Layout::default(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Default config file location.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("arithon").join("config.toml"))
    }

    /// Load from `path`, or from the default location when `path` is None.
    ///
    /// An explicit path must exist; the default location may be absent.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::parse(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        debug!(path = %path.display(), ?config, "Loaded config");
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(text)?;
        config.history_limit = config.history_limit.max(1);
        Ok(config)
    }
}
