//! Typed explorer configuration.
//!
//! Every interactive component takes explicit option fields rather than a
//! string-keyed widget registry. The whole bundle can be loaded from a TOML
//! file (`~/.config/modex/config.toml` or the platform equivalent); every
//! field defaults, so an absent or partial file works.
//!
//! # Example Configuration
//!
//! ```toml
//! [selector]
//! rows = 15
//! hide_restarts = false
//!
//! [experiment_list]
//! rows = 25
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading explorer configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("could not determine config directory")]
    NoConfigDir,
}

/// Root configuration for the explorer surfaces.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExplorerConfig {
    #[serde(default)]
    pub selector: SelectorOptions,
    #[serde(default)]
    pub experiment_list: ListOptions,
}

/// Options for the variable selector combo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorOptions {
    /// Rows shown in the variable select box.
    #[serde(default = "default_selector_rows")]
    pub rows: usize,
    #[serde(default = "default_search_placeholder")]
    pub search_placeholder: String,
    /// Initial state of the "Hide coordinates" checkbox.
    #[serde(default = "default_true")]
    pub hide_coordinates: bool,
    /// Initial state of the "Hide restarts" checkbox.
    #[serde(default = "default_true")]
    pub hide_restarts: bool,
}

impl Default for SelectorOptions {
    fn default() -> Self {
        Self {
            rows: default_selector_rows(),
            search_placeholder: default_search_placeholder(),
            hide_coordinates: true,
            hide_restarts: true,
        }
    }
}

/// Options for the experiment select list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListOptions {
    #[serde(default = "default_list_rows")]
    pub rows: usize,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            rows: default_list_rows(),
        }
    }
}

fn default_selector_rows() -> usize {
    10
}

fn default_list_rows() -> usize {
    20
}

fn default_search_placeholder() -> String {
    "Search: start typing".to_string()
}

fn default_true() -> bool {
    true
}

impl ExplorerConfig {
    /// Platform config file location.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        ProjectDirs::from("", "", "modex")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or(ConfigError::NoConfigDir)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    /// A missing file falls back to defaults; a malformed file is an error.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(path)
    }
}
