//! Configuration handling for lazy-todo
//!
//! Configuration is stored in `~/.config/lazy-todo/config.toml` (or the
//! platform equivalent). Every field is optional.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::GroupBy;

/// Default name of the task file
pub const TASK_FILE_NAME: &str = "tasks.yaml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// View shown at startup
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum DefaultView {
    #[default]
    List,
    Kanban,
}

/// Global user configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Editor command for opening the task file
    pub editor: Option<String>,

    /// View shown at startup
    pub default_view: DefaultView,

    /// Grouping applied to both views at startup
    pub default_group_by: GroupBy,

    /// Event poll interval in milliseconds
    pub tick_rate_ms: u64,

    /// How long status messages stay visible
    pub message_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            editor: None,
            default_view: DefaultView::List,
            default_group_by: GroupBy::None,
            tick_rate_ms: 250,
            message_timeout_secs: 3,
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "lazy-todo")
}

impl Config {
    /// Returns the config directory
    pub fn config_dir() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns the per-user data directory holding the default task file
    pub fn data_dir() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
    }

    /// Loads configuration from the default location
    pub fn load() -> Result<Self> {
        match Self::config_dir() {
            Some(dir) => Self::load_from(&dir.join("config.toml")),
            None => Ok(Self::default()),
        }
    }

    /// Loads configuration from a specific file, defaulting if it is absent
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(ConfigError::from)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }
}

/// Resolves the task file path.
///
/// An explicit path wins; otherwise `tasks.yaml` in `cwd` if it exists;
/// otherwise `tasks.yaml` in the data directory; otherwise a relative
/// `tasks.yaml`.
pub fn resolve_task_path(explicit: Option<PathBuf>, cwd: &Path, data_dir: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path;
    }

    let local = cwd.join(TASK_FILE_NAME);
    if local.is_file() {
        return local;
    }

    match data_dir {
        Some(dir) => dir.join(TASK_FILE_NAME),
        None => PathBuf::from(TASK_FILE_NAME),
    }
}
