//! # Storage Layer
//!
//! Persistence for lazy-todo.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Tasks | YAML (`tasks: [...]`) | `./tasks.yaml` or `<data dir>/lazy-todo/tasks.yaml` |
//! | Config | TOML | `<config dir>/lazy-todo/config.toml` |
//!
//! ## Write Semantics
//!
//! - Every mutation reloads the whole file, changes it in memory and
//!   rewrites it (temp file + rename)
//! - A missing task file is an empty collection, not an error
//! - Concurrent external edits are not detected; last writer wins
//!
//! ## Key Types
//!
//! - [`Repository`] - The load/add/update/delete boundary the TUI talks to
//! - [`YamlStore`] - File-backed [`Repository`]
//! - [`Config`] - User configuration

mod config;
pub mod editor;
mod yaml;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::{Task, TaskId};

pub use config::{resolve_task_path, Config, ConfigError, DefaultView, TASK_FILE_NAME};
pub use yaml::YamlStore;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Failed to serialize tasks: {0}")]
    Serialize(serde_yaml::Error),

    #[error("Failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to run editor '{editor}': {source}")]
    Editor {
        editor: String,
        source: std::io::Error,
    },

    #[error("Editor '{editor}' exited with code {code:?}")]
    EditorExit { editor: String, code: Option<i32> },
}

/// Authoritative task collection backed by durable storage.
///
/// Every mutation returns the complete, up-to-date collection.
pub trait Repository: Send + Sync {
    /// Path of the backing file
    fn path(&self) -> &Path;

    /// Loads all tasks
    fn load(&self) -> Result<Vec<Task>, StorageError>;

    /// Appends a task
    fn add_task(&self, task: Task) -> Result<Vec<Task>, StorageError>;

    /// Replaces the task with the same id and refreshes its update time.
    /// Unknown ids leave storage unchanged.
    fn update_task(&self, task: Task) -> Result<Vec<Task>, StorageError>;

    /// Removes the task with `id`; unknown ids leave storage unchanged
    fn delete_task(&self, id: &TaskId) -> Result<Vec<Task>, StorageError>;

    /// Opens the backing file in the user's editor, blocking until it exits
    fn open_in_editor(&self) -> Result<(), StorageError>;
}
