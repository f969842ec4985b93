//! YAML storage for tasks
//!
//! Tasks are stored in a single YAML document (`tasks: [...]`). Every mutation
//! is a whole-file read-modify-write: load the document, change it in memory,
//! write it to a temp file and rename it over the original.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::editor;
use super::{Repository, StorageError};
use crate::domain::{Task, TaskId};

/// Root of the YAML document
#[derive(Debug, Default, Serialize, Deserialize)]
struct TaskFile {
    #[serde(default)]
    tasks: Option<Vec<Task>>,
}

/// Store for task data in a single YAML file
pub struct YamlStore {
    path: PathBuf,
    editor: Option<String>,
}

impl YamlStore {
    /// Creates a new store at the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            editor: None,
        }
    }

    /// Sets an editor command that takes precedence over the environment
    pub fn with_editor(mut self, editor: Option<String>) -> Self {
        self.editor = editor;
        self
    }

    /// Reads all tasks, treating a missing file as an empty collection
    fn read_all(&self) -> Result<Vec<Task>, StorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let file: TaskFile =
            serde_yaml::from_str(&content).map_err(|source| StorageError::Parse {
                path: self.path.clone(),
                source,
            })?;

        Ok(file.tasks.unwrap_or_default())
    }

    /// Writes all tasks to the store (full rewrite)
    fn write_all(&self, tasks: &[Task]) -> Result<(), StorageError> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StorageError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let file = TaskFile {
            tasks: Some(tasks.to_vec()),
        };
        let content = serde_yaml::to_string(&file).map_err(StorageError::Serialize)?;

        // Write to temp file first
        let temp_path = self.path.with_extension("yaml.tmp");
        fs::write(&temp_path, content).map_err(|source| StorageError::Write {
            path: temp_path.clone(),
            source,
        })?;

        // Atomic rename
        fs::rename(&temp_path, &self.path).map_err(|source| StorageError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

fn position_of(tasks: &[Task], id: &TaskId) -> Option<usize> {
    tasks.iter().position(|t| &t.id == id)
}

impl Repository for YamlStore {
    fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<Task>, StorageError> {
        self.read_all()
    }

    fn add_task(&self, task: Task) -> Result<Vec<Task>, StorageError> {
        let mut tasks = self.read_all()?;
        tasks.push(task);
        self.write_all(&tasks)?;
        Ok(tasks)
    }

    fn update_task(&self, mut task: Task) -> Result<Vec<Task>, StorageError> {
        let mut tasks = self.read_all()?;
        let Some(pos) = position_of(&tasks, &task.id) else {
            return Ok(tasks);
        };

        task.touch();
        tasks[pos] = task;
        self.write_all(&tasks)?;
        Ok(tasks)
    }

    fn delete_task(&self, id: &TaskId) -> Result<Vec<Task>, StorageError> {
        let mut tasks = self.read_all()?;
        let before = tasks.len();
        tasks.retain(|t| &t.id != id);
        if tasks.len() != before {
            self.write_all(&tasks)?;
        }
        Ok(tasks)
    }

    fn open_in_editor(&self) -> Result<(), StorageError> {
        editor::open(&self.path, self.editor.as_deref())
    }
}
