//! Task domain model
//!
//! A task is a single todo item with a priority, a status and free-form tags.
//! Priority and status are closed, ordered sets; their declaration order is the
//! natural order used for grouping and for the kanban columns.

use chrono::{DateTime, FixedOffset, Local};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::id::TaskId;

#[derive(Debug, Error, PartialEq)]
pub enum TaskError {
    #[error("Task title cannot be empty")]
    EmptyTitle,
}

/// Priority of a task, lowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Priority {
    /// All priorities in natural order
    pub const ALL: [Priority; 4] = [
        Priority::Low,
        Priority::Medium,
        Priority::High,
        Priority::Critical,
    ];

    /// Returns a display label
    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Critical => "Critical",
        }
    }

    /// Cycles to the next priority, wrapping from Critical back to Low
    pub fn next(self) -> Self {
        match self {
            Priority::Low => Priority::Medium,
            Priority::Medium => Priority::High,
            Priority::High => Priority::Critical,
            Priority::Critical => Priority::Low,
        }
    }

    /// Position in [`Priority::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Status of a task, in kanban column order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Todo,
    InProgress,
    Blocked,
    Done,
}

impl Status {
    /// All statuses in natural (column) order
    pub const ALL: [Status; 4] = [
        Status::Todo,
        Status::InProgress,
        Status::Blocked,
        Status::Done,
    ];

    /// Returns a display label
    pub fn label(&self) -> &'static str {
        match self {
            Status::Todo => "Todo",
            Status::InProgress => "In Progress",
            Status::Blocked => "Blocked",
            Status::Done => "Done",
        }
    }

    /// Column index of this status
    pub fn index(self) -> usize {
        self as usize
    }

    /// Status for a column index, if in range
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// How a view groups its tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    #[default]
    None,
    Status,
    Priority,
    Tag,
}

impl GroupBy {
    /// Returns a display label
    pub fn label(&self) -> &'static str {
        match self {
            GroupBy::None => "None",
            GroupBy::Status => "Status",
            GroupBy::Priority => "Priority",
            GroupBy::Tag => "Tag",
        }
    }

    /// Cycles to the next grouping mode
    pub fn next(self) -> Self {
        match self {
            GroupBy::None => GroupBy::Status,
            GroupBy::Status => GroupBy::Priority,
            GroupBy::Priority => GroupBy::Tag,
            GroupBy::Tag => GroupBy::None,
        }
    }
}

/// Returns the current local time with its offset
pub fn now() -> DateTime<FixedOffset> {
    Local::now().fixed_offset()
}

/// A single todo item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: TaskId,

    /// Human-readable title
    pub title: String,

    /// Optional longer text
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    pub priority: Priority,

    pub status: Status,

    /// Tags in insertion order, unique within the task
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// When the task was created
    pub created_at: DateTime<FixedOffset>,

    /// When the task was last modified
    pub updated_at: DateTime<FixedOffset>,
}

impl Task {
    /// Creates a new task with default priority and status
    pub fn new(title: &str) -> Result<Self, TaskError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(TaskError::EmptyTitle);
        }

        let now = now();
        Ok(Self {
            id: TaskId::generate(title, now),
            title: title.to_string(),
            description: String::new(),
            priority: Priority::default(),
            status: Status::default(),
            tags: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Refreshes the update timestamp
    pub fn touch(&mut self) {
        self.updated_at = now();
    }

    /// Removes `tag` if present, otherwise appends it.
    ///
    /// Returns true if the tag was added. Blank tags are ignored.
    pub fn toggle_tag(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() {
            return false;
        }
        if let Some(pos) = self.tags.iter().position(|t| t == tag) {
            self.tags.remove(pos);
            false
        } else {
            self.tags.push(tag.to_string());
            true
        }
    }

    /// Returns true if `needle` (already lowercased) occurs in the title,
    /// the description or any tag. An empty needle matches everything.
    pub fn matches(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(needle))
    }

    /// First tag, which is the task's key under tag grouping
    pub fn primary_tag(&self) -> Option<&str> {
        self.tags.first().map(String::as_str)
    }
}

/// Parses a comma-separated tag list, trimming and dropping blanks and duplicates
pub fn parse_tags(input: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in input.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}
