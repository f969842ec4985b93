//! Task identifiers
//!
//! ID Format: `t-{12-char-hash}` (e.g., `t-9d3e5f2a01bc`) for tasks created
//! here. Identifiers read back from disk are opaque and kept verbatim, so a
//! file written by another tool (UUIDs, for example) loads unchanged.
//!
//! Hash is derived from title + creation timestamp + a process-local counter,
//! so two tasks with the same title created in the same instant still differ.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Generates a 12-character hash from title, timestamp and sequence
fn generate_hash(title: &str, timestamp: DateTime<FixedOffset>) -> String {
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    let input = format!(
        "{}{}{}",
        title,
        timestamp.timestamp_nanos_opt().unwrap_or(0),
        seq
    );
    let hash = blake3::hash(input.as_bytes());
    hash.to_hex()[..12].to_string()
}

/// Stable task identifier, assigned at creation and never changed
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Creates a fresh identifier for a task titled `title` created at `timestamp`
    pub fn generate(title: &str, timestamp: DateTime<FixedOffset>) -> Self {
        Self(format!("t-{}", generate_hash(title, timestamp)))
    }

    /// Returns the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TaskId {
    fn from(s: String) -> Self {
        Self(s)
    }
}
