//! Domain models for lazy-todo
//!
//! Contains the task model without any I/O concerns.

mod id;
mod task;

pub use id::TaskId;
pub use task::{now, parse_tags, GroupBy, Priority, Status, Task, TaskError};
