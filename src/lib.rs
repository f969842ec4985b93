//! lazy-todo - A keyboard-driven todo manager for the terminal
//!
//! Tasks live in a single YAML file. The TUI shows them as a filterable,
//! groupable list or as a four-column kanban board.

pub mod cli;
pub mod domain;
pub mod storage;

pub use domain::{GroupBy, Priority, Status, Task, TaskId};
