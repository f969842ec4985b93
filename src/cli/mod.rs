//! # Command-Line Interface
//!
//! Argument parsing, diagnostics and the interactive TUI.
//!
//! ## Options
//!
//! | Flag | Purpose |
//! |------|---------|
//! | `--file`, `-f` | Task file to open (also `LAZY_TODO_FILE`) |
//! | `--view` | Initial view, `list` or `kanban` |
//! | `--verbose`, `-v` | Diagnostics on stderr |
//! | `--version`, `-V` | Print the version and exit |
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output. Messages are printed before the
//! terminal is taken over and after it is restored:
//! ```bash
//! lazy-todo --verbose --file ~/todo.yaml
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and start the TUI.

mod app;
mod output;
pub mod tui;

pub use app::{run, Cli};
pub use output::Output;
