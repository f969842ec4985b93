//! Interactive TUI for lazy-todo
//!
//! The task collection lives in [`app::App`]; the list and kanban views are
//! derived from it and rebuilt whenever storage returns a fresh collection.
//! All storage access goes through a single worker thread.

mod app;
mod cursor;
mod event;
mod form;
mod input;
mod kanban;
mod list;
mod organize;
mod theme;
mod ui;
mod utils;
mod views;
mod worker;

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};

use super::Output;
use crate::domain::GroupBy;
use crate::storage::{DefaultView, Repository};
use app::App;
use event::EventHandler;

/// View mode for the TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    List,
    Kanban,
}

impl From<DefaultView> for ViewMode {
    fn from(view: DefaultView) -> Self {
        match view {
            DefaultView::List => ViewMode::List,
            DefaultView::Kanban => ViewMode::Kanban,
        }
    }
}

/// Startup settings for the TUI
#[derive(Debug, Clone)]
pub struct TuiOptions {
    pub view_mode: ViewMode,
    pub group_by: GroupBy,
    pub tick_rate_ms: u64,
    pub message_timeout: Duration,
}

/// Launch the TUI
pub fn run(output: &Output, repo: Arc<dyn Repository>, options: TuiOptions) -> Result<()> {
    output.verbose_ctx("tui", "Initializing TUI application");

    let events = EventHandler::new(options.tick_rate_ms);
    let commands = worker::spawn(Arc::clone(&repo), events.sender());
    let mut app = App::new(repo, commands, &options);

    let mut terminal = ui::init_terminal()?;

    // Run the main loop with panic safety
    // This ensures terminal is restored even if the app panics
    let result = panic::catch_unwind(AssertUnwindSafe(|| app.run(&mut terminal, &events)));

    // Always restore terminal, even on panic
    let restore_result = ui::restore_terminal();

    match result {
        Ok(inner_result) => {
            restore_result?;
            inner_result?;
            output.verbose_ctx("tui", "Terminal restored");
            Ok(())
        }
        Err(panic_payload) => {
            let _ = restore_result;
            if let Some(s) = panic_payload.downcast_ref::<&str>() {
                Err(anyhow!("TUI panicked: {}", s))
            } else if let Some(s) = panic_payload.downcast_ref::<String>() {
                Err(anyhow!("TUI panicked: {}", s))
            } else {
                Err(anyhow!("TUI panicked with unknown error"))
            }
        }
    }
}
