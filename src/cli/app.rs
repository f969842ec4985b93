//! Main CLI application structure

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use super::output::Output;
use super::tui::{self, TuiOptions, ViewMode};
use crate::storage::{resolve_task_path, Config, DefaultView, Repository, YamlStore};

#[derive(Parser)]
#[command(name = "lazy-todo")]
#[command(author, version, about = "Keyboard-driven todo manager for the terminal")]
pub struct Cli {
    /// Task file (defaults to ./tasks.yaml, then the per-user data directory)
    #[arg(long, short = 'f', env = "LAZY_TODO_FILE")]
    pub file: Option<PathBuf>,

    /// Initial view (overrides the config file)
    #[arg(long)]
    pub view: Option<DefaultView>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.verbose);

    output.verbose("lazy-todo starting");

    let config = Config::load()?;
    output.verbose_ctx(
        "config",
        &format!(
            "Loaded config from {}",
            Config::config_dir()
                .map(|d| d.join("config.toml").display().to_string())
                .unwrap_or_else(|| "<none>".to_string())
        ),
    );

    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    let data_dir = Config::data_dir();
    let path = resolve_task_path(cli.file, &cwd, data_dir.as_deref());
    output.verbose_ctx("storage", &format!("Task file: {}", path.display()));

    let repo: Arc<dyn Repository> = Arc::new(YamlStore::new(path).with_editor(config.editor.clone()));

    let options = TuiOptions {
        view_mode: ViewMode::from(cli.view.unwrap_or(config.default_view)),
        group_by: config.default_group_by,
        tick_rate_ms: config.tick_rate_ms,
        message_timeout: Duration::from_secs(config.message_timeout_secs),
    };
    output.verbose_ctx("tui", &format!("Starting with {:?}", options));

    tui::run(&output, repo, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_flags() {
        let cli = Cli::try_parse_from(["lazy-todo", "-f", "todo.yaml", "--view", "kanban", "-v"]).unwrap();
        assert_eq!(cli.file, Some(PathBuf::from("todo.yaml")));
        assert_eq!(cli.view, Some(DefaultView::Kanban));
        assert!(cli.verbose);
    }

    #[test]
    fn rejects_unknown_view() {
        assert!(Cli::try_parse_from(["lazy-todo", "--view", "grid"]).is_err());
    }

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
