//! External editor launch
//!
//! The editor is chosen from the configured command, then `$EDITOR`, then
//! `$VISUAL`, then a platform default. The call blocks until the editor exits.

use std::path::Path;
use std::process::Command;

use super::StorageError;

/// Platform default editor when nothing else is configured
fn platform_default() -> &'static str {
    if cfg!(target_os = "windows") {
        "notepad"
    } else if cfg!(target_os = "macos") {
        "open"
    } else {
        "nano"
    }
}

/// Picks the editor command from the given candidates, in precedence order
pub fn resolve_from(
    configured: Option<&str>,
    editor_var: Option<&str>,
    visual_var: Option<&str>,
) -> String {
    [configured, editor_var, visual_var]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or(platform_default())
        .to_string()
}

/// Resolves the editor command from config and the environment
pub fn resolve(configured: Option<&str>) -> String {
    let editor = std::env::var("EDITOR").ok();
    let visual = std::env::var("VISUAL").ok();
    resolve_from(configured, editor.as_deref(), visual.as_deref())
}

/// Opens `path` in the resolved editor and waits for it to exit
pub fn open(path: &Path, configured: Option<&str>) -> Result<(), StorageError> {
    let command = resolve(configured);

    // Allow commands with arguments such as `code --wait`
    let mut parts = command.split_whitespace();
    let program = parts.next().unwrap_or(platform_default());

    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .map_err(|source| StorageError::Editor {
            editor: command.clone(),
            source,
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(StorageError::EditorExit {
            editor: command,
            code: status.code(),
        })
    }
}
