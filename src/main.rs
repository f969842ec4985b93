//! lazy-todo - Keyboard-driven todo manager for the terminal

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = lazy_todo::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
