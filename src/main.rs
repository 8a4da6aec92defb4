//! todo - a local-first todo list for the terminal

use std::process::ExitCode;

fn main() -> ExitCode {
    match todo_cli::cli::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
