//! # Command-Line Interface
//!
//! User-facing commands and the interactive list.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `add <text>` | Validate and append a todo |
//! | `list` | Show all todos |
//! | `toggle <id>` | Flip a todo between open and completed |
//! | `delete <id>` | Remove a todo |
//! | `ui` | Interactive terminal list with an add form |
//! | `path` | Show the storage file location |
//!
//! ## Output Formats
//!
//! All commands support `--format`:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output on stderr:
//! ```bash
//! todo --verbose list
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod session;
mod todo;
mod tui;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
pub use session::Session;
pub use todo::EMPTY_LIST_MESSAGE;
pub use tui::AddTodoForm;
