//! # Storage Layer
//!
//! Persistence for the todo list, modelled on a browser's local storage.
//!
//! ## Layout
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Key/value entries | JSON object of strings | `{data_dir}/local_storage.json` |
//! | Todos | JSON array under key `todos` | inside the entries file |
//! | Config | TOML | `{config_dir}/config.toml` |
//!
//! ## Concurrency Safety
//!
//! - [`FileStore`] uses file locking (`fs2`) for concurrent access
//! - All writes are atomic (temp file + rename)
//!
//! ## Key Types
//!
//! - [`KeyValueStore`] - Synchronous get/set/delete of string values
//! - [`FileStore`] / [`MemoryStore`] - Durable and in-process backends
//! - [`TodoStore`] - The todo collection, written through on every change
//! - [`Config`] - User configuration

mod config;
mod file;
mod kv;
mod todos;

pub use config::{Config, ConfigError, OutputFormat, CONFIG_DIR_ENV};
pub use file::{FileStore, STORAGE_FILE};
pub use kv::{KeyValueStore, MemoryStore};
pub use todos::{Hydration, TodoStore, TODOS_KEY};
