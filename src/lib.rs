//! todo-cli - A local-first todo list
//!
//! Todos are short lines of text that can be added, toggled and deleted.
//! The whole list is written to a local key/value store after every change,
//! under the key `todos`, as one JSON array.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{Clock, SystemClock, Todo, TodoId, TodoText, ValidationError};
pub use storage::{FileStore, KeyValueStore, MemoryStore, TodoStore};
