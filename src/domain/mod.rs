//! Domain models for the todo list
//!
//! Contains the core types without any I/O concerns.

mod clock;
mod text;
mod todo;

pub use clock::{Clock, ManualClock, SystemClock};
pub use text::{TodoText, ValidationError, MAX_TEXT_LEN};
pub use todo::{Todo, TodoId};
