//! Todo domain model
//!
//! A todo is a short line of text with a completion flag. Records are
//! serialized with camelCase keys in the order `id`, `text`, `completed`,
//! `createdAt`. Fields this version does not know are kept and written back
//! after those four.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::text::TodoText;

/// Opaque todo identifier
///
/// New ids are the decimal form of the creation time in milliseconds.
/// Stored ids are accepted as-is, whatever their shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    /// Derives an id from a creation timestamp
    pub fn from_millis(millis: i64) -> Self {
        Self(millis.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TodoId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TodoId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A single todo item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,

    /// Validated on the way in; historical records are not revalidated
    pub text: String,

    pub completed: bool,

    /// Creation time in milliseconds since the Unix epoch
    pub created_at: i64,

    /// Unrecognized fields from stored records
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Todo {
    /// Creates an open todo stamped with `created_at`
    pub fn new(text: TodoText, created_at: i64) -> Self {
        Self {
            id: TodoId::from_millis(created_at),
            text: text.into_inner(),
            completed: false,
            created_at,
            extra: serde_json::Map::new(),
        }
    }

    /// Flips the completion flag
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }

    /// Checkbox marker used by list renderings
    pub fn marker(&self) -> &'static str {
        if self.completed {
            "[x]"
        } else {
            "[ ]"
        }
    }
}
