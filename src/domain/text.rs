//! Validated todo text
//!
//! User input is trimmed and must be between 1 and [`MAX_TEXT_LEN`]
//! characters. [`TodoText`] can only be built through [`TodoText::parse`],
//! so anything holding one has already passed the check.

use thiserror::Error;

/// Maximum length of todo text, counted in characters after trimming
pub const MAX_TEXT_LEN: usize = 100;

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Todo text cannot be empty")]
    Empty,

    #[error("Todo text must be 100 characters or less")]
    TooLong,
}

/// Trimmed, length-checked todo text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoText(String);

impl TodoText {
    /// Validates raw user input
    ///
    /// Rules are applied in order: trim, reject empty, reject over-length.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::Empty);
        }

        if trimmed.chars().count() > MAX_TEXT_LEN {
            return Err(ValidationError::TooLong);
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}
