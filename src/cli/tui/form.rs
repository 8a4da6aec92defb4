//! Add-todo form state
//!
//! Holds the text being typed and the validation error currently on
//! display. A rejected submit keeps the input so it can be fixed; any edit
//! clears the error until the next submit.

use anyhow::Result;

use crate::domain::{Clock, TodoId, TodoText, ValidationError};
use crate::storage::{KeyValueStore, TodoStore};

/// Placeholder shown while the input is empty
pub const PLACEHOLDER: &str = "Enter a new todo...";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddTodoForm {
    input: String,
    error: Option<ValidationError>,
}

impl AddTodoForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn error(&self) -> Option<ValidationError> {
        self.error
    }

    /// Appends pasted text; line breaks become spaces since the field is one line
    pub fn paste(&mut self, text: &str) {
        self.input.extend(text.chars().map(|c| match c {
            '\r' | '\n' | '\t' => ' ',
            c => c,
        }));
        self.error = None;
    }

    pub fn push(&mut self, c: char) {
        self.input.push(c);
        self.error = None;
    }

    pub fn backspace(&mut self) {
        if self.input.pop().is_some() {
            self.error = None;
        }
    }

    /// Validates the input and, if accepted, adds it to `store`
    ///
    /// Returns the id of the new todo, or `None` when the input was rejected
    /// and the error is now on display.
    pub fn submit<S, C>(&mut self, store: &mut TodoStore<S, C>) -> Result<Option<TodoId>>
    where
        S: KeyValueStore,
        C: Clock,
    {
        let text = match TodoText::parse(&self.input) {
            Ok(text) => text,
            Err(e) => {
                self.error = Some(e);
                return Ok(None);
            }
        };

        let id = store.add(text)?.id.clone();
        self.input.clear();
        self.error = None;

        Ok(Some(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ManualClock, MAX_TEXT_LEN};
    use crate::storage::MemoryStore;

    fn empty_store() -> TodoStore<MemoryStore, ManualClock> {
        TodoStore::initialize(MemoryStore::new(), ManualClock::fixed(1000)).unwrap()
    }

    #[test]
    fn starts_empty_without_error() {
        let form = AddTodoForm::new();
        assert_eq!(form.input(), "");
        assert_eq!(form.error(), None);
    }

    #[test]
    fn typing_updates_input() {
        let mut form = AddTodoForm::new();
        for c in "Buy".chars() {
            form.push(c);
        }
        form.backspace();

        assert_eq!(form.input(), "Bu");
    }

    #[test]
    fn submit_adds_trimmed_text_and_clears_input() {
        let mut store = empty_store();
        let mut form = AddTodoForm::new();
        form.paste("  Buy milk  ");

        let id = form.submit(&mut store).unwrap();

        assert_eq!(id, Some(TodoId::from("1000")));
        assert_eq!(store.todos()[0].text, "Buy milk");
        assert_eq!(form.input(), "");
        assert_eq!(form.error(), None);
    }

    #[test]
    fn empty_submit_shows_error_and_keeps_store() {
        let mut store = empty_store();
        let mut form = AddTodoForm::new();

        assert_eq!(form.submit(&mut store).unwrap(), None);
        assert_eq!(form.error(), Some(ValidationError::Empty));
        assert!(store.is_empty());
        assert!(!store.slot().contains_key(crate::storage::TODOS_KEY));
    }

    #[test]
    fn whitespace_submit_keeps_input() {
        let mut store = empty_store();
        let mut form = AddTodoForm::new();
        form.paste("   ");

        form.submit(&mut store).unwrap();

        assert_eq!(form.error(), Some(ValidationError::Empty));
        assert_eq!(form.input(), "   ");
    }

    #[test]
    fn too_long_submit_shows_error() {
        let mut store = empty_store();
        let mut form = AddTodoForm::new();
        let long = "a".repeat(MAX_TEXT_LEN + 1);
        form.paste(&long);

        form.submit(&mut store).unwrap();

        assert_eq!(form.error(), Some(ValidationError::TooLong));
        assert_eq!(
            form.error().unwrap().to_string(),
            "Todo text must be 100 characters or less"
        );
        assert_eq!(form.input(), long);
        assert!(store.is_empty());
    }

    #[test]
    fn exactly_max_len_is_accepted() {
        let mut store = empty_store();
        let mut form = AddTodoForm::new();
        form.paste(&"a".repeat(MAX_TEXT_LEN));

        assert!(form.submit(&mut store).unwrap().is_some());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn typing_after_error_clears_it() {
        let mut store = empty_store();
        let mut form = AddTodoForm::new();
        form.submit(&mut store).unwrap();
        assert!(form.error().is_some());

        form.push('a');
        assert_eq!(form.error(), None);
    }

    #[test]
    fn paste_appends_on_one_line_and_clears_error() {
        let mut store = empty_store();
        let mut form = AddTodoForm::new();
        form.submit(&mut store).unwrap();
        assert!(form.error().is_some());

        form.paste("Buy\r\nmilk");
        form.paste("\tnow");

        assert_eq!(form.input(), "Buy  milk now");
        assert_eq!(form.error(), None);
    }

    #[test]
    fn backspace_on_empty_input_keeps_error() {
        let mut store = empty_store();
        let mut form = AddTodoForm::new();
        form.submit(&mut store).unwrap();

        form.backspace();
        assert_eq!(form.error(), Some(ValidationError::Empty));
    }

    #[test]
    fn successful_submit_clears_previous_error() {
        let mut store = empty_store();
        let mut form = AddTodoForm::new();
        form.submit(&mut store).unwrap();

        // Bypass the edit path so the error is still set at submit time
        form.input = "Valid".to_string();
        assert_eq!(form.error(), Some(ValidationError::Empty));

        form.submit(&mut store).unwrap();
        assert_eq!(form.error(), None);
        assert_eq!(store.len(), 1);
    }
}
