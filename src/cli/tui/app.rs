//! TUI application state and logic

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::Backend;
use ratatui::Terminal;

use super::event::{Event, EventHandler};
use super::form::AddTodoForm;
use super::view;
use crate::domain::{Clock, Todo};
use crate::storage::{KeyValueStore, TodoStore};

/// Ticks a status message stays on screen
const STATUS_TICKS: u8 = 12;

/// Which part of the screen receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Form,
    List,
}

impl Focus {
    fn toggle(self) -> Self {
        match self {
            Focus::Form => Focus::List,
            Focus::List => Focus::Form,
        }
    }
}

/// Application state
pub struct App<S, C> {
    store: TodoStore<S, C>,
    form: AddTodoForm,
    focus: Focus,

    /// Selected row in the list
    selected: usize,

    status_message: Option<String>,
    status_ticks: u8,
    should_quit: bool,
}

impl<S: KeyValueStore, C: Clock> App<S, C> {
    pub fn new(store: TodoStore<S, C>) -> Self {
        Self {
            store,
            form: AddTodoForm::new(),
            focus: Focus::Form,
            selected: 0,
            status_message: None,
            status_ticks: 0,
            should_quit: false,
        }
    }

    /// Run the main application loop
    pub fn run<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        events: EventHandler,
    ) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| view::draw(frame, self))?;

            match events.next()? {
                Event::Key(key) => self.handle_key(key)?,
                Event::Paste(text) => self.handle_paste(&text),
                Event::Resize => {}
                Event::Tick => self.tick(),
            }
        }

        Ok(())
    }

    /// Handle key events
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return Ok(());
        }

        if matches!(key.code, KeyCode::Tab | KeyCode::BackTab) {
            self.focus = self.focus.toggle();
            return Ok(());
        }

        match self.focus {
            Focus::Form => self.handle_form_key(key),
            Focus::List => self.handle_list_key(key),
        }
    }

    /// Pasted text goes into the form; the list ignores it
    pub fn handle_paste(&mut self, text: &str) {
        if self.focus == Focus::Form {
            self.form.paste(text);
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Enter => {
                if let Some(id) = self.form.submit(&mut self.store)? {
                    self.selected = self.store.len().saturating_sub(1);
                    if let Some(todo) = self.store.get(&id) {
                        let message = format!("Added: {}", todo.text);
                        self.set_status(message);
                    }
                }
            }
            KeyCode::Esc => {
                self.focus = Focus::List;
            }
            KeyCode::Backspace => {
                self.form.backspace();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.form.push(c);
            }
            _ => {}
        }

        Ok(())
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_selection_down();
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_selection_up();
            }
            KeyCode::Char(' ') | KeyCode::Char('x') | KeyCode::Enter => {
                self.toggle_selected()?;
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                self.delete_selected()?;
            }
            KeyCode::Char('a') | KeyCode::Char('i') | KeyCode::Esc => {
                self.focus = Focus::Form;
            }
            KeyCode::Char('?') => {
                self.set_status(
                    "j/k:move space:toggle d:delete a:add tab:switch q:quit".to_string(),
                );
            }
            _ => {}
        }

        Ok(())
    }

    fn move_selection_down(&mut self) {
        let len = self.store.len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    fn move_selection_up(&mut self) {
        let len = self.store.len();
        if len > 0 {
            self.selected = if self.selected == 0 {
                len - 1
            } else {
                self.selected - 1
            };
        }
    }

    fn toggle_selected(&mut self) -> Result<()> {
        let Some(id) = self.selected_todo().map(|t| t.id.clone()) else {
            return Ok(());
        };

        self.store.toggle(&id)?;

        if let Some(todo) = self.store.get(&id) {
            let verb = if todo.completed { "Completed" } else { "Reopened" };
            let message = format!("{}: {}", verb, todo.text);
            self.set_status(message);
        }

        Ok(())
    }

    fn delete_selected(&mut self) -> Result<()> {
        let Some((id, text)) = self.selected_todo().map(|t| (t.id.clone(), t.text.clone())) else {
            return Ok(());
        };

        self.store.delete(&id)?;

        if self.selected >= self.store.len() {
            self.selected = self.store.len().saturating_sub(1);
        }
        self.set_status(format!("Deleted: {}", text));

        Ok(())
    }

    fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
        self.status_ticks = STATUS_TICKS;
    }

    /// Ages the status message
    fn tick(&mut self) {
        if self.status_ticks > 0 {
            self.status_ticks -= 1;
            if self.status_ticks == 0 {
                self.status_message = None;
            }
        }
    }

    // Public accessors for views

    pub fn todos(&self) -> &[Todo] {
        self.store.todos()
    }

    pub fn form(&self) -> &AddTodoForm {
        &self.form
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_todo(&self) -> Option<&Todo> {
        self.store.todos().get(self.selected)
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ManualClock, ValidationError};
    use crate::storage::{MemoryStore, TODOS_KEY};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text<S: KeyValueStore, C: Clock>(app: &mut App<S, C>, text: &str) {
        for c in text.chars() {
            app.handle_key(press(KeyCode::Char(c))).unwrap();
        }
    }

    fn new_app(clock: ManualClock) -> App<MemoryStore, ManualClock> {
        App::new(TodoStore::initialize(MemoryStore::new(), clock).unwrap())
    }

    fn stored(app: &App<MemoryStore, ManualClock>) -> Option<String> {
        app.store.slot().get(TODOS_KEY).unwrap()
    }

    // ==========================================================================
    // Focus
    // ==========================================================================

    #[test]
    fn focus_starts_on_form() {
        let app = new_app(ManualClock::fixed(0));
        assert_eq!(app.focus(), Focus::Form);
    }

    #[test]
    fn tab_switches_focus() {
        let mut app = new_app(ManualClock::fixed(0));

        app.handle_key(press(KeyCode::Tab)).unwrap();
        assert_eq!(app.focus(), Focus::List);

        app.handle_key(press(KeyCode::BackTab)).unwrap();
        assert_eq!(app.focus(), Focus::Form);
    }

    #[test]
    fn q_in_form_is_text_not_quit() {
        let mut app = new_app(ManualClock::fixed(0));

        type_text(&mut app, "q");
        assert!(!app.should_quit);
        assert_eq!(app.form().input(), "q");
    }

    #[test]
    fn ctrl_c_quits_from_anywhere() {
        let mut app = new_app(ManualClock::fixed(0));

        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
            .unwrap();
        assert!(app.should_quit);
    }

    // ==========================================================================
    // Workflow
    // ==========================================================================

    #[test]
    fn add_toggle_delete_workflow() {
        let mut app = new_app(ManualClock::fixed(1234567890));

        type_text(&mut app, "Integration test todo");
        app.handle_key(press(KeyCode::Enter)).unwrap();

        assert_eq!(app.todos().len(), 1);
        assert_eq!(app.todos()[0].text, "Integration test todo");
        assert_eq!(app.form().input(), "");
        assert_eq!(app.status_message(), Some("Added: Integration test todo"));

        app.handle_key(press(KeyCode::Esc)).unwrap();
        app.handle_key(press(KeyCode::Char(' '))).unwrap();
        assert!(app.todos()[0].completed);

        app.handle_key(press(KeyCode::Char('d'))).unwrap();
        assert!(app.todos().is_empty());
        assert_eq!(stored(&app).as_deref(), Some("[]"));
    }

    #[test]
    fn multiple_todos_keep_independent_state() {
        let mut app = new_app(ManualClock::stepping(1234567890, 1));

        for text in ["First todo", "Second todo", "Third todo"] {
            type_text(&mut app, text);
            app.handle_key(press(KeyCode::Enter)).unwrap();
        }

        app.handle_key(press(KeyCode::Tab)).unwrap();
        // Selection follows the newest todo; move back to the second one
        app.handle_key(press(KeyCode::Char('k'))).unwrap();
        app.handle_key(press(KeyCode::Char('x'))).unwrap();

        let flags: Vec<bool> = app.todos().iter().map(|t| t.completed).collect();
        assert_eq!(flags, vec![false, true, false]);

        let ids: Vec<&str> = app.todos().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1234567890", "1234567891", "1234567892"]);
    }

    #[test]
    fn invalid_submit_shows_error_without_adding() {
        let mut app = new_app(ManualClock::fixed(0));

        type_text(&mut app, "   ");
        app.handle_key(press(KeyCode::Enter)).unwrap();

        assert!(app.todos().is_empty());
        assert_eq!(app.form().error(), Some(ValidationError::Empty));
        assert_eq!(stored(&app), None);

        type_text(&mut app, "x");
        assert_eq!(app.form().error(), None);
    }

    #[test]
    fn paste_fills_form_and_clears_error() {
        let mut app = new_app(ManualClock::fixed(5));
        app.handle_key(press(KeyCode::Enter)).unwrap();
        assert_eq!(app.form().error(), Some(ValidationError::Empty));

        app.handle_paste("Pasted todo");
        assert_eq!(app.form().error(), None);

        app.handle_key(press(KeyCode::Enter)).unwrap();
        assert_eq!(app.todos()[0].text, "Pasted todo");
    }

    #[test]
    fn paste_with_list_focus_is_ignored() {
        let mut app = new_app(ManualClock::fixed(0));
        app.handle_key(press(KeyCode::Tab)).unwrap();

        app.handle_paste("ignored");
        assert_eq!(app.form().input(), "");
    }

    #[test]
    fn deleting_last_row_moves_selection_up() {
        let mut app = new_app(ManualClock::stepping(1, 1));
        for text in ["a", "b"] {
            type_text(&mut app, text);
            app.handle_key(press(KeyCode::Enter)).unwrap();
        }
        assert_eq!(app.selected(), 1);

        app.handle_key(press(KeyCode::Tab)).unwrap();
        app.handle_key(press(KeyCode::Delete)).unwrap();

        assert_eq!(app.selected(), 0);
        assert_eq!(app.selected_todo().map(|t| t.text.as_str()), Some("a"));
    }

    #[test]
    fn list_actions_on_empty_list_are_noops() {
        let mut app = new_app(ManualClock::fixed(0));
        app.handle_key(press(KeyCode::Tab)).unwrap();

        app.handle_key(press(KeyCode::Char('j'))).unwrap();
        app.handle_key(press(KeyCode::Char(' '))).unwrap();
        app.handle_key(press(KeyCode::Char('d'))).unwrap();

        assert_eq!(app.selected(), 0);
        assert_eq!(stored(&app), None);
    }

    #[test]
    fn selection_wraps() {
        let mut app = new_app(ManualClock::stepping(1, 1));
        for text in ["a", "b", "c"] {
            type_text(&mut app, text);
            app.handle_key(press(KeyCode::Enter)).unwrap();
        }
        app.handle_key(press(KeyCode::Tab)).unwrap();

        app.handle_key(press(KeyCode::Down)).unwrap();
        assert_eq!(app.selected(), 0);

        app.handle_key(press(KeyCode::Up)).unwrap();
        assert_eq!(app.selected(), 2);
    }

    #[test]
    fn status_message_expires_after_ticks() {
        let mut app = new_app(ManualClock::fixed(0));
        app.handle_key(press(KeyCode::Tab)).unwrap();
        app.handle_key(press(KeyCode::Char('?'))).unwrap();
        assert!(app.status_message().is_some());

        for _ in 0..STATUS_TICKS {
            app.tick();
        }
        assert_eq!(app.status_message(), None);
    }
}
