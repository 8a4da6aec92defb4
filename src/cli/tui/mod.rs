//! Interactive todo list
//!
//! A single screen with an add form above the list, drawn with ratatui.
//! All store changes happen on the main thread in response to key presses.

mod app;
mod event;
mod form;
mod view;

use std::io::{self, Stdout};
use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;

use anyhow::{anyhow, Result};
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use super::Output;
use crate::domain::Clock;
use crate::storage::{KeyValueStore, TodoStore};
use app::App;
use event::EventHandler;

pub use form::AddTodoForm;

type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Launch the interactive list over an already-hydrated store
pub fn run<S: KeyValueStore, C: Clock>(store: TodoStore<S, C>, output: &Output) -> Result<()> {
    output.verbose_ctx("ui", &format!("Starting with {} todo(s)", store.len()));

    let mut terminal = enter_terminal()?;
    let mut app = App::new(store);
    let events = EventHandler::spawn(Duration::from_millis(250));

    // Restore the terminal even if the loop panics
    let result = panic::catch_unwind(AssertUnwindSafe(|| app.run(&mut terminal, events)));
    let restored = leave_terminal();

    match result {
        Ok(inner) => {
            restored?;
            inner
        }
        Err(payload) => {
            let _ = restored;
            if let Some(s) = payload.downcast_ref::<&str>() {
                Err(anyhow!("UI panicked: {}", s))
            } else if let Some(s) = payload.downcast_ref::<String>() {
                Err(anyhow!("UI panicked: {}", s))
            } else {
                Err(anyhow!("UI panicked with unknown error"))
            }
        }
    }
}

fn enter_terminal() -> Result<CrosstermTerminal> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn leave_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), DisableBracketedPaste, LeaveAlternateScreen)?;
    Ok(())
}
