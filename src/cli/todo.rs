//! Todo CLI commands

use std::process::ExitCode;

use anyhow::Result;

use super::output::Output;
use super::Session;
use crate::domain::{TodoId, TodoText};

/// Message shown when the list has no entries
pub const EMPTY_LIST_MESSAGE: &str = "No todos yet. Add one with 'todo add'.";

pub fn add(session: &mut Session, output: &Output, raw: &str) -> Result<ExitCode> {
    let text = match TodoText::parse(raw) {
        Ok(text) => text,
        Err(e) => {
            output.verbose_ctx("add", &format!("Rejected input: {:?}", raw));
            output.error(&e.to_string());
            return Ok(ExitCode::FAILURE);
        }
    };

    let todo = session.store.add(text)?;
    output.verbose_ctx("add", &format!("Stored todo {} at {}", todo.id, todo.created_at));

    if output.is_json() {
        output.data(todo);
    } else {
        output.success(&format!("Added todo: {} - {}", todo.id, todo.text));
    }

    Ok(ExitCode::SUCCESS)
}

pub fn list(session: &Session, output: &Output) -> Result<ExitCode> {
    let todos = session.store.todos();
    output.verbose_ctx("list", &format!("{} todo(s)", todos.len()));

    if output.is_json() {
        output.data(&todos);
    } else if todos.is_empty() {
        println!("{}", EMPTY_LIST_MESSAGE);
    } else {
        for todo in todos {
            println!("{} {:<14} {}", todo.marker(), todo.id, todo.text);
        }

        let done = todos.iter().filter(|t| t.completed).count();
        println!();
        println!("{} todo(s), {} completed", todos.len(), done);
    }

    Ok(ExitCode::SUCCESS)
}

pub fn toggle(session: &mut Session, output: &Output, id: &str) -> Result<ExitCode> {
    let id = TodoId::from(id);
    let matched = session.store.toggle(&id)?;
    output.verbose_ctx("toggle", &format!("id={} matched={}", id, matched));

    match session.store.get(&id) {
        Some(todo) if matched => {
            if output.is_json() {
                output.data(todo);
            } else {
                let state = if todo.completed { "completed" } else { "open" };
                output.success(&format!("Marked {} as {}: {}", todo.id, state, todo.text));
            }
        }
        _ => output.notice(&format!("No todo with id {}", id)),
    }

    Ok(ExitCode::SUCCESS)
}

pub fn delete(session: &mut Session, output: &Output, id: &str) -> Result<ExitCode> {
    let id = TodoId::from(id);
    let removed = session.store.delete(&id)?;
    output.verbose_ctx("delete", &format!("id={} removed={}", id, removed));

    if removed {
        output.success(&format!("Deleted todo: {}", id));
    } else {
        output.notice(&format!("No todo with id {}", id));
    }

    Ok(ExitCode::SUCCESS)
}
