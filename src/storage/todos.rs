//! Todo collection with write-through persistence
//!
//! [`TodoStore`] owns the ordered list of todos and mirrors it into a
//! [`KeyValueStore`] under the [`TODOS_KEY`] slot after every mutation.
//! The slot always holds the whole collection as one compact JSON array.

use anyhow::{Context, Result};

use super::KeyValueStore;
use crate::domain::{Clock, Todo, TodoId, TodoText};

/// Storage key holding the serialized collection
pub const TODOS_KEY: &str = "todos";

/// How the collection was obtained at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hydration {
    /// Nothing was stored
    Empty,
    /// A stored collection was loaded
    Loaded(usize),
    /// The stored value was unreadable and has been cleared
    Recovered,
}

/// Authoritative todo collection
pub struct TodoStore<S, C> {
    slot: S,
    clock: C,
    todos: Vec<Todo>,
    hydration: Hydration,
}

impl<S: KeyValueStore, C: Clock> TodoStore<S, C> {
    /// Hydrates the collection from storage
    ///
    /// A stored value that is not a JSON array of todos is deleted and the
    /// store starts empty. Only a failing storage backend returns an error.
    pub fn initialize(mut slot: S, clock: C) -> Result<Self> {
        let stored = slot
            .get(TODOS_KEY)
            .context("Failed to read stored todos")?;

        let (todos, hydration) = match stored {
            None => (Vec::new(), Hydration::Empty),
            Some(raw) => match serde_json::from_str::<Vec<Todo>>(&raw) {
                Ok(todos) => {
                    let count = todos.len();
                    (todos, Hydration::Loaded(count))
                }
                Err(_) => {
                    slot.delete(TODOS_KEY)
                        .context("Failed to clear corrupted todos")?;
                    (Vec::new(), Hydration::Recovered)
                }
            },
        };

        Ok(Self {
            slot,
            clock,
            todos,
            hydration,
        })
    }

    /// Returns the current collection in insertion order
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    pub fn get(&self, id: &TodoId) -> Option<&Todo> {
        self.todos.iter().find(|t| &t.id == id)
    }

    pub fn hydration(&self) -> Hydration {
        self.hydration
    }

    /// Returns the underlying key/value store
    pub fn slot(&self) -> &S {
        &self.slot
    }

    /// Appends a new open todo and persists
    pub fn add(&mut self, text: TodoText) -> Result<&Todo> {
        let now = self.clock.now_millis();
        self.todos.push(Todo::new(text, now));
        self.persist()?;

        let index = self.todos.len() - 1;
        Ok(&self.todos[index])
    }

    /// Flips completion of every todo with the given id and persists
    ///
    /// Returns `false` when no todo has the given id.
    pub fn toggle(&mut self, id: &TodoId) -> Result<bool> {
        let mut matched = false;
        for todo in self.todos.iter_mut().filter(|t| &t.id == id) {
            todo.toggle();
            matched = true;
        }

        self.persist()?;
        Ok(matched)
    }

    /// Removes every todo with the given id and persists
    ///
    /// Returns `false` when no todo has the given id.
    pub fn delete(&mut self, id: &TodoId) -> Result<bool> {
        let len_before = self.todos.len();
        self.todos.retain(|t| &t.id != id);
        let removed = self.todos.len() != len_before;

        self.persist()?;
        Ok(removed)
    }

    /// Overwrites the slot with the full collection
    fn persist(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.todos).context("Failed to serialize todos")?;
        self.slot
            .set(TODOS_KEY, &json)
            .context("Failed to persist todos")
    }
}
