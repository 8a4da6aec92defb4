//! Opens the todo store for a command invocation

use std::path::{Path, PathBuf};

use anyhow::Result;

use super::output::Output;
use crate::domain::SystemClock;
use crate::storage::{Config, FileStore, Hydration, TodoStore};

/// The store a command works against, plus where it lives
pub struct Session {
    pub store: TodoStore<FileStore, SystemClock>,
    data_dir: PathBuf,
}

impl Session {
    /// Resolves the data directory and hydrates the store from it
    pub fn open(config: &Config, data_dir: Option<&Path>, output: &Output) -> Result<Self> {
        let data_dir = config.resolve_data_dir(data_dir)?;
        let file_store = FileStore::in_dir(&data_dir);
        output.verbose_ctx("storage", &format!("Using {}", file_store.path().display()));

        let store = TodoStore::initialize(file_store, SystemClock)?;

        if store.slot().envelope_discarded() {
            output.verbose_ctx(
                "storage",
                "Storage file was not a JSON object of strings; unreadable entries dropped",
            );
        }

        match store.hydration() {
            Hydration::Empty => output.verbose_ctx("storage", "No stored todos"),
            Hydration::Loaded(n) => {
                output.verbose_ctx("storage", &format!("Loaded {} stored todo(s)", n))
            }
            Hydration::Recovered => {
                output.verbose_ctx("storage", "Stored todos were unreadable; cleared them")
            }
        }

        Ok(Self { store, data_dir })
    }

    /// Returns the data directory
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
