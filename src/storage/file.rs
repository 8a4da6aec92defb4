//! File-backed key/value store
//!
//! All entries live in one JSON object on disk, e.g.
//! `{"todos":"[{\"id\":\"1000\",...}]"}`. Every read-modify-write holds an
//! exclusive lock on a sidecar `.lock` file, and writes land through a
//! uniquely named temp file renamed over the store.

use std::cell::Cell;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;
use tempfile::NamedTempFile;

use super::KeyValueStore;

/// File name used inside the data directory
pub const STORAGE_FILE: &str = "local_storage.json";

type Entries = BTreeMap<String, String>;

/// Key/value store persisted as a single JSON file
pub struct FileStore {
    path: PathBuf,
    discarded: Cell<bool>,
}

impl FileStore {
    /// Creates a store backed by the file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            discarded: Cell::new(false),
        }
    }

    /// Creates the default store inside a data directory
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(STORAGE_FILE))
    }

    /// Returns the path to the store file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the path of the sidecar lock file
    pub fn lock_path(&self) -> PathBuf {
        let mut lock: OsString = self.path.clone().into_os_string();
        lock.push(".lock");
        PathBuf::from(lock)
    }

    /// Whether a read found an envelope that was not a JSON object of strings
    ///
    /// The unreadable parts were treated as absent; the next write replaces
    /// the file with a clean envelope.
    pub fn envelope_discarded(&self) -> bool {
        self.discarded.get()
    }

    fn open_lock(&self) -> Result<File> {
        let lock_path = self.lock_path();
        OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .with_context(|| format!("Failed to open lock file: {}", lock_path.display()))
    }

    /// Reads the envelope; callers hold the sidecar lock
    fn read_entries(&self) -> Result<Entries> {
        let mut file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to open storage file: {}", self.path.display())
                })
            }
        };

        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)
            .with_context(|| format!("Failed to read storage file: {}", self.path.display()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Entries::new());
        }

        if let Ok(entries) = serde_json::from_slice::<Entries>(&bytes) {
            return Ok(entries);
        }

        // Salvage the string-valued keys of an object; anything else is dropped
        self.discarded.set(true);
        let object = serde_json::from_slice::<serde_json::Map<String, serde_json::Value>>(&bytes);
        let salvaged: Entries = object
            .map(|object| {
                object
                    .into_iter()
                    .filter_map(|(key, value)| match value {
                        serde_json::Value::String(s) => Some((key, s)),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default();
        Ok(salvaged)
    }

    /// Writes the envelope; callers hold the exclusive sidecar lock
    fn write_entries(&self, entries: &Entries) -> Result<()> {
        let parent = self.parent_dir();
        let mut temp = NamedTempFile::new_in(parent)
            .with_context(|| format!("Failed to create temp file in {}", parent.display()))?;

        serde_json::to_writer_pretty(&mut temp, entries)
            .context("Failed to serialize storage entries")?;
        writeln!(temp).context("Failed to write storage file")?;
        temp.flush().context("Failed to flush storage file")?;

        temp.persist(&self.path)
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;
        Ok(())
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    /// Runs a read-modify-write under the exclusive lock
    fn update(&self, change: impl FnOnce(&mut Entries) -> bool) -> Result<()> {
        let parent = self.parent_dir();
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;

        // Lock is released when the lock file is dropped
        let lock = self.open_lock()?;
        lock.lock_exclusive()
            .context("Failed to acquire write lock on storage file")?;

        let mut entries = self.read_entries()?;
        if change(&mut entries) {
            self.write_entries(&entries)?;
        }
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let lock = self.open_lock()?;
        lock.lock_shared()
            .context("Failed to acquire read lock on storage file")?;

        let mut entries = self.read_entries()?;
        Ok(entries.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
            true
        })
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        // A discarded envelope is rewritten even when the key was absent
        self.update(|entries| entries.remove(key).is_some() || self.discarded.get())
    }
}
