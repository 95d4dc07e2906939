//! Flat-file JSON record store.
//!
//! Each named collection is a single JSON array on disk
//! (`<data_dir>/<collection>.json`). The whole collection is rewritten on
//! every save; there is no in-memory cache, so every load re-reads disk.
//!
//! Load policy: a missing or unparseable file yields an empty collection
//! and never fails the caller. Corruption is logged at WARN so it stays
//! observable without changing the contract.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Errors from the record store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Durable store for named collections of records.
#[derive(Debug, Clone)]
pub struct RecordStore {
    data_dir: PathBuf,
}

impl RecordStore {
    /// Create a store rooted at `data_dir`, creating the directory if needed.
    pub fn new(data_dir: PathBuf) -> Result<Self, StoreError> {
        fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    /// Root directory accessor.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Backing file for a collection.
    pub fn collection_path(&self, collection: &str) -> PathBuf {
        self.data_dir.join(format!("{collection}.json"))
    }

    /// Read a whole collection.
    ///
    /// Missing file or invalid JSON both yield an empty vector; callers
    /// cannot distinguish "never written" from "corrupted" through this
    /// interface.
    pub fn load<T: DeserializeOwned>(&self, collection: &str) -> Vec<T> {
        let path = self.collection_path(collection);
        let contents = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!("failed to read {}: {e}", path.display());
                return Vec::new();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(
                    "{} is not a valid record collection, treating as empty: {e}",
                    path.display()
                );
                Vec::new()
            }
        }
    }

    /// Serialize and replace a whole collection.
    ///
    /// Writes go through a `.tmp` sibling followed by a rename so a crash
    /// mid-write never leaves a truncated collection behind.
    pub fn save<T: Serialize>(&self, collection: &str, records: &[T]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(records)?;
        self.atomic_write(&self.collection_path(collection), json.as_bytes())
    }

    /// Read a single JSON value from a named file (e.g. a sequence counter).
    ///
    /// Same tolerance as [`RecordStore::load`]: missing or corrupt reads as
    /// `None`.
    pub fn load_value<T: DeserializeOwned>(&self, name: &str) -> Option<T> {
        let path = self.data_dir.join(format!("{name}.json"));
        let contents = fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&contents) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("{} is not valid JSON, ignoring: {e}", path.display());
                None
            }
        }
    }

    /// Write a single JSON value to a named file.
    pub fn save_value<T: Serialize>(&self, name: &str, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(value)?;
        self.atomic_write(&self.data_dir.join(format!("{name}.json")), json.as_bytes())
    }

    /// Atomically write `data` to `path` via a `.tmp` sibling.
    fn atomic_write(&self, path: &Path, data: &[u8]) -> Result<(), StoreError> {
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, data)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}
