//! JSON file-based key/value backend.
//!
//! Keeps every entry in memory and rewrites the whole file on each change,
//! using an atomic write (write-to-temp + rename) so a crash never leaves a
//! half-written file behind.

use crate::domain::error::{CinemagicError, Result};
use crate::storage::backend::KeyValueStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Current on-disk format version.
const STORAGE_VERSION: u32 = 1;

/// JSON storage container format.
///
/// This is the top-level structure serialized to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StorageData {
    /// Version of the storage format for future migrations.
    version: u32,

    /// Stored values by key. Values are opaque strings, usually JSON themselves.
    #[serde(default)]
    entries: BTreeMap<String, String>,
}

impl Default for StorageData {
    fn default() -> Self {
        Self {
            version: STORAGE_VERSION,
            entries: BTreeMap::new(),
        }
    }
}

/// JSON file key/value backend.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "entries": {
///     "watchlist": "[\"tt0083658\",\"tt0133093\"]"
///   }
/// }
/// ```
///
/// # Thread Safety
///
/// `Send` but not `Sync`: the controller is its only writer.
#[derive(Debug)]
pub struct JsonStorage {
    /// Path to the JSON file on disk.
    file_path: PathBuf,

    /// In-memory copy of the file, loaded on creation.
    data: StorageData,
}

impl JsonStorage {
    /// Opens the storage file, creating parent directories as needed.
    ///
    /// A missing file starts empty. A file that cannot be parsed also starts
    /// empty: its contents are left on disk until the next write replaces
    /// them, and the problem is logged rather than surfaced.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created or an
    /// existing file cannot be read.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use cinemagic::storage::JsonStorage;
    /// use std::path::PathBuf;
    ///
    /// let storage = JsonStorage::open(PathBuf::from("/tmp/cinemagic/storage.json"))?;
    /// # Ok::<(), cinemagic::CinemagicError>(())
    /// ```
    pub fn open(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "opening JSON storage");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path).unwrap_or_else(|e| {
                tracing::warn!(path = ?file_path, error = %e, "ignoring unreadable storage file");
                StorageData::default()
            })
        } else {
            tracing::debug!("initializing new empty storage");
            StorageData::default()
        };

        tracing::debug!(entry_count = data.entries.len(), "storage opened");

        Ok(Self { file_path, data })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load_from_file(path: &Path) -> Result<StorageData> {
        let contents = std::fs::read_to_string(path)?;
        let data: StorageData = serde_json::from_str(&contents)
            .map_err(|e| CinemagicError::Storage(format!("failed to parse JSON: {e}")))?;

        if data.version != STORAGE_VERSION {
            tracing::debug!(version = data.version, "storage written by another version");
        }

        Ok(data)
    }

    /// Writes the in-memory data to disk atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary file cannot be written or renamed.
    fn save_to_file(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| CinemagicError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");

        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        tracing::debug!(path = ?self.file_path, "storage saved");
        Ok(())
    }
}

impl KeyValueStore for JsonStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.entries.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        let _span = tracing::debug_span!("json_set_item", key = %key, value_len = value.len()).entered();

        if self.data.entries.get(key).map(String::as_str) == Some(value) {
            tracing::trace!("value unchanged, skipping save");
            return Ok(());
        }

        self.data.entries.insert(key.to_string(), value.to_string());
        self.save_to_file()
    }
}
