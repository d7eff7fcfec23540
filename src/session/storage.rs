//! Synchronous key-value storage backing the session.
//!
//! The store only ever touches storage through [`SessionStorage`], so the
//! session logic runs unchanged against memory (tests, ephemeral CLI runs) or
//! a JSON file on disk.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use tempfile::NamedTempFile;
use thiserror::Error;

/// Storage failure.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Storage is disabled, full, or otherwise refusing access.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Backing file could not be read or written.
    #[error("storage I/O error: {0}")]
    Io(#[from] io::Error),

    /// Backing file exists but is not a JSON object of strings.
    #[error("storage file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Synchronous string key-value capability.
///
/// Mirrors the browser's local storage: values are strings, missing keys
/// read as `None`, removing a missing key is not an error.
pub trait SessionStorage: Send + Sync + fmt::Debug {
    /// Read a value.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a value.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

// ─────────────────────────────────────────────────────────────────────────────
// In-memory storage
// ─────────────────────────────────────────────────────────────────────────────

/// Process-local storage.
///
/// Clones share the same map, which makes two stores over one
/// `MemoryStorage` behave like two tabs over one origin.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStorage {
    /// Create an empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned() -> StorageError {
        StorageError::Unavailable("memory storage lock poisoned".into())
    }
}

impl SessionStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let items = self.items.read().map_err(|_poison| Self::poisoned())?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.items.write().map_err(|_poison| Self::poisoned())?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut items = self.items.write().map_err(|_poison| Self::poisoned())?;
        items.remove(key);
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File storage
// ─────────────────────────────────────────────────────────────────────────────

/// Storage persisted as a flat JSON object in a single file.
///
/// Every operation re-reads the file, so changes made by another process are
/// visible on the next read. A missing file is an empty storage.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Use the file at `path`; it is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(txt) if txt.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(txt) => Ok(serde_json::from_str(&txt)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Replace the file atomically: write a sibling temp file, then rename it
    /// over the target so readers never see a truncated object.
    fn write_all(&self, items: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut tmp, items)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl SessionStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.read_all()?;
        items.insert(key.to_string(), value.to_string());
        self.write_all(&items)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut items = self.read_all()?;
        if items.remove(key).is_some() {
            self.write_all(&items)?;
        }
        Ok(())
    }
}
