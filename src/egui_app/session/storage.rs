//! Durable session storage.
//!
//! The token and the user are written as one JSON document so that a reader
//! can never observe one without the other. File writes go through a
//! temporary sibling and a rename.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;

use crate::shared::User;

/// Raw persisted record.
///
/// Both fields are optional on read so that partial records written by older
/// or foreign clients can be detected instead of failing to parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct StoredSession {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("session storage I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("session record is unreadable: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("session storage is unavailable")]
    Poisoned,
}

/// Key-value persistence for the session record
pub trait SessionStorage: Send + Sync {
    /// `Ok(None)` when nothing has been stored.
    fn load(&self) -> Result<Option<StoredSession>, StorageError>;
    fn save(&self, session: &StoredSession) -> Result<(), StorageError>;
    fn clear(&self) -> Result<(), StorageError>;
}

/// JSON file in the user's data directory
#[derive(Debug, Clone)]
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SessionStorage for FileSessionStorage {
    fn load(&self) -> Result<Option<StoredSession>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn save(&self, session: &StoredSession) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_vec_pretty(session)?;
        let temp = self.temp_path();
        fs::write(&temp, body)?;
        fs::rename(&temp, &self.path)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process storage holding the serialized record.
///
/// Used when no durable location is wanted and in tests, where
/// [`MemorySessionStorage::with_raw`] seeds arbitrary (even corrupt) content.
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    raw: Mutex<Option<String>>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Mutex::new(Some(raw.into())),
        }
    }

    /// Current serialized content
    pub fn raw(&self) -> Option<String> {
        self.raw.lock().ok().and_then(|raw| raw.clone())
    }
}

impl SessionStorage for MemorySessionStorage {
    fn load(&self) -> Result<Option<StoredSession>, StorageError> {
        let raw = self.raw.lock().map_err(|_| StorageError::Poisoned)?;
        match raw.as_deref() {
            Some(raw) => Ok(Some(serde_json::from_str(raw)?)),
            None => Ok(None),
        }
    }

    fn save(&self, session: &StoredSession) -> Result<(), StorageError> {
        let body = serde_json::to_string(session)?;
        let mut raw = self.raw.lock().map_err(|_| StorageError::Poisoned)?;
        *raw = Some(body);
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        let mut raw = self.raw.lock().map_err(|_| StorageError::Poisoned)?;
        *raw = None;
        Ok(())
    }
}

impl<S: SessionStorage + ?Sized> SessionStorage for std::sync::Arc<S> {
    fn load(&self) -> Result<Option<StoredSession>, StorageError> {
        (**self).load()
    }

    fn save(&self, session: &StoredSession) -> Result<(), StorageError> {
        (**self).save(session)
    }

    fn clear(&self) -> Result<(), StorageError> {
        (**self).clear()
    }
}
