//! Persistent key-value store for the planner.
//!
//! The store is a single JSON document on disk mapping flat string keys to
//! JSON values, mirroring the browser local-storage layout the data model
//! was designed around. Every mutation is a whole-document
//! read-modify-write, which is fine for personal-sized datasets.
//!
//! Malformed or unreadable stored data is logged and treated as absent;
//! readers fall back to empty collections instead of failing.

mod repository;

pub use repository::{NoteRepository, SessionLog, TaskRepository};

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

// ============================================================================
// Keys
// ============================================================================

/// Tasks grouped by calendar-date string.
pub const KEY_TASKS_BY_DATE: &str = "tasksByDate";

/// Flat list of notes.
pub const KEY_NOTES: &str = "notes";

/// Append-only log of completed focus sessions.
pub const KEY_FOCUS_HISTORY: &str = "focusHistory";

/// Session flag: whether a user is signed in.
pub const KEY_IS_LOGGED_IN: &str = "isLoggedIn";

/// Session flag: the signed-in user's display name.
pub const KEY_USERNAME: &str = "username";

// ============================================================================
// StoreError
// ============================================================================

/// Store-specific error types.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Filesystem error
    #[error("store I/O error at {path}: {source}")]
    Io {
        /// Store file path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Value could not be serialized
    #[error("failed to serialize value for key '{key}': {source}")]
    Serialize {
        /// Store key
        key: String,
        /// Underlying error
        source: serde_json::Error,
    },

    /// No usable data directory on this system
    #[error("could not determine a data directory for the store")]
    NoDataDir,
}

// ============================================================================
// JsonStore
// ============================================================================

/// Flat key -> JSON value store backed by a single file.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    /// Opens a store at the given path, creating parent directories as
    /// needed. The file itself is created lazily on first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        Ok(Self { path })
    }

    /// Returns the default store path.
    ///
    /// `DAYPLAN_STORE` overrides the location; otherwise the store lives
    /// under the user data directory.
    pub fn default_path() -> Result<PathBuf, StoreError> {
        if let Ok(path) = std::env::var("DAYPLAN_STORE") {
            return Ok(PathBuf::from(path));
        }
        let base = dirs::data_dir().ok_or(StoreError::NoDataDir)?;
        Ok(base.join("dayplan").join("store.json"))
    }

    /// Returns the store file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the value stored under `key`.
    ///
    /// Returns `None` if the key is absent, or if the stored data is
    /// malformed (the failure is logged, never propagated).
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let document = self.load_document();
        let value = document.get(key)?;
        match serde_json::from_value(value.clone()) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!("malformed data under key '{}', treating as empty: {}", key, e);
                None
            }
        }
    }

    /// Writes `value` under `key`, rewriting the whole document.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let encoded = serde_json::to_value(value).map_err(|source| StoreError::Serialize {
            key: key.to_string(),
            source,
        })?;

        let mut document = self.load_document();
        document.insert(key.to_string(), encoded);
        self.write_document(&document)
    }

    /// Removes `key` from the document. Absent keys are a no-op.
    pub fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut document = self.load_document();
        if document.remove(key).is_some() {
            self.write_document(&document)?;
        }
        Ok(())
    }

    /// Loads the backing document, falling back to an empty one when the
    /// file is missing or unparseable.
    fn load_document(&self) -> Map<String, Value> {
        let raw = match std::fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Map::new(),
            Err(e) => {
                warn!("failed to read store {:?}: {}", self.path, e);
                return Map::new();
            }
        };

        match serde_json::from_slice::<Value>(&raw) {
            Ok(Value::Object(map)) => map,
            Ok(other) => {
                warn!(
                    "store {:?} holds {} instead of an object, treating as empty",
                    self.path,
                    json_type_name(&other)
                );
                Map::new()
            }
            Err(e) => {
                warn!("store {:?} is malformed, treating as empty: {}", self.path, e);
                Map::new()
            }
        }
    }

    fn write_document(&self, document: &Map<String, Value>) -> Result<(), StoreError> {
        let raw = serde_json::to_vec_pretty(document).map_err(|source| StoreError::Serialize {
            key: "<document>".to_string(),
            source,
        })?;
        std::fs::write(&self.path, raw).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        debug!("store {:?} written ({} keys)", self.path, document.len());
        Ok(())
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ============================================================================
// Tests
// ============================================================================
