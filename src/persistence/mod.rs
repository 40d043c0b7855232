//! Save/load of session state through a key-value store
//!
//! Features:
//! - One JSON value per named key, matching the browser LocalStorage layout
//! - Missing or corrupt values fall back to defaults, never fatal
//! - Pluggable backends: in-memory, JSON file (native), LocalStorage (web)

#[cfg(not(target_arch = "wasm32"))]
pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod local;
pub mod snapshot;

#[cfg(not(target_arch = "wasm32"))]
pub use file::JsonFileStore;
#[cfg(target_arch = "wasm32")]
pub use local::LocalStore;
pub use snapshot::SessionSnapshot;

use std::collections::BTreeMap;
use thiserror::Error;

/// Errors raised by storage backends
#[derive(Debug, Error)]
pub enum StoreError {
    /// Value could not be encoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Backing file could not be read or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Backend refused the operation (quota, private mode, ...)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Named string values, the only storage capability the tutor needs
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;

    /// Write several values as one batch. Backends with a costly commit
    /// should override this to commit once.
    fn set_many(&mut self, entries: Vec<(&str, String)>) -> Result<(), StoreError> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }
}

/// Volatile store for tests and sessions without a save file
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.values.remove(key);
        Ok(())
    }
}
