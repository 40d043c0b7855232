//! Browser LocalStorage backend (WASM only)

use super::{KeyValueStore, StoreError};

pub struct LocalStore {
    storage: web_sys::Storage,
}

impl LocalStore {
    /// The window's LocalStorage, if the browser exposes one
    pub fn open() -> Option<Self> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()?;
        Some(Self { storage })
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.storage
            .set_item(key, &value)
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.storage
            .remove_item(key)
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))
    }
}
