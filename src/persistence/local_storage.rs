//! Browser LocalStorage backend

use super::{KeyValueStore, StoreError, parse_value};

/// Values are stored as decimal strings
pub struct LocalStorageStore {
    storage: web_sys::Storage,
}

impl LocalStorageStore {
    /// Fails when LocalStorage is disabled or blocked
    pub fn new() -> Result<Self, StoreError> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StoreError::Unavailable)?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<i64>, StoreError> {
        let raw = self
            .storage
            .get_item(key)
            .map_err(|_| StoreError::Unavailable)?;
        raw.map(|raw| parse_value(key, &raw)).transpose()
    }

    fn set(&mut self, key: &str, value: i64) -> Result<(), StoreError> {
        self.storage
            .set_item(key, &value.to_string())
            .map_err(|_| StoreError::Unavailable)
    }
}
