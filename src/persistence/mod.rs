//! Key-value persistence
//!
//! The simulation only ever stores integers (the high score). Hosts pick a
//! backend:
//! - [`MemoryStore`]: tests and throwaway sessions
//! - [`JsonFileStore`]: native, a small JSON object on disk
//! - [`LocalStorageStore`]: browser LocalStorage

use std::collections::HashMap;

use thiserror::Error;

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(target_arch = "wasm32")]
mod local_storage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::JsonFileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

/// Store failures. Callers treat any of these as "no value available".
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage contents are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("value for '{key}' is not an integer: {value:?}")]
    Malformed { key: String, value: String },
    #[error("storage is unavailable")]
    Unavailable,
}

/// Integer key-value store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<i64>, StoreError>;
    fn set(&mut self, key: &str, value: i64) -> Result<(), StoreError>;
}

/// Parse a stored string value, as written by [`KeyValueStore::set`]
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub(crate) fn parse_value(key: &str, raw: &str) -> Result<i64, StoreError> {
    raw.trim().parse().map_err(|_| StoreError::Malformed {
        key: key.to_string(),
        value: raw.to_string(),
    })
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, i64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<i64>, StoreError> {
        Ok(self.values.get(key).copied())
    }

    fn set(&mut self, key: &str, value: i64) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}
