//! In-memory key-value store, the test double for [`FileStore`].

use std::collections::HashMap;
use std::sync::Mutex;

use super::KeyValueStore;
use crate::error::StoreError;

#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_values<T>(&self, f: impl FnOnce(&mut HashMap<String, String>) -> T) -> T {
        // Single logical thread of mutation; recover the map on poison.
        let mut guard = self.values.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut guard)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.with_values(|v| v.get(key).cloned()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.with_values(|v| {
            v.insert(key.to_string(), value.to_string());
        });
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.with_values(|v| {
            v.remove(key);
        });
        Ok(())
    }
}
