//! File-backed key-value store: one file per key under the data dir.

use std::io::ErrorKind;
use std::path::PathBuf;

use super::{data_dir, KeyValueStore};
use crate::error::StoreError;

/// Stores each key as a flat file named after the key.
///
/// Values are opaque strings; callers decide what is JSON and what is
/// a plain scalar.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open the store under `~/.config/focuspool[-dev]/store/`.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created.
    pub fn open() -> Result<Self, StoreError> {
        Self::at(data_dir()?.join("store"))
    }

    /// Open a store rooted at an explicit directory (tests, portable
    /// installs).
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created.
    pub fn at(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        std::fs::create_dir_all(&root)
            .map_err(|e| StoreError::Unavailable(format!("{}: {e}", root.display())))?;
        Ok(Self { root })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::ReadFailed {
                key: key.to_string(),
                source: e,
            }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        std::fs::write(self.path_for(key), value).map_err(|e| StoreError::WriteFailed {
            key: key.to_string(),
            source: e,
        })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::RemoveFailed {
                key: key.to_string(),
                source: e,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_set_remove_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::at(dir.path().join("store")).unwrap();

        assert!(store.get("workTime").unwrap().is_none());
        store.set("workTime", "1500").unwrap();
        assert_eq!(store.get("workTime").unwrap().as_deref(), Some("1500"));

        store.set("workTime", "900").unwrap();
        assert_eq!(store.get("workTime").unwrap().as_deref(), Some("900"));

        store.remove("workTime").unwrap();
        assert!(store.get("workTime").unwrap().is_none());
        // Removing again is fine.
        store.remove("workTime").unwrap();
    }

    #[test]
    fn values_are_opaque_strings() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::at(dir.path().join("store")).unwrap();
        let json = r#"{"2024-03-01":{"work":300,"break":60}}"#;
        store.set("timePool", json).unwrap();
        assert_eq!(store.get("timePool").unwrap().as_deref(), Some(json));
    }
}
