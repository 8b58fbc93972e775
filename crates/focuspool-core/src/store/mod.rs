//! Persisted key-value store.
//!
//! All application state lives as string values under fixed keys,
//! mirroring the host-storage layout the app has always used. The store
//! is injected into everything that persists, so tests run against
//! [`MemoryStore`] and the real app against [`FileStore`].

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::path::PathBuf;

use crate::error::StoreError;

/// Persisted key names.
pub mod keys {
    pub const WORK_TIME: &str = "workTime";
    pub const BREAK_TIME: &str = "breakTime";
    pub const SOUND_ENABLED: &str = "soundEnabled";
    pub const AUTO_START: &str = "autoStart";
    pub const CHARACTER_IMAGE: &str = "characterImage";
    pub const TODOS: &str = "todos";
    pub const TIME_POOL: &str = "timePool";
    pub const TASK_TIME_POOL: &str = "taskTimePool";
    pub const SESSION_CLOCK: &str = "sessionClock";
}

/// String key-value storage contract.
pub trait KeyValueStore {
    /// Read a key. `Ok(None)` when absent.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a key, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove a key. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Returns `~/.config/focuspool[-dev]/` based on FOCUSPOOL_ENV.
///
/// Set FOCUSPOOL_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StoreError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("FOCUSPOOL_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("focuspool-dev")
    } else {
        base_dir.join("focuspool")
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StoreError::Unavailable(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}

/// Which persisted state a reset clears.
#[derive(Debug, Clone, Copy)]
pub struct DataResetOptions {
    pub todos: bool,
    pub pools: bool,
    pub character_image: bool,
    pub settings: bool,
}

impl DataResetOptions {
    /// The "clear all data" action: todos, pools and the character
    /// image, with settings left in place.
    pub fn user_data() -> Self {
        Self {
            todos: true,
            pools: true,
            character_image: true,
            settings: false,
        }
    }

    pub fn everything() -> Self {
        Self {
            todos: true,
            pools: true,
            character_image: true,
            settings: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DataResetSummary {
    pub cleared_keys: usize,
}

/// Clear the selected keys.
///
/// # Errors
/// Returns an error if the store cannot remove a key.
pub fn reset_data(
    store: &impl KeyValueStore,
    options: DataResetOptions,
) -> Result<DataResetSummary, StoreError> {
    let mut selected: Vec<&str> = Vec::new();
    if options.todos {
        selected.push(keys::TODOS);
    }
    if options.pools {
        selected.push(keys::TIME_POOL);
        selected.push(keys::TASK_TIME_POOL);
    }
    if options.character_image {
        selected.push(keys::CHARACTER_IMAGE);
    }
    if options.settings {
        selected.push(keys::WORK_TIME);
        selected.push(keys::BREAK_TIME);
        selected.push(keys::SOUND_ENABLED);
        selected.push(keys::AUTO_START);
    }

    let mut summary = DataResetSummary::default();
    for key in selected {
        if store.get(key)?.is_some() {
            store.remove(key)?;
            summary.cleared_keys += 1;
        }
    }
    tracing::info!(cleared = summary.cleared_keys, "data reset");
    Ok(summary)
}
