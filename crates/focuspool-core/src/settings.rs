//! User settings persisted as individual store keys.
//!
//! `workTime`/`breakTime` are stored as integer seconds,
//! `soundEnabled`/`autoStart` as boolean strings. Absent or
//! malformed values fall back to defaults; numeric values are clamped to
//! a minimum of one second on save.

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::store::{keys, KeyValueStore};

pub const DEFAULT_WORK_SECS: u64 = 1500;
pub const DEFAULT_BREAK_SECS: u64 = 300;
pub const MIN_DURATION_SECS: u64 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Focus session length, seconds.
    pub work_secs: u64,
    /// Break session length, seconds.
    pub break_secs: u64,
    /// Play a sound when a countdown completes.
    pub sound_enabled: bool,
    /// Automatically start the opposite category when one completes.
    pub auto_start: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            work_secs: DEFAULT_WORK_SECS,
            break_secs: DEFAULT_BREAK_SECS,
            sound_enabled: true,
            auto_start: false,
        }
    }
}

impl Settings {
    /// Load from the store, defaulting each absent or malformed key.
    ///
    /// # Errors
    /// Returns an error only if the store itself fails; bad values never
    /// do.
    pub fn load(store: &impl KeyValueStore) -> Result<Self, StoreError> {
        let defaults = Self::default();
        Ok(Self {
            work_secs: parse_secs(store.get(keys::WORK_TIME)?, keys::WORK_TIME, defaults.work_secs),
            break_secs: parse_secs(
                store.get(keys::BREAK_TIME)?,
                keys::BREAK_TIME,
                defaults.break_secs,
            ),
            sound_enabled: parse_bool(
                store.get(keys::SOUND_ENABLED)?,
                keys::SOUND_ENABLED,
                defaults.sound_enabled,
            ),
            auto_start: parse_bool(
                store.get(keys::AUTO_START)?,
                keys::AUTO_START,
                defaults.auto_start,
            ),
        })
    }

    /// Persist every setting, clamping durations to at least one second.
    ///
    /// # Errors
    /// Returns an error if the store cannot be written.
    pub fn save(&self, store: &impl KeyValueStore) -> Result<(), StoreError> {
        let work = self.work_secs.max(MIN_DURATION_SECS);
        let brk = self.break_secs.max(MIN_DURATION_SECS);
        store.set(keys::WORK_TIME, &work.to_string())?;
        store.set(keys::BREAK_TIME, &brk.to_string())?;
        store.set(keys::SOUND_ENABLED, &self.sound_enabled.to_string())?;
        store.set(keys::AUTO_START, &self.auto_start.to_string())?;
        Ok(())
    }
}

fn parse_secs(raw: Option<String>, key: &str, default: u64) -> u64 {
    match raw {
        None => default,
        Some(s) => match s.trim().parse::<u64>() {
            Ok(v) => v.max(MIN_DURATION_SECS),
            Err(_) => {
                tracing::warn!(key, value = %s, "malformed duration, using default");
                default
            }
        },
    }
}

fn parse_bool(raw: Option<String>, key: &str, default: bool) -> bool {
    match raw.as_deref().map(str::trim) {
        None => default,
        Some("true") => true,
        Some("false") => false,
        Some(s) => {
            tracing::warn!(key, value = %s, "malformed boolean, using default");
            default
        }
    }
}
