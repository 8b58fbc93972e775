//! Wall-clock abstraction for the session clock.
//!
//! The clock records elapsed time from wall-clock deltas, so the time
//! source sits behind a trait and tests substitute a manually-advanced
//! one.

use std::fmt;
use std::sync::Arc;

/// Source of "now" in milliseconds since the Unix epoch.
pub trait TimeSource: Send + Sync {
    fn now_ms(&self) -> u64;
}

/// System wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now_ms(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

/// Shared handle to a time source. Defaults to the system clock and is
/// skipped during serialization (a deserialized clock reads real time).
#[derive(Clone)]
pub struct TimeHandle(Arc<dyn TimeSource>);

impl TimeHandle {
    pub fn new(source: impl TimeSource + 'static) -> Self {
        Self(Arc::new(source))
    }

    pub fn now_ms(&self) -> u64 {
        self.0.now_ms()
    }
}

impl Default for TimeHandle {
    fn default() -> Self {
        Self(Arc::new(SystemClock))
    }
}

impl fmt::Debug for TimeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TimeHandle(..)")
    }
}
