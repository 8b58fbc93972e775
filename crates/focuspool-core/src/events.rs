use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::{ClockState, SessionMode, Subject};

/// Every clock transition produces an Event.
/// The front end renders them; the tracker folds the terminal ones
/// (`SessionCompleted`, `SessionStopped`) into the time pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    SessionStarted {
        subject: Subject,
        mode: SessionMode,
        at: DateTime<Utc>,
    },
    SessionPaused {
        time_left_secs: u64,
        at: DateTime<Utc>,
    },
    SessionResumed {
        time_left_secs: u64,
        at: DateTime<Utc>,
    },
    /// Countdown reached zero. `elapsed_secs` is the wall-clock session
    /// length, which is what gets recorded.
    SessionCompleted {
        subject: Subject,
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    /// User stopped a running or paused session before completion.
    SessionStopped {
        subject: Subject,
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    /// Active session discarded without recording.
    SessionReset {
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: ClockState,
        subject: Option<Subject>,
        mode: Option<SessionMode>,
        time_left_secs: u64,
        at: DateTime<Utc>,
    },
}
