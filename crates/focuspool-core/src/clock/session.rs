use serde::{Deserialize, Serialize};

/// How a session's displayed time moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SessionMode {
    /// Counts down from a fixed duration; completion fires at zero.
    Countdown { duration_secs: u64 },
    /// Counts up unboundedly; only `stop` ends it.
    CountUp,
}

impl SessionMode {
    pub fn is_countdown(&self) -> bool {
        matches!(self, SessionMode::Countdown { .. })
    }

    /// Initial displayed value for this mode.
    pub fn initial_time_left(&self) -> u64 {
        match self {
            SessionMode::Countdown { duration_secs } => *duration_secs,
            SessionMode::CountUp => 0,
        }
    }
}

/// Work/break split for sessions not tied to a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Work,
    Break,
}

impl Category {
    pub fn opposite(self) -> Self {
        match self {
            Category::Work => Category::Break,
            Category::Break => Category::Work,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Work => "work",
            Category::Break => "break",
        }
    }
}

/// What a session's time is attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Subject {
    Task { id: String, label: String },
    Category { category: Category },
}

impl Subject {
    pub fn task(id: impl Into<String>, label: impl Into<String>) -> Self {
        Subject::Task {
            id: id.into(),
            label: label.into(),
        }
    }

    pub fn category(category: Category) -> Self {
        Subject::Category { category }
    }

    /// Display label for rendering.
    pub fn label(&self) -> &str {
        match self {
            Subject::Task { label, .. } => label,
            Subject::Category { category } => category.as_str(),
        }
    }
}

/// One continuous run of the clock from start to stop/complete.
/// Ephemeral: destroyed when its elapsed time is folded into the pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub subject: Subject,
    pub mode: SessionMode,
    /// Wall-clock start, ms since epoch. Never adjusted after start;
    /// recorded elapsed is the delta against this.
    pub started_epoch_ms: u64,
}
