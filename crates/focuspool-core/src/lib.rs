//! # Focuspool Core Library
//!
//! Core business logic for Focuspool, a focus timer with a per-day
//! time pool. All operations are available to any front end; the
//! bundled CLI is a thin layer over this library.
//!
//! ## Architecture
//!
//! - **Session Clock**: a wall-clock-based state machine that requires
//!   the caller to invoke `tick()` once per second while running
//! - **Time Pool**: per-day aggregation of recorded session time,
//!   persisted through a string key-value store
//! - **Store**: injected key-value storage with file-backed and
//!   in-memory implementations
//!
//! ## Key Components
//!
//! - [`SessionClock`]: the timer state machine
//! - [`Tracker`]: wires clock events into the time pool
//! - [`TaskList`]: the persisted task list
//! - [`Settings`]: user preferences with safe defaults

pub mod character;
pub mod clock;
pub mod error;
pub mod events;
pub mod pool;
pub mod settings;
pub mod stats;
pub mod store;
pub mod tasks;
pub mod tracker;

pub use clock::{Category, ClockState, SessionClock, SessionMode, Subject};
pub use error::{CoreError, StoreError, ValidationError};
pub use events::Event;
pub use pool::{Aggregator, TaskTimePool, TimePool};
pub use settings::Settings;
pub use stats::{day_tasks, week_report, DayUsage, TaskUsage, WeekReport};
pub use store::{DataResetOptions, DataResetSummary, FileStore, KeyValueStore, MemoryStore};
pub use tasks::{Priority, TaskList, TimerKind, Todo};
pub use tracker::Tracker;
