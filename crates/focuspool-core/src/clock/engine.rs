//! Session clock implementation.
//!
//! The clock is a wall-clock-based state machine. It does not use
//! internal threads - the caller is responsible for calling `tick()`
//! once per second while a session is running.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running <-> Paused -> Idle
//! ```
//!
//! The displayed `time_left_secs` moves one second per tick; the elapsed
//! time recorded on stop/complete is the wall-clock delta since start.
//! The two can diverge (device sleep, missed ticks) and the wall clock
//! wins for accounting.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::session::{Session, SessionMode, Subject};
use super::time::TimeHandle;
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockState {
    Idle,
    Running,
    Paused,
}

/// Core session clock.
///
/// Serializes to JSON so the CLI can carry a running session across
/// invocations. The time source is not serialized; a restored clock
/// reads the system wall clock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClock {
    state: ClockState,
    session: Option<Session>,
    /// Displayed seconds: remaining for countdown, elapsed for count-up.
    time_left_secs: u64,
    #[serde(skip, default)]
    time: TimeHandle,
}

impl SessionClock {
    pub fn new() -> Self {
        Self::with_time(TimeHandle::default())
    }

    pub fn with_time(time: TimeHandle) -> Self {
        Self {
            state: ClockState::Idle,
            session: None,
            time_left_secs: 0,
            time,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == ClockState::Running
    }

    pub fn time_left_secs(&self) -> u64 {
        self.time_left_secs
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Wall-clock seconds since the active session started.
    pub fn elapsed_secs(&self) -> u64 {
        match &self.session {
            Some(s) => self
                .time
                .now_ms()
                .saturating_sub(s.started_epoch_ms)
                / 1000,
            None => 0,
        }
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.state,
            subject: self.session.as_ref().map(|s| s.subject.clone()),
            mode: self.session.as_ref().map(|s| s.mode),
            time_left_secs: self.time_left_secs,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start a new session. Only valid from `Idle`; a start while a
    /// session is active is a no-op.
    pub fn start(&mut self, subject: Subject, mode: SessionMode) -> Option<Event> {
        if self.state != ClockState::Idle {
            return None;
        }
        self.time_left_secs = mode.initial_time_left();
        self.session = Some(Session {
            subject: subject.clone(),
            mode,
            started_epoch_ms: self.time.now_ms(),
        });
        self.state = ClockState::Running;
        Some(Event::SessionStarted {
            subject,
            mode,
            at: Utc::now(),
        })
    }

    /// Suspend the tick source. Displayed time and the session start
    /// stamp are retained.
    pub fn pause(&mut self) -> Option<Event> {
        match self.state {
            ClockState::Running => {
                self.state = ClockState::Paused;
                Some(Event::SessionPaused {
                    time_left_secs: self.time_left_secs,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    pub fn resume(&mut self) -> Option<Event> {
        match self.state {
            ClockState::Paused => {
                self.state = ClockState::Running;
                Some(Event::SessionResumed {
                    time_left_secs: self.time_left_secs,
                    at: Utc::now(),
                })
            }
            _ => None,
        }
    }

    /// Flip between Running and Paused.
    pub fn toggle(&mut self) -> Option<Event> {
        match self.state {
            ClockState::Running => self.pause(),
            ClockState::Paused => self.resume(),
            ClockState::Idle => None,
        }
    }

    /// Call once per second while Running. A countdown reaching zero
    /// completes the session and returns `Event::SessionCompleted`
    /// exactly once.
    pub fn tick(&mut self) -> Option<Event> {
        if self.state != ClockState::Running {
            return None;
        }
        let mode = self.session.as_ref()?.mode;
        match mode {
            SessionMode::CountUp => {
                self.time_left_secs = self.time_left_secs.saturating_add(1);
                None
            }
            SessionMode::Countdown { .. } => {
                self.time_left_secs = self.time_left_secs.saturating_sub(1);
                if self.time_left_secs == 0 {
                    return self.complete();
                }
                None
            }
        }
    }

    /// Stop the active session, from Running or Paused. Emits the
    /// wall-clock elapsed for aggregation and returns to Idle.
    pub fn stop(&mut self) -> Option<Event> {
        if self.state == ClockState::Idle {
            return None;
        }
        let elapsed_secs = self.elapsed_secs();
        let session = self.session.take()?;
        self.state = ClockState::Idle;
        self.time_left_secs = 0;
        Some(Event::SessionStopped {
            subject: session.subject,
            elapsed_secs,
            at: Utc::now(),
        })
    }

    /// Discard the active session without recording anything.
    pub fn reset(&mut self) -> Option<Event> {
        self.state = ClockState::Idle;
        self.session = None;
        self.time_left_secs = 0;
        Some(Event::SessionReset { at: Utc::now() })
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Countdown-only. Same elapsed computation as `stop`.
    fn complete(&mut self) -> Option<Event> {
        let elapsed_secs = self.elapsed_secs();
        let session = self.session.take()?;
        self.state = ClockState::Idle;
        self.time_left_secs = 0;
        Some(Event::SessionCompleted {
            subject: session.subject,
            elapsed_secs,
            at: Utc::now(),
        })
    }
}

impl Default for SessionClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::session::Category;
    use crate::clock::time::test_support::ManualClock;

    fn clock_at(ms: u64) -> (SessionClock, ManualClock) {
        let manual = ManualClock::at(ms);
        let clock = SessionClock::with_time(TimeHandle::new(manual.clone()));
        (clock, manual)
    }

    #[test]
    fn start_pause_resume() {
        let (mut clock, _time) = clock_at(0);
        assert_eq!(clock.state(), ClockState::Idle);

        assert!(clock
            .start(
                Subject::category(Category::Work),
                SessionMode::Countdown { duration_secs: 1500 }
            )
            .is_some());
        assert_eq!(clock.state(), ClockState::Running);
        assert_eq!(clock.time_left_secs(), 1500);

        assert!(clock.pause().is_some());
        assert_eq!(clock.state(), ClockState::Paused);

        assert!(clock.resume().is_some());
        assert_eq!(clock.state(), ClockState::Running);
    }

    #[test]
    fn start_while_active_is_noop() {
        let (mut clock, _time) = clock_at(0);
        clock.start(Subject::category(Category::Work), SessionMode::CountUp);
        assert!(clock
            .start(Subject::category(Category::Break), SessionMode::CountUp)
            .is_none());
        // First subject retained.
        assert_eq!(
            clock.session().unwrap().subject,
            Subject::category(Category::Work)
        );
    }

    #[test]
    fn toggle_flips_running_and_paused() {
        let (mut clock, _time) = clock_at(0);
        assert!(clock.toggle().is_none()); // Idle: nothing to toggle.

        clock.start(Subject::category(Category::Work), SessionMode::CountUp);
        clock.toggle();
        assert_eq!(clock.state(), ClockState::Paused);
        clock.toggle();
        assert_eq!(clock.state(), ClockState::Running);
    }

    #[test]
    fn pause_retains_time_left_and_start_stamp() {
        let (mut clock, time) = clock_at(10_000);
        clock.start(
            Subject::task("t-1", "report"),
            SessionMode::Countdown { duration_secs: 60 },
        );
        for _ in 0..10 {
            time.advance_secs(1);
            clock.tick();
        }
        assert_eq!(clock.time_left_secs(), 50);

        clock.pause();
        assert_eq!(clock.time_left_secs(), 50);
        assert_eq!(clock.session().unwrap().started_epoch_ms, 10_000);
    }

    #[test]
    fn countdown_completes_exactly_once() {
        let (mut clock, time) = clock_at(0);
        clock.start(
            Subject::category(Category::Work),
            SessionMode::Countdown { duration_secs: 3 },
        );

        time.advance_secs(1);
        assert!(clock.tick().is_none());
        time.advance_secs(1);
        assert!(clock.tick().is_none());
        time.advance_secs(1);
        let event = clock.tick();
        match event {
            Some(Event::SessionCompleted { elapsed_secs, .. }) => {
                assert_eq!(elapsed_secs, 3);
            }
            other => panic!("expected SessionCompleted, got {other:?}"),
        }
        assert_eq!(clock.state(), ClockState::Idle);
        assert!(clock.session().is_none());
        // Further ticks are no-ops.
        assert!(clock.tick().is_none());
    }

    #[test]
    fn full_countdown_records_configured_duration() {
        let (mut clock, time) = clock_at(0);
        clock.start(
            Subject::category(Category::Work),
            SessionMode::Countdown { duration_secs: 1500 },
        );
        let mut completed = Vec::new();
        for _ in 0..1500 {
            time.advance_secs(1);
            if let Some(e) = clock.tick() {
                completed.push(e);
            }
        }
        assert_eq!(completed.len(), 1);
        match &completed[0] {
            Event::SessionCompleted { elapsed_secs, .. } => assert_eq!(*elapsed_secs, 1500),
            other => panic!("expected SessionCompleted, got {other:?}"),
        }
        assert_eq!(clock.state(), ClockState::Idle);
    }

    #[test]
    fn countup_stop_records_wall_clock_elapsed() {
        let (mut clock, time) = clock_at(0);
        clock.start(Subject::task("t-1", "reading"), SessionMode::CountUp);
        for _ in 0..10 {
            time.advance_secs(1);
            clock.tick();
        }
        assert_eq!(clock.time_left_secs(), 10);

        match clock.stop() {
            Some(Event::SessionStopped { elapsed_secs, .. }) => assert_eq!(elapsed_secs, 10),
            other => panic!("expected SessionStopped, got {other:?}"),
        }
        assert_eq!(clock.state(), ClockState::Idle);
        assert_eq!(clock.time_left_secs(), 0);
    }

    #[test]
    fn stop_from_paused_counts_wall_clock() {
        // Pauses don't move the start stamp, so paused time is billed.
        let (mut clock, time) = clock_at(0);
        clock.start(Subject::task("t-1", "reading"), SessionMode::CountUp);
        time.advance_secs(30);
        clock.pause();
        time.advance_secs(15);
        match clock.stop() {
            Some(Event::SessionStopped { elapsed_secs, .. }) => assert_eq!(elapsed_secs, 45),
            other => panic!("expected SessionStopped, got {other:?}"),
        }
    }

    #[test]
    fn stop_while_idle_is_noop() {
        let (mut clock, _time) = clock_at(0);
        assert!(clock.stop().is_none());
    }

    #[test]
    fn reset_discards_session() {
        let (mut clock, _time) = clock_at(0);
        clock.start(Subject::task("t-1", "reading"), SessionMode::CountUp);
        clock.reset();
        assert_eq!(clock.state(), ClockState::Idle);
        assert!(clock.session().is_none());
    }

    #[test]
    fn wall_clock_elapsed_diverges_from_ticks() {
        // Device-sleep shape: wall clock moved further than ticks did.
        let (mut clock, time) = clock_at(0);
        clock.start(Subject::task("t-1", "reading"), SessionMode::CountUp);
        time.advance_secs(1);
        clock.tick();
        time.advance_secs(600); // suspend, no ticks delivered
        time.advance_secs(1);
        clock.tick();
        assert_eq!(clock.time_left_secs(), 2);
        match clock.stop() {
            Some(Event::SessionStopped { elapsed_secs, .. }) => assert_eq!(elapsed_secs, 602),
            other => panic!("expected SessionStopped, got {other:?}"),
        }
    }

    #[test]
    fn serde_roundtrip_preserves_session() {
        let (mut clock, time) = clock_at(5_000);
        clock.start(
            Subject::task("t-9", "deep work"),
            SessionMode::Countdown { duration_secs: 300 },
        );
        time.advance_secs(5);
        clock.tick();

        let json = serde_json::to_string(&clock).unwrap();
        let restored: SessionClock = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.state(), ClockState::Running);
        assert_eq!(restored.time_left_secs(), 299);
        assert_eq!(restored.session().unwrap().started_epoch_ms, 5_000);
    }
}
