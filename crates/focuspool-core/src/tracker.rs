//! Session tracking: wires the clock to the aggregator and the store.
//!
//! Terminal clock events (`SessionCompleted`, `SessionStopped`) are
//! folded into the day's pool the moment they fire; the clock itself is
//! persisted under `sessionClock` so a session survives across CLI
//! invocations.

use chrono::Utc;

use crate::clock::{Category, SessionClock, SessionMode, Subject};
use crate::error::Result;
use crate::events::Event;
use crate::pool::Aggregator;
use crate::settings::Settings;
use crate::store::{keys, KeyValueStore};
use crate::tasks::Todo;

pub struct Tracker<'a, S: KeyValueStore> {
    store: &'a S,
    clock: SessionClock,
    settings: Settings,
}

impl<'a, S: KeyValueStore> Tracker<'a, S> {
    /// Load settings and any persisted clock from the store.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read.
    pub fn load(store: &'a S) -> Result<Self> {
        let settings = Settings::load(store)?;
        let clock = match store.get(keys::SESSION_CLOCK)? {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(clock) => clock,
                Err(e) => {
                    tracing::warn!(error = %e, "malformed clock JSON, starting idle");
                    SessionClock::new()
                }
            },
            None => SessionClock::new(),
        };
        Ok(Self {
            store,
            clock,
            settings,
        })
    }

    /// Build around an explicit clock (tests inject a manual time
    /// source this way).
    ///
    /// # Errors
    /// Returns an error if settings cannot be read.
    pub fn with_clock(store: &'a S, clock: SessionClock) -> Result<Self> {
        let settings = Settings::load(store)?;
        Ok(Self {
            store,
            clock,
            settings,
        })
    }

    pub fn clock(&self) -> &SessionClock {
        &self.clock
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // ── Intents ──────────────────────────────────────────────────────

    /// Start a session for a task, countdown or count-up per the task.
    ///
    /// # Errors
    /// Returns an error if the clock cannot be persisted.
    pub fn start_task(&mut self, todo: &Todo) -> Result<Option<Event>> {
        let mode = todo.session_mode(&self.settings);
        let event = self
            .clock
            .start(Subject::task(todo.id.clone(), todo.title.clone()), mode);
        self.save_clock()?;
        Ok(event)
    }

    /// Start a work or break countdown with the configured duration.
    ///
    /// # Errors
    /// Returns an error if the clock cannot be persisted.
    pub fn start_category(&mut self, category: Category) -> Result<Option<Event>> {
        let duration_secs = match category {
            Category::Work => self.settings.work_secs,
            Category::Break => self.settings.break_secs,
        };
        let event = self.clock.start(
            Subject::category(category),
            SessionMode::Countdown { duration_secs },
        );
        self.save_clock()?;
        Ok(event)
    }

    /// # Errors
    /// Returns an error if the clock cannot be persisted.
    pub fn pause(&mut self) -> Result<Option<Event>> {
        let event = self.clock.pause();
        self.save_clock()?;
        Ok(event)
    }

    /// # Errors
    /// Returns an error if the clock cannot be persisted.
    pub fn resume(&mut self) -> Result<Option<Event>> {
        let event = self.clock.resume();
        self.save_clock()?;
        Ok(event)
    }

    /// # Errors
    /// Returns an error if the clock cannot be persisted.
    pub fn toggle(&mut self) -> Result<Option<Event>> {
        let event = self.clock.toggle();
        self.save_clock()?;
        Ok(event)
    }

    /// Advance the clock by one second. A completed countdown is
    /// recorded immediately; when a work/break session completes and
    /// auto-start is on, the opposite category re-arms at once.
    ///
    /// # Errors
    /// Returns an error if recording or persisting fails.
    pub fn tick(&mut self) -> Result<Option<Event>> {
        let event = self.clock.tick();
        if let Some(Event::SessionCompleted {
            subject,
            elapsed_secs,
            ..
        }) = &event
        {
            self.record(subject, *elapsed_secs)?;
            if let Subject::Category { category } = subject {
                if self.settings.auto_start {
                    self.start_category(category.opposite())?;
                }
            }
        }
        self.save_clock()?;
        Ok(event)
    }

    /// Stop the active session and record its wall-clock elapsed time.
    ///
    /// # Errors
    /// Returns an error if recording or persisting fails.
    pub fn stop(&mut self) -> Result<Option<Event>> {
        let event = self.clock.stop();
        if let Some(Event::SessionStopped {
            subject,
            elapsed_secs,
            ..
        }) = &event
        {
            self.record(subject, *elapsed_secs)?;
        }
        self.save_clock()?;
        Ok(event)
    }

    /// Discard the active session without recording.
    ///
    /// # Errors
    /// Returns an error if the clock cannot be persisted.
    pub fn reset(&mut self) -> Result<Option<Event>> {
        let event = self.clock.reset();
        self.save_clock()?;
        Ok(event)
    }

    pub fn snapshot(&self) -> Event {
        self.clock.snapshot()
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn record(&self, subject: &Subject, elapsed_secs: u64) -> Result<()> {
        let today = Utc::now().date_naive();
        Aggregator::new(self.store).record(today, subject, elapsed_secs)
    }

    fn save_clock(&self) -> Result<()> {
        self.store
            .set(keys::SESSION_CLOCK, &serde_json::to_string(&self.clock)?)?;
        Ok(())
    }
}
