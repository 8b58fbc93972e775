//! Time pool: per-day aggregation of recorded session time.
//!
//! Two persisted layouts:
//! - `timePool` buckets work/break seconds per date.
//! - `taskTimePool` buckets duration and session count per task per date.
//!
//! Buckets are created lazily on first record and only ever grow; an
//! explicit data reset is the only way anything is deleted. Persisting
//! always overwrites the whole structure.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::clock::{Category, Subject};
use crate::error::Result;
use crate::store::{keys, KeyValueStore};

const DATE_FMT: &str = "%Y-%m-%d";

fn date_key(date: NaiveDate) -> String {
    date.format(DATE_FMT).to_string()
}

/// One day's work/break seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBucket {
    #[serde(default)]
    pub work: u64,
    #[serde(default, rename = "break")]
    pub break_secs: u64,
}

impl CategoryBucket {
    pub fn total_secs(&self) -> u64 {
        self.work + self.break_secs
    }
}

/// One day's recorded time for a single task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskBucket {
    pub task_name: String,
    /// Accumulated seconds.
    pub duration: u64,
    /// Number of recorded sessions.
    pub sessions: u64,
}

/// Category pool: date -> work/break seconds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimePool {
    days: BTreeMap<String, CategoryBucket>,
}

impl TimePool {
    /// Load from the store; absent or malformed JSON yields an empty
    /// pool.
    ///
    /// # Errors
    /// Returns an error only if the store read fails.
    pub fn load(store: &impl KeyValueStore) -> Result<Self> {
        load_or_default(store, keys::TIME_POOL)
    }

    /// Overwrite the persisted pool with this one.
    ///
    /// # Errors
    /// Returns an error if serialization or the store write fails.
    pub fn save(&self, store: &impl KeyValueStore) -> Result<()> {
        store.set(keys::TIME_POOL, &serde_json::to_string(self)?)?;
        Ok(())
    }

    /// Fold `elapsed_secs` into the day's bucket, creating it lazily.
    pub fn record(&mut self, date: NaiveDate, category: Category, elapsed_secs: u64) {
        let bucket = self.days.entry(date_key(date)).or_default();
        match category {
            Category::Work => bucket.work += elapsed_secs,
            Category::Break => bucket.break_secs += elapsed_secs,
        }
    }

    pub fn day(&self, date: NaiveDate) -> CategoryBucket {
        self.days.get(&date_key(date)).copied().unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Task pool: date -> task id -> bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskTimePool {
    days: BTreeMap<String, BTreeMap<String, TaskBucket>>,
}

impl TaskTimePool {
    /// Load from the store; absent or malformed JSON yields an empty
    /// pool.
    ///
    /// # Errors
    /// Returns an error only if the store read fails.
    pub fn load(store: &impl KeyValueStore) -> Result<Self> {
        load_or_default(store, keys::TASK_TIME_POOL)
    }

    /// Overwrite the persisted pool with this one.
    ///
    /// # Errors
    /// Returns an error if serialization or the store write fails.
    pub fn save(&self, store: &impl KeyValueStore) -> Result<()> {
        store.set(keys::TASK_TIME_POOL, &serde_json::to_string(self)?)?;
        Ok(())
    }

    /// Fold one session into the day's bucket for `task_id`, creating
    /// the bucket lazily.
    pub fn record(&mut self, date: NaiveDate, task_id: &str, task_name: &str, elapsed_secs: u64) {
        let bucket = self
            .days
            .entry(date_key(date))
            .or_default()
            .entry(task_id.to_string())
            .or_insert_with(|| TaskBucket {
                task_name: task_name.to_string(),
                duration: 0,
                sessions: 0,
            });
        bucket.duration += elapsed_secs;
        bucket.sessions += 1;
    }

    /// Task buckets for one day, empty map when nothing was recorded.
    pub fn day(&self, date: NaiveDate) -> BTreeMap<String, TaskBucket> {
        self.days.get(&date_key(date)).cloned().unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

fn load_or_default<T>(store: &impl KeyValueStore, key: &str) -> Result<T>
where
    T: Default + serde::de::DeserializeOwned,
{
    match store.get(key)? {
        None => Ok(T::default()),
        Some(raw) => match serde_json::from_str(&raw) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "malformed pool JSON, starting empty");
                Ok(T::default())
            }
        },
    }
}

/// Folds completed/stopped sessions into the persisted pools.
pub struct Aggregator<'a, S: KeyValueStore> {
    store: &'a S,
}

impl<'a, S: KeyValueStore> Aggregator<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Record one session: load the pool the subject belongs to, fold
    /// the elapsed seconds in, persist the whole structure back.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read or written.
    pub fn record(&self, date: NaiveDate, subject: &Subject, elapsed_secs: u64) -> Result<()> {
        match subject {
            Subject::Task { id, label } => {
                let mut pool = TaskTimePool::load(self.store)?;
                pool.record(date, id, label, elapsed_secs);
                pool.save(self.store)?;
                tracing::debug!(task = %id, elapsed_secs, %date, "session recorded");
            }
            Subject::Category { category } => {
                let mut pool = TimePool::load(self.store)?;
                pool.record(date, *category, elapsed_secs);
                pool.save(self.store)?;
                tracing::debug!(category = category.as_str(), elapsed_secs, %date, "session recorded");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use proptest::prelude::*;

    fn day1() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn task_record_is_additive() {
        let mut pool = TaskTimePool::default();
        pool.record(day1(), "t-1", "report", 30);
        pool.record(day1(), "t-1", "report", 45);

        let day = pool.day(day1());
        let bucket = &day["t-1"];
        assert_eq!(bucket.duration, 75);
        assert_eq!(bucket.sessions, 2);
        assert_eq!(bucket.task_name, "report");
    }

    #[test]
    fn buckets_created_lazily_per_key() {
        let mut pool = TaskTimePool::default();
        assert!(pool.day(day1()).is_empty());
        pool.record(day1(), "t-1", "report", 300);
        pool.record(day1(), "t-2", "reading", 600);
        let day = pool.day(day1());
        assert_eq!(day.len(), 2);
        assert_eq!(day["t-2"].sessions, 1);
    }

    #[test]
    fn same_day_same_task_accumulates() {
        let mut pool = TaskTimePool::default();
        pool.record(day1(), "t-1", "report", 300);
        pool.record(day1(), "t-1", "report", 600);
        let day = pool.day(day1());
        assert_eq!(day["t-1"].duration, 900);
        assert_eq!(day["t-1"].sessions, 2);
    }

    #[test]
    fn category_pool_splits_work_and_break() {
        let mut pool = TimePool::default();
        pool.record(day1(), Category::Work, 1500);
        pool.record(day1(), Category::Break, 300);
        pool.record(day1(), Category::Work, 900);

        let bucket = pool.day(day1());
        assert_eq!(bucket.work, 2400);
        assert_eq!(bucket.break_secs, 300);
        assert_eq!(bucket.total_secs(), 2700);
    }

    #[test]
    fn persisted_layout_is_stable() {
        let mut pool = TimePool::default();
        pool.record(day1(), Category::Work, 300);
        pool.record(day1(), Category::Break, 60);
        let json = serde_json::to_value(&pool).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"2024-03-01": {"work": 300, "break": 60}})
        );

        let mut tasks = TaskTimePool::default();
        tasks.record(day1(), "t-1", "report", 120);
        let json = serde_json::to_value(&tasks).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "2024-03-01": {"t-1": {"taskName": "report", "duration": 120, "sessions": 1}}
            })
        );
    }

    #[test]
    fn aggregator_routes_by_subject_and_persists() {
        let store = MemoryStore::new();
        let aggregator = Aggregator::new(&store);
        aggregator
            .record(day1(), &Subject::task("t-1", "report"), 300)
            .unwrap();
        aggregator
            .record(day1(), &Subject::category(Category::Break), 60)
            .unwrap();

        let tasks = TaskTimePool::load(&store).unwrap();
        assert_eq!(tasks.day(day1())["t-1"].duration, 300);
        let pool = TimePool::load(&store).unwrap();
        assert_eq!(pool.day(day1()).break_secs, 60);
    }

    #[test]
    fn malformed_json_falls_back_to_empty() {
        let store = MemoryStore::new();
        store.set(keys::TIME_POOL, "not json {").unwrap();
        let pool = TimePool::load(&store).unwrap();
        assert!(pool.is_empty());
    }

    #[test]
    fn empty_store_loads_empty_pools() {
        let store = MemoryStore::new();
        assert!(TimePool::load(&store).unwrap().is_empty());
        assert!(TaskTimePool::load(&store).unwrap().is_empty());
    }

    proptest! {
        /// Recording is additive and order-independent within a day:
        /// any permutation of the same sessions yields the same totals.
        #[test]
        fn record_order_is_irrelevant(mut sessions in proptest::collection::vec(
            (0u8..3, 1u64..3600),
            1..12,
        )) {
            let ids = ["t-1", "t-2", "t-3"];
            let mut forward = TaskTimePool::default();
            for (which, secs) in &sessions {
                let id = ids[*which as usize];
                forward.record(day1(), id, id, *secs);
            }
            sessions.reverse();
            let mut backward = TaskTimePool::default();
            for (which, secs) in &sessions {
                let id = ids[*which as usize];
                backward.record(day1(), id, id, *secs);
            }
            prop_assert_eq!(forward, backward);
        }
    }
}
