//! Usage reports over the time pools.
//!
//! The dashboard view shows a rolling seven-day window of work/break
//! minutes plus a per-day task breakdown; the aggregation here feeds it.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::pool::{TaskTimePool, TimePool};

/// One day's usage in whole minutes (seconds rounded half-up).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayUsage {
    pub date: NaiveDate,
    pub work_min: u64,
    pub break_min: u64,
}

/// Seven days ending at the selected date, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekReport {
    pub days: Vec<DayUsage>,
    pub total_work_min: u64,
    pub total_break_min: u64,
}

impl WeekReport {
    pub fn total_min(&self) -> u64 {
        self.total_work_min + self.total_break_min
    }
}

/// One task's recorded usage on a given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskUsage {
    pub task_id: String,
    pub task_name: String,
    pub duration_secs: u64,
    pub sessions: u64,
}

fn round_to_min(secs: u64) -> u64 {
    (secs + 30) / 60
}

/// Build the seven-day report ending at `end` (inclusive).
pub fn week_report(pool: &TimePool, end: NaiveDate) -> WeekReport {
    let mut days = Vec::with_capacity(7);
    let mut total_work_min = 0;
    let mut total_break_min = 0;
    for offset in (0..7).rev() {
        let date = end - Days::new(offset);
        let bucket = pool.day(date);
        let usage = DayUsage {
            date,
            work_min: round_to_min(bucket.work),
            break_min: round_to_min(bucket.break_secs),
        };
        total_work_min += usage.work_min;
        total_break_min += usage.break_min;
        days.push(usage);
    }
    WeekReport {
        days,
        total_work_min,
        total_break_min,
    }
}

/// Per-task breakdown for one day, longest duration first.
pub fn day_tasks(pool: &TaskTimePool, date: NaiveDate) -> Vec<TaskUsage> {
    let mut usages: Vec<TaskUsage> = pool
        .day(date)
        .into_iter()
        .map(|(task_id, bucket)| TaskUsage {
            task_id,
            task_name: bucket.task_name,
            duration_secs: bucket.duration,
            sessions: bucket.sessions,
        })
        .collect();
    usages.sort_by(|a, b| b.duration_secs.cmp(&a.duration_secs));
    usages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::Category;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn week_report_covers_seven_days_oldest_first() {
        let pool = TimePool::default();
        let report = week_report(&pool, date(2024, 3, 7));
        assert_eq!(report.days.len(), 7);
        assert_eq!(report.days[0].date, date(2024, 3, 1));
        assert_eq!(report.days[6].date, date(2024, 3, 7));
        assert_eq!(report.total_min(), 0);
    }

    #[test]
    fn seconds_round_to_minutes() {
        let mut pool = TimePool::default();
        pool.record(date(2024, 3, 7), Category::Work, 89); // -> 1 min
        pool.record(date(2024, 3, 6), Category::Work, 90); // -> 2 min
        pool.record(date(2024, 3, 6), Category::Break, 29); // -> 0 min

        let report = week_report(&pool, date(2024, 3, 7));
        assert_eq!(report.days[6].work_min, 1);
        assert_eq!(report.days[5].work_min, 2);
        assert_eq!(report.days[5].break_min, 0);
        assert_eq!(report.total_work_min, 3);
        assert_eq!(report.total_break_min, 0);
    }

    #[test]
    fn days_outside_window_ignored() {
        let mut pool = TimePool::default();
        pool.record(date(2024, 2, 28), Category::Work, 3600);
        let report = week_report(&pool, date(2024, 3, 7));
        assert_eq!(report.total_work_min, 0);
    }

    #[test]
    fn day_tasks_sorted_by_duration() {
        let mut pool = TaskTimePool::default();
        pool.record(date(2024, 3, 7), "t-1", "short", 60);
        pool.record(date(2024, 3, 7), "t-2", "long", 600);

        let tasks = day_tasks(&pool, date(2024, 3, 7));
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].task_name, "long");
        assert_eq!(tasks[1].task_name, "short");
    }

    #[test]
    fn empty_day_yields_no_tasks() {
        let pool = TaskTimePool::default();
        assert!(day_tasks(&pool, date(2024, 3, 7)).is_empty());
    }
}
