//! Time pool report commands.

use chrono::{NaiveDate, Utc};
use clap::Subcommand;
use focuspool_core::store::FileStore;
use focuspool_core::{day_tasks, week_report, TaskTimePool, TimePool};

#[derive(Subcommand)]
pub enum PoolAction {
    /// One day's work/break totals
    Day {
        /// Date (YYYY-MM-DD, default today)
        date: Option<String>,
    },
    /// Seven-day report ending at a date
    Week {
        /// Last day of the window (YYYY-MM-DD, default today)
        #[arg(long)]
        end: Option<String>,
    },
    /// Per-task breakdown for one day
    Tasks {
        /// Date (YYYY-MM-DD, default today)
        date: Option<String>,
    },
}

fn parse_date(raw: Option<String>) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    match raw {
        None => Ok(Utc::now().date_naive()),
        Some(s) => {
            NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(|_| format!("invalid date: {s}").into())
        }
    }
}

pub fn run(action: PoolAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = FileStore::open()?;

    match action {
        PoolAction::Day { date } => {
            let date = parse_date(date)?;
            let pool = TimePool::load(&store)?;
            let bucket = pool.day(date);
            println!("{}", serde_json::to_string_pretty(&bucket)?);
        }
        PoolAction::Week { end } => {
            let end = parse_date(end)?;
            let pool = TimePool::load(&store)?;
            let report = week_report(&pool, end);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        PoolAction::Tasks { date } => {
            let date = parse_date(date)?;
            let pool = TaskTimePool::load(&store)?;
            let usages = day_tasks(&pool, date);
            println!("{}", serde_json::to_string_pretty(&usages)?);
        }
    }
    Ok(())
}
