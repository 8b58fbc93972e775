//! Task list commands.

use clap::Subcommand;
use focuspool_core::store::FileStore;
use focuspool_core::{Priority, TaskList, TimerKind};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a new task
    Add {
        /// Task title
        title: String,
        /// Priority: high, medium or low (default: medium)
        #[arg(long, default_value = "medium")]
        priority: String,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
        /// Timer type: countdown or countup (default: countdown)
        #[arg(long, default_value = "countdown")]
        timer: String,
    },
    /// List tasks
    List {
        /// Include completed tasks
        #[arg(long)]
        all: bool,
    },
    /// Flip a task's completion flag
    Toggle {
        /// Task ID
        id: String,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = FileStore::open()?;
    let tasks = TaskList::new(&store);

    match action {
        TaskAction::Add {
            title,
            priority,
            due,
            timer,
        } => {
            let priority = match priority.as_str() {
                "high" => Priority::High,
                "low" => Priority::Low,
                _ => Priority::Medium,
            };
            let timer_type = match timer.as_str() {
                "countup" => TimerKind::Countup,
                _ => TimerKind::Countdown,
            };
            if let Some(due) = &due {
                chrono::NaiveDate::parse_from_str(due, "%Y-%m-%d")
                    .map_err(|_| format!("invalid due date: {due}"))?;
            }
            let todo = tasks.add(&title, priority, due, timer_type)?;
            println!("Task created: {}", todo.id);
            println!("{}", serde_json::to_string_pretty(&todo)?);
        }
        TaskAction::List { all } => {
            let listed = if all { tasks.all()? } else { tasks.active()? };
            println!("{}", serde_json::to_string_pretty(&listed)?);
        }
        TaskAction::Toggle { id } => {
            let todo = tasks.toggle(&id)?;
            println!("{}", serde_json::to_string_pretty(&todo)?);
        }
        TaskAction::Delete { id } => {
            tasks.delete(&id)?;
            println!("Task deleted: {id}");
        }
    }
    Ok(())
}
