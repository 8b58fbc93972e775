use clap::Subcommand;
use focuspool_core::store::FileStore;
use focuspool_core::{Category, ClockState, Event, TaskList, Tracker};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start a session for a task or a work/break category
    Start {
        /// Task ID to attribute the session to
        #[arg(long, conflicts_with = "category")]
        task: Option<String>,
        /// Category session: "work" or "break" (default work)
        #[arg(long)]
        category: Option<String>,
    },
    /// Pause the running session
    Pause,
    /// Resume a paused session
    Resume,
    /// Flip between running and paused
    Toggle,
    /// Stop the session and record its elapsed time
    Stop,
    /// Discard the session without recording
    Reset,
    /// Tick once and print the current state as JSON
    Status,
    /// Run in the foreground, ticking once per second
    Watch,
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = FileStore::open()?;
    let mut tracker = Tracker::load(&store)?;

    match action {
        TimerAction::Start { task, category } => {
            let event = match task {
                Some(id) => {
                    let todo = TaskList::new(&store)
                        .get(&id)?
                        .ok_or_else(|| format!("task not found: {id}"))?;
                    tracker.start_task(&todo)?
                }
                None => {
                    let category = match category.as_deref() {
                        Some("break") => Category::Break,
                        Some("work") | None => Category::Work,
                        Some(other) => return Err(format!("unknown category: {other}").into()),
                    };
                    tracker.start_category(category)?
                }
            };
            print_event_or_snapshot(event, &tracker)?;
        }
        TimerAction::Pause => {
            let event = tracker.pause()?;
            print_event_or_snapshot(event, &tracker)?;
        }
        TimerAction::Resume => {
            let event = tracker.resume()?;
            print_event_or_snapshot(event, &tracker)?;
        }
        TimerAction::Toggle => {
            let event = tracker.toggle()?;
            print_event_or_snapshot(event, &tracker)?;
        }
        TimerAction::Stop => {
            let event = tracker.stop()?;
            print_event_or_snapshot(event, &tracker)?;
        }
        TimerAction::Reset => {
            let event = tracker.reset()?;
            print_event_or_snapshot(event, &tracker)?;
        }
        TimerAction::Status => {
            // Tick to surface a completion that happened since the last
            // invocation.
            if let Some(event) = tracker.tick()? {
                println!("{}", serde_json::to_string_pretty(&event)?);
            }
            println!("{}", serde_json::to_string_pretty(&tracker.snapshot())?);
        }
        TimerAction::Watch => watch(&mut tracker)?,
    }

    Ok(())
}

fn print_event_or_snapshot<S: focuspool_core::KeyValueStore>(
    event: Option<Event>,
    tracker: &Tracker<'_, S>,
) -> Result<(), Box<dyn std::error::Error>> {
    match event {
        Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
        None => println!("{}", serde_json::to_string_pretty(&tracker.snapshot())?),
    }
    Ok(())
}

/// Foreground tick loop. Ends when a countdown completes; Ctrl-C leaves
/// the session running for a later invocation to pick up.
fn watch<S: focuspool_core::KeyValueStore>(
    tracker: &mut Tracker<'_, S>,
) -> Result<(), Box<dyn std::error::Error>> {
    use std::io::Write as _;

    if tracker.clock().state() == ClockState::Idle {
        return Err("no active session; start one first".into());
    }
    let sound_enabled = tracker.settings().sound_enabled;

    loop {
        std::thread::sleep(std::time::Duration::from_secs(1));
        let event = tracker.tick()?;
        let label = tracker
            .clock()
            .session()
            .map(|s| s.subject.label().to_string())
            .unwrap_or_default();
        print!(
            "\r{label} {}  ",
            format_clock(tracker.clock().time_left_secs())
        );
        std::io::stdout().flush()?;

        if let Some(Event::SessionCompleted { .. }) = &event {
            if sound_enabled {
                print!("\x07");
            }
            println!();
            println!("{}", serde_json::to_string_pretty(&event)?);
            if tracker.clock().state() != ClockState::Running {
                break;
            }
            // Auto-start armed the next session; keep watching.
        }
        if tracker.clock().state() == ClockState::Paused {
            println!();
            println!("paused");
            break;
        }
    }
    Ok(())
}

fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_formatting() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(65), "01:05");
        assert_eq!(format_clock(1500), "25:00");
    }
}
