//! Task list persisted under the `todos` key.
//!
//! Serialized field names keep the persisted camelCase layout
//! (optional `dueDate`), so existing data reads back unchanged.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clock::SessionMode;
use crate::error::{Result, ValidationError};
use crate::settings::Settings;
use crate::store::{keys, KeyValueStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// Which way the clock moves for this task's sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerKind {
    Countdown,
    Countup,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub priority: Priority,
    /// ISO date string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    pub timer_type: TimerKind,
}

impl Todo {
    /// Session mode for this task: countdown uses the configured work
    /// length, count-up starts at zero.
    pub fn session_mode(&self, settings: &Settings) -> SessionMode {
        match self.timer_type {
            TimerKind::Countdown => SessionMode::Countdown {
                duration_secs: settings.work_secs,
            },
            TimerKind::Countup => SessionMode::CountUp,
        }
    }
}

/// CRUD over the persisted task list.
pub struct TaskList<'a, S: KeyValueStore> {
    store: &'a S,
}

impl<'a, S: KeyValueStore> TaskList<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// All tasks, newest first.
    ///
    /// # Errors
    /// Returns an error only if the store read fails; malformed JSON
    /// yields an empty list.
    pub fn all(&self) -> Result<Vec<Todo>> {
        match self.store.get(keys::TODOS)? {
            None => Ok(Vec::new()),
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(todos) => Ok(todos),
                Err(e) => {
                    tracing::warn!(error = %e, "malformed todos JSON, starting empty");
                    Ok(Vec::new())
                }
            },
        }
    }

    /// Add a task to the front of the list.
    ///
    /// # Errors
    /// Rejects an empty or whitespace-only title with no state change.
    pub fn add(
        &self,
        title: &str,
        priority: Priority,
        due_date: Option<String>,
        timer_type: TimerKind,
    ) -> Result<Todo> {
        if title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle.into());
        }
        let todo = Todo {
            id: Uuid::new_v4().to_string(),
            title: title.trim().to_string(),
            completed: false,
            priority,
            due_date,
            timer_type,
        };
        let mut todos = self.all()?;
        todos.insert(0, todo.clone());
        self.save(&todos)?;
        Ok(todo)
    }

    /// # Errors
    /// Returns an error if the store read fails.
    pub fn get(&self, id: &str) -> Result<Option<Todo>> {
        Ok(self.all()?.into_iter().find(|t| t.id == id))
    }

    /// Flip a task's completion flag.
    ///
    /// # Errors
    /// Returns `ValidationError::UnknownTask` if no task has this id.
    pub fn toggle(&self, id: &str) -> Result<Todo> {
        let mut todos = self.all()?;
        let todo = todos
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| ValidationError::UnknownTask(id.to_string()))?;
        todo.completed = !todo.completed;
        let updated = todo.clone();
        self.save(&todos)?;
        Ok(updated)
    }

    /// # Errors
    /// Returns `ValidationError::UnknownTask` if no task has this id.
    pub fn delete(&self, id: &str) -> Result<()> {
        let mut todos = self.all()?;
        let before = todos.len();
        todos.retain(|t| t.id != id);
        if todos.len() == before {
            return Err(ValidationError::UnknownTask(id.to_string()).into());
        }
        self.save(&todos)?;
        Ok(())
    }

    pub fn active(&self) -> Result<Vec<Todo>> {
        Ok(self.all()?.into_iter().filter(|t| !t.completed).collect())
    }

    pub fn completed(&self) -> Result<Vec<Todo>> {
        Ok(self.all()?.into_iter().filter(|t| t.completed).collect())
    }

    fn save(&self, todos: &[Todo]) -> Result<()> {
        self.store.set(keys::TODOS, &serde_json::to_string(todos)?)?;
        Ok(())
    }
}
