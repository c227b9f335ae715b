//! The persisted record and the user-facing export document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::habit::HabitItem;
use crate::timer::PomodoroSettings;
use crate::todo::TodoItem;

/// Key of the single persisted record.
pub const SNAPSHOT_KEY: &str = "dailyflow_v1";

/// Everything that survives a restart. Written whole on every save.
///
/// Timer running state is deliberately absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppSnapshot {
    #[serde(default)]
    pub dark: bool,
    #[serde(default)]
    pub todos: Vec<TodoItem>,
    #[serde(default)]
    pub habits: Vec<HabitItem>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub pomodoro: PomodoroSettings,
}

impl AppSnapshot {
    /// Parse a stored record. Malformed input yields the default snapshot.
    pub fn from_json(raw: &str) -> Self {
        match serde_json::from_str::<AppSnapshot>(raw) {
            Ok(mut snapshot) => {
                snapshot.pomodoro = snapshot.pomodoro.clamped();
                snapshot
            }
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable snapshot");
                Self::default()
            }
        }
    }

    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// One-way export for the user. Omits theme and timer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub todos: Vec<TodoItem>,
    pub habits: Vec<HabitItem>,
    pub notes: String,
    pub exported_at: DateTime<Utc>,
}

impl ExportDocument {
    pub fn from_snapshot(snapshot: &AppSnapshot, now: DateTime<Utc>) -> Self {
        Self {
            todos: snapshot.todos.clone(),
            habits: snapshot.habits.clone(),
            notes: snapshot.notes.clone(),
            exported_at: now,
        }
    }

    /// Suggested download name, e.g. `dailyflow-export-2024-05-01.json`.
    pub fn file_name(&self) -> String {
        format!("dailyflow-export-{}.json", self.exported_at.format("%Y-%m-%d"))
    }

    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
