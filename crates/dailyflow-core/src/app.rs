//! Application shell.
//!
//! Composes the stores and the timer, forwards user intents, and rewrites the
//! whole snapshot after every state-affecting mutation. Timer commands are not
//! persisted; only the timer's settings are part of the record.

use chrono::{DateTime, Utc};

use crate::error::{Result, ValidationError};
use crate::events::Event;
use crate::habit::{DayKey, HabitItem, HabitStore, StreakChange, StreakPolicy};
use crate::snapshot::{AppSnapshot, ExportDocument};
use crate::storage::SnapshotStore;
use crate::timer::{PomodoroSettings, PomodoroTimer, TimerMode};
use crate::todo::{TodoItem, TodoStore};

pub struct DailyFlow<S: SnapshotStore> {
    store: S,
    todos: TodoStore,
    habits: HabitStore,
    notes: String,
    dark: bool,
    timer: PomodoroTimer,
}

impl<S: SnapshotStore> DailyFlow<S> {
    /// Load state from `store` and run the daily reset pass for `today`.
    ///
    /// A missing or unreadable record starts from `AppSnapshot::default()`.
    pub fn open(store: S, today: DayKey) -> Self {
        Self::open_with(store, today, AppSnapshot::default(), StreakPolicy::default())
    }

    /// Like [`DailyFlow::open`], seeding from `fresh` when nothing is stored.
    pub fn open_with(store: S, today: DayKey, fresh: AppSnapshot, policy: StreakPolicy) -> Self {
        let snapshot = match store.load() {
            Some(raw) => AppSnapshot::from_json(&raw),
            None => {
                tracing::debug!("no stored snapshot, starting fresh");
                fresh
            }
        };
        let mut app = Self::from_snapshot(store, snapshot, policy);
        let cleared = app.habits.daily_reset(today);
        if cleared > 0 {
            tracing::debug!(cleared, %today, "cleared stale habit flags");
        }
        app
    }

    fn from_snapshot(store: S, snapshot: AppSnapshot, policy: StreakPolicy) -> Self {
        Self {
            store,
            todos: TodoStore::new(snapshot.todos),
            habits: HabitStore::new(snapshot.habits).with_policy(policy),
            notes: snapshot.notes,
            dark: snapshot.dark,
            timer: PomodoroTimer::new(snapshot.pomodoro),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn todos(&self) -> &TodoStore {
        &self.todos
    }

    pub fn habits(&self) -> &HabitStore {
        &self.habits
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn is_dark(&self) -> bool {
        self.dark
    }

    pub fn timer(&self) -> &PomodoroTimer {
        &self.timer
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn snapshot(&self) -> AppSnapshot {
        AppSnapshot {
            dark: self.dark,
            todos: self.todos.as_slice().to_vec(),
            habits: self.habits.as_slice().to_vec(),
            notes: self.notes.clone(),
            pomodoro: *self.timer.settings(),
        }
    }

    pub fn export(&self, now: DateTime<Utc>) -> ExportDocument {
        ExportDocument::from_snapshot(&self.snapshot(), now)
    }

    // ── Todos ────────────────────────────────────────────────────────

    pub fn add_todo(&mut self, text: &str) -> Option<TodoItem> {
        let item = self.todos.add(text)?.clone();
        self.persist();
        Some(item)
    }

    pub fn toggle_todo(&mut self, id: &str) -> Option<bool> {
        let done = self.todos.toggle(id)?;
        self.persist();
        Some(done)
    }

    pub fn remove_todo(&mut self, id: &str) -> bool {
        let removed = self.todos.remove(id);
        if removed {
            self.persist();
        }
        removed
    }

    pub fn clear_done_todos(&mut self) -> usize {
        let n = self.todos.clear_done();
        if n > 0 {
            self.persist();
        }
        n
    }

    // ── Habits ───────────────────────────────────────────────────────

    pub fn add_habit(&mut self, title: &str) -> Option<HabitItem> {
        let habit = self.habits.add(title)?.clone();
        self.persist();
        Some(habit)
    }

    pub fn toggle_habit(&mut self, id: &str, today: DayKey) -> Option<StreakChange> {
        let change = self.habits.toggle_today(id, today)?;
        self.persist();
        Some(change)
    }

    pub fn remove_habit(&mut self, id: &str) -> bool {
        let removed = self.habits.remove(id);
        if removed {
            self.persist();
        }
        removed
    }

    pub fn reset_habit_streak(&mut self, id: &str) -> bool {
        let reset = self.habits.reset_streak(id);
        if reset {
            self.persist();
        }
        reset
    }

    // ── Notes & theme ────────────────────────────────────────────────

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
        self.persist();
    }

    pub fn set_dark(&mut self, dark: bool) {
        self.dark = dark;
        self.persist();
    }

    pub fn toggle_theme(&mut self) -> bool {
        self.set_dark(!self.dark);
        self.dark
    }

    // ── Timer ────────────────────────────────────────────────────────

    /// # Errors
    /// Rejects settings with a zero field; nothing is changed or saved.
    pub fn update_pomodoro_settings(
        &mut self,
        settings: PomodoroSettings,
    ) -> Result<Event, ValidationError> {
        let event = self.timer.set_settings(settings)?;
        self.persist();
        Ok(event)
    }

    pub fn start_timer(&mut self) -> Option<Event> {
        self.timer.start()
    }

    pub fn pause_timer(&mut self) -> Option<Event> {
        self.timer.pause()
    }

    pub fn reset_timer(&mut self) -> Event {
        self.timer.reset()
    }

    pub fn set_timer_preset(&mut self, mode: TimerMode) -> Event {
        self.timer.set_preset(mode)
    }

    pub fn tick(&mut self) -> Option<Event> {
        self.timer.tick()
    }

    // ── Data management ──────────────────────────────────────────────

    /// Empty todos, habits and notes and erase the stored record.
    ///
    /// Theme and timer settings stay as they are in memory.
    ///
    /// # Errors
    /// Returns an error if the stored record cannot be erased.
    pub fn clear_data(&mut self) -> Result<()> {
        self.todos.clear();
        self.habits.clear();
        self.notes.clear();
        self.store.clear()?;
        tracing::info!("cleared all data");
        Ok(())
    }

    /// Write the full snapshot now.
    ///
    /// # Errors
    /// Returns an error if the store rejects the write.
    pub fn save(&self) -> Result<()> {
        let raw = self.snapshot().to_json()?;
        self.store.save(&raw)
    }

    fn persist(&self) {
        if let Err(e) = self.save() {
            tracing::warn!(error = %e, "failed to persist snapshot");
        }
    }
}
