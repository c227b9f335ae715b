//! # DailyFlow Core Library
//!
//! Business logic for the DailyFlow personal-productivity widget: a todo list,
//! a habit tracker, freeform notes and a Pomodoro interval timer. Front ends
//! (the CLI binary) are thin layers over this crate.
//!
//! ## Architecture
//!
//! - **Timer**: a countdown state machine cycling work / short-break /
//!   long-break. It has no clock; the shell calls `tick()` once per second.
//! - **Habits**: per-day toggles with streak accounting keyed by local
//!   calendar day.
//! - **Snapshot**: the single persisted record and the export document.
//! - **Storage**: SQLite key/value record store and TOML configuration.
//!
//! ## Key Components
//!
//! - [`PomodoroTimer`]: timer state machine
//! - [`HabitItem`]: streak decision table (`toggle_today`, `daily_reset`)
//! - [`DailyFlow`]: application shell that persists after every mutation
//! - [`SnapshotStore`]: narrow load/save interface for the persisted record

pub mod app;
pub mod error;
pub mod events;
pub mod habit;
pub mod snapshot;
pub mod storage;
pub mod timer;
pub mod todo;

pub use app::DailyFlow;
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use events::Event;
pub use habit::{DayKey, HabitItem, HabitStore, StreakChange, StreakPolicy};
pub use snapshot::{AppSnapshot, ExportDocument, SNAPSHOT_KEY};
pub use storage::{Config, KvDatabase, MemorySnapshotStore, SnapshotStore, SqliteSnapshotStore};
pub use timer::{format_clock, PomodoroSettings, PomodoroTimer, TimerMode};
pub use todo::{TodoItem, TodoStore};
