mod config;
pub mod database;

pub use config::{Config, DefaultsConfig, HabitsConfig, LogConfig, TimerConfig};
pub use database::{KvDatabase, SqliteSnapshotStore};

use std::cell::RefCell;
use std::path::PathBuf;

use crate::error::{Result, StorageError};

/// Returns the data directory, creating it if needed.
///
/// `DAILYFLOW_HOME` wins when set. Otherwise `~/.config/dailyflow[-dev]/`,
/// with the `-dev` suffix selected by `DAILYFLOW_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os("DAILYFLOW_HOME") {
        Some(home) => PathBuf::from(home),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("DAILYFLOW_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("dailyflow-dev")
            } else {
                base_dir.join("dailyflow")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StorageError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}

/// Access to the one persisted snapshot record.
///
/// `load` has no error channel: an unreadable record is the same as no record.
pub trait SnapshotStore {
    fn load(&self) -> Option<String>;

    /// Replace the record wholesale.
    ///
    /// # Errors
    /// Returns an error if the backend rejects the write.
    fn save(&self, raw: &str) -> Result<()>;

    /// Erase the record.
    ///
    /// # Errors
    /// Returns an error if the backend rejects the delete.
    fn clear(&self) -> Result<()>;
}

/// In-memory stand-in for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    record: RefCell<Option<String>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(raw: impl Into<String>) -> Self {
        Self {
            record: RefCell::new(Some(raw.into())),
        }
    }

    pub fn record(&self) -> Option<String> {
        self.record.borrow().clone()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self) -> Option<String> {
        self.record()
    }

    fn save(&self, raw: &str) -> Result<()> {
        *self.record.borrow_mut() = Some(raw.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.record.borrow_mut().take();
        Ok(())
    }
}

impl<S: SnapshotStore + ?Sized> SnapshotStore for &S {
    fn load(&self) -> Option<String> {
        (**self).load()
    }

    fn save(&self, raw: &str) -> Result<()> {
        (**self).save(raw)
    }

    fn clear(&self) -> Result<()> {
        (**self).clear()
    }
}

impl<S: SnapshotStore + ?Sized> SnapshotStore for Box<S> {
    fn load(&self) -> Option<String> {
        (**self).load()
    }

    fn save(&self, raw: &str) -> Result<()> {
        (**self).save(raw)
    }

    fn clear(&self) -> Result<()> {
        (**self).clear()
    }
}
