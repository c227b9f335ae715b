//! SQLite key/value storage.
//!
//! Holds the single application snapshot under [`SNAPSHOT_KEY`]. The table is
//! a plain key/value store so the record can be replaced or erased atomically.

use std::path::Path;

use rusqlite::{params, Connection};

use super::{data_dir, SnapshotStore};
use crate::error::{Result, StorageError};
use crate::snapshot::SNAPSHOT_KEY;

/// SQLite database with a single `kv` table.
pub struct KvDatabase {
    conn: Connection,
}

impl KvDatabase {
    /// Open the database at `<data dir>/dailyflow.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StorageError> {
        Self::open_at(&data_dir()?.join("dailyflow.db"))
    }

    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database.
    ///
    /// # Errors
    /// Returns an error if SQLite cannot allocate the database.
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), StorageError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Get a value from the kv store.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Set a value in the kv store, replacing any previous value.
    ///
    /// # Errors
    /// Returns an error if the write fails.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Delete a key. Returns whether it existed.
    ///
    /// # Errors
    /// Returns an error if the delete fails.
    pub fn kv_delete(&self, key: &str) -> Result<bool, StorageError> {
        let n = self
            .conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(n > 0)
    }
}

/// [`SnapshotStore`] backed by [`KvDatabase`].
pub struct SqliteSnapshotStore {
    db: KvDatabase,
}

impl SqliteSnapshotStore {
    pub fn new(db: KvDatabase) -> Self {
        Self { db }
    }

    /// Open the default on-disk database.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened.
    pub fn open() -> Result<Self, StorageError> {
        Ok(Self::new(KvDatabase::open()?))
    }

    pub fn db(&self) -> &KvDatabase {
        &self.db
    }
}

impl SnapshotStore for SqliteSnapshotStore {
    fn load(&self) -> Option<String> {
        match self.db.kv_get(SNAPSHOT_KEY) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(error = %e, "snapshot read failed, starting empty");
                None
            }
        }
    }

    fn save(&self, raw: &str) -> Result<()> {
        self.db.kv_set(SNAPSHOT_KEY, raw)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if self.db.kv_delete(SNAPSHOT_KEY)? {
            tracing::info!("snapshot record erased");
        }
        Ok(())
    }
}
