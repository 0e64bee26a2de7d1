//! Durable key-value storage.
//!
//! The rest of the crate only ever talks to storage through
//! [`KeyValueStore`]: a `get` that returns the raw bytes under a key (or
//! nothing) and a `set` that overwrites them.

mod memory;
mod schema;

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension};

use crate::error::StorageError;

pub use memory::MemoryKv;

/// Largest value a single key may hold, in bytes.
pub const MAX_VALUE_SIZE: usize = 5 * 1024 * 1024;

/// The host's key-value persistence primitive.
pub trait KeyValueStore {
    /// Raw bytes stored under `key`, or `None` when the slot is empty.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Overwrite the slot under `key`.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError>;
}

/// SQLite-backed key-value store.
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: PathBuf) -> Result<Self, StorageError> {
        let parent = path.parent().ok_or_else(|| {
            StorageError::Unavailable("database path has no parent directory".to_string())
        })?;
        std::fs::create_dir_all(parent).map_err(|e| {
            StorageError::Unavailable(format!("create {}: {}", parent.display(), e))
        })?;
        let conn = Connection::open(&path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        tracing::debug!("Opened database at {}", path.display());
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_default() -> Result<Self, StorageError> {
        Self::open(default_path()?)
    }

    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<(), StorageError> {
        let conn = self.lock()?;
        schema::run_migrations(&conn)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.conn
            .lock()
            .map_err(|_| StorageError::Unavailable("database lock poisoned".to_string()))
    }
}

impl KeyValueStore for Database {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let conn = self.lock()?;
        let value = conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?",
                [key],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        if value.len() > MAX_VALUE_SIZE {
            return Err(StorageError::QuotaExceeded {
                size: value.len(),
                max: MAX_VALUE_SIZE,
            });
        }

        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            (key, value, Utc::now().to_rfc3339()),
        )?;
        Ok(())
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: self.conn.clone(),
        }
    }
}

/// Platform data directory location of the database file.
pub fn default_path() -> Result<PathBuf, StorageError> {
    let dirs = directories::ProjectDirs::from("", "", "missions").ok_or_else(|| {
        StorageError::Unavailable("could not determine data directory".to_string())
    })?;
    Ok(dirs.data_dir().join("missions.db"))
}
