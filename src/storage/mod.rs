use crate::error::{Result, SummarizerError};
use anyhow::Context;
use chrono::Utc;
use directories::ProjectDirs;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};

pub mod types;
pub use types::{ARCHIVE_KEY, THEME_KEY};

/// Durable key/value storage
///
/// Every value is a whole document; writers replace it in full.
pub trait LocalStore: Send + Sync {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`; removing a missing key is not an error
    fn remove(&self, key: &str) -> Result<()>;
}

/// SQLite-backed local storage
pub struct SqliteStorage {
    db_path: PathBuf,
}

impl SqliteStorage {
    /// Create a new storage instance
    ///
    /// Initializes the database file in the user's data directory.
    pub fn new() -> Result<Self> {
        // Allow override of the storage path via environment variable.
        if let Ok(override_path) = std::env::var("MEETING_SUMMARIZER_STORAGE") {
            return Self::new_with_path(override_path);
        }

        let proj_dirs = ProjectDirs::from("com", "meeting-summarizer", "meeting-summarizer")
            .ok_or_else(|| SummarizerError::Storage("Could not determine data directory".into()))?;

        let data_dir = proj_dirs.data_dir();
        std::fs::create_dir_all(data_dir)
            .context("Failed to create data directory")
            .map_err(|e| SummarizerError::Storage(e.to_string()))?;

        Self::new_with_path(data_dir.join("storage.db"))
    }

    /// Create a new storage instance that uses the specified database path.
    ///
    /// # Examples
    ///
    /// ```
    /// use meeting_summarizer::storage::{LocalStore, SqliteStorage};
    ///
    /// let dir = tempfile::tempdir().unwrap();
    /// let storage = SqliteStorage::new_with_path(dir.path().join("storage.db")).unwrap();
    /// storage.set("greeting", "hello").unwrap();
    /// assert_eq!(storage.get("greeting").unwrap().as_deref(), Some("hello"));
    /// ```
    pub fn new_with_path<P: Into<PathBuf>>(db_path: P) -> Result<Self> {
        let db_path = db_path.into();

        // Ensure parent directory exists so opening the DB file succeeds.
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .context("Failed to create parent directory for database")
                    .map_err(|e| SummarizerError::Storage(e.to_string()))?;
            }
        }

        let storage = Self { db_path };
        storage.init()?;
        Ok(storage)
    }

    /// Open storage at `path` when given, otherwise at the default location
    pub fn open(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::new_with_path(path),
            None => Self::new(),
        }
    }

    /// Path of the backing database file
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    fn connect(&self) -> Result<Connection> {
        Connection::open(&self.db_path)
            .context("Failed to open database")
            .map_err(|e| SummarizerError::Storage(e.to_string()).into())
    }

    /// Initialize the database schema
    fn init(&self) -> Result<()> {
        let conn = self.connect()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )
        .context("Failed to create tables")
        .map_err(|e| SummarizerError::Storage(e.to_string()))?;

        tracing::debug!("Local storage ready at {}", self.db_path.display());
        Ok(())
    }
}

impl LocalStore for SqliteStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.connect()?;

        let value = conn
            .query_row("SELECT value FROM kv WHERE key = ?", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()
            .context("Failed to query value")
            .map_err(|e| SummarizerError::Storage(e.to_string()))?;

        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.connect()?;
        let now = Utc::now().to_rfc3339();

        conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, now],
        )
        .context("Failed to write value")
        .map_err(|e| SummarizerError::Storage(e.to_string()))?;

        tracing::debug!(key, bytes = value.len(), "Wrote local storage entry");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let conn = self.connect()?;

        conn.execute("DELETE FROM kv WHERE key = ?", params![key])
            .context("Failed to delete value")
            .map_err(|e| SummarizerError::Storage(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    /// Helper: create a temporary storage instance backed by a temp directory.
    ///
    /// Returns both the `SqliteStorage` and the `TempDir` so the caller keeps
    /// ownership of the directory (preventing it from being removed).
    fn create_test_storage() -> (SqliteStorage, tempfile::TempDir) {
        let dir = tempdir().expect("failed to create tempdir");
        let db_path = dir.path().join("storage.db");
        let storage = SqliteStorage::new_with_path(db_path).expect("failed to create storage");
        (storage, dir)
    }

    #[test]
    fn test_sqlite_storage_init_creates_table() {
        let (storage, _dir) = create_test_storage();
        let conn = Connection::open(storage.path()).expect("open connection");
        let count: i64 = conn
            .query_row(
                "SELECT count(*) FROM sqlite_master WHERE type='table' AND name='kv'",
                [],
                |r| r.get(0),
            )
            .expect("query row");
        assert_eq!(count, 1);
    }

    #[test]
    fn test_get_missing_key_returns_none() {
        let (storage, _dir) = create_test_storage();
        assert!(storage.get(THEME_KEY).unwrap().is_none());
    }

    #[test]
    fn test_set_replaces_existing_value() {
        let (storage, _dir) = create_test_storage();
        storage.set(THEME_KEY, "dark").unwrap();
        storage.set(THEME_KEY, "light").unwrap();
        assert_eq!(storage.get(THEME_KEY).unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn test_keys_are_independent() {
        let (storage, _dir) = create_test_storage();
        storage.set(THEME_KEY, "dark").unwrap();
        storage.set(ARCHIVE_KEY, "[]").unwrap();
        storage.remove(THEME_KEY).unwrap();
        assert!(storage.get(THEME_KEY).unwrap().is_none());
        assert_eq!(storage.get(ARCHIVE_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_remove_missing_key_is_ok() {
        let (storage, _dir) = create_test_storage();
        assert!(storage.remove("never-written").is_ok());
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("nested").join("storage.db");

        let storage = SqliteStorage::new_with_path(&db_path).unwrap();
        storage.set(ARCHIVE_KEY, "[1,2,3]").unwrap();
        drop(storage);

        let reopened = SqliteStorage::open(db_path.to_str()).unwrap();
        assert_eq!(reopened.get(ARCHIVE_KEY).unwrap().as_deref(), Some("[1,2,3]"));
    }
}
