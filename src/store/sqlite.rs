//! SQLite-backed blob store
//!
//! Keeps every blob in one `blobs` table of `~/.mindspark/progress.db`
//! (or wherever the config points) with a schema version table for future
//! migrations.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, OptionalExtension};

use super::{BlobStore, StoreError};

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY
);

CREATE TABLE IF NOT EXISTS blobs (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at INTEGER NOT NULL
);
"#;

const SCHEMA_VERSION: i32 = 1;

/// Blob store in a SQLite database file
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open or create the database at `path`
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        tracing::debug!(path = %path.display(), "Opened progress database");

        Self::with_connection(conn)
    }

    /// Database that lives only as long as the store
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }

    fn init_schema(&self) -> Result<(), StoreError> {
        let conn = self.conn()?;
        conn.execute_batch(SCHEMA_SQL)?;

        let version: i32 = conn
            .query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |r| r.get(0))
            .unwrap_or(0);

        if version < SCHEMA_VERSION {
            conn.execute(
                "INSERT OR REPLACE INTO schema_version VALUES (?1)",
                [SCHEMA_VERSION],
            )?;
        }

        Ok(())
    }

    fn now_ms() -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

impl BlobStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let conn = self.conn()?;
        let value = conn
            .query_row("SELECT value FROM blobs WHERE key = ?1", [key], |r| r.get(0))
            .optional()?;
        Ok(value)
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO blobs (key, value, updated_at) VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3
            "#,
            (key, value, Self::now_ms()),
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM blobs WHERE key = ?1", [key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_sqlite_store_roundtrip() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert!(store.get("missing").unwrap().is_none());

        store.put("profile", "{\"a\":1}").unwrap();
        store.put("profile", "{\"a\":2}").unwrap();
        assert_eq!(store.get("profile").unwrap().as_deref(), Some("{\"a\":2}"));

        store.remove("profile").unwrap();
        assert!(store.get("profile").unwrap().is_none());
    }

    #[test]
    fn test_sqlite_store_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("progress.db");

        {
            let store = SqliteStore::open(&path).unwrap();
            store.put("daily_challenges", "[]").unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.get("daily_challenges").unwrap().as_deref(), Some("[]"));
    }
}
