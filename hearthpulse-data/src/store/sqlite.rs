use std::path::Path;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use tracing::debug;

use super::errors::StoreError;
use super::KvStore;

/// SQLite-backed key-value store.
///
/// A single `kv_entries` table holds one row per key; values are JSON
/// documents written by the repository layer.
#[derive(Clone)]
pub struct SqliteKvStore {
    pool: Pool<SqliteConnectionManager>,
}

impl SqliteKvStore {
    /// Open (or create) the database at `path` and ensure the schema exists
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let manager = SqliteConnectionManager::file(path);
        let pool = Pool::new(manager)?;
        let store = Self { pool };
        store.init_schema()?;
        Ok(store)
    }

    /// Open an in-memory SQLite database, useful for tests
    pub fn open_in_memory() -> Result<Self, StoreError> {
        // max_size 1 so every handle sees the same in-memory database
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder().max_size(1).build(manager)?;
        let store = Self { pool };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<(), StoreError> {
        let conn = self.pool.get()?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv_entries (
                 key   TEXT PRIMARY KEY,
                 value TEXT NOT NULL
             )",
            [],
        )?;
        Ok(())
    }
}

impl KvStore for SqliteKvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare("SELECT value FROM kv_entries WHERE key = ?1")?;
        let mut rows = stmt.query([key])?;
        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        debug!("Writing kv entry: key={}", key);
        let conn = self.pool.get()?;
        conn.execute(
            "INSERT INTO kv_entries (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            [key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        debug!("Removing kv entry: key={}", key);
        let conn = self.pool.get()?;
        conn.execute("DELETE FROM kv_entries WHERE key = ?1", [key])?;
        Ok(())
    }
}
