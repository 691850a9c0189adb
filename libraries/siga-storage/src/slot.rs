//! Key-value slots backing the store
//!
//! A slot holds whole documents under string keys. `SqliteSlot` is the
//! durable one; `MemorySlot` keeps documents for the life of the process and
//! is what the store falls back to when no database can be opened.

use crate::error::{Result, StorageError};
use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use std::collections::HashMap;
use std::path::Path;
use tokio::sync::RwLock;

/// Persistent (or not) key-value slot
#[async_trait]
pub trait Slot: Send + Sync {
    /// Read the document stored under `key`
    async fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the document stored under `key`
    async fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Whether documents survive a process restart
    fn is_durable(&self) -> bool;
}

/// `SQLite`-backed slot, one row per key
#[derive(Clone)]
pub struct SqliteSlot {
    pool: SqlitePool,
}

impl SqliteSlot {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open the database at `database_url` and run migrations
    ///
    /// The parent directory of a file URL is created when missing. A database
    /// that cannot be opened is reported as `StorageError::Connection`.
    pub async fn connect(database_url: &str) -> Result<Self> {
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            if let Some(parent) = Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent).await?;
                }
            }
        }

        let pool = crate::create_pool(database_url)
            .await
            .map_err(|e| StorageError::Connection(format!("{database_url}: {e}")))?;
        crate::run_migrations(&pool).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl Slot for SqliteSlot {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM storage_slots WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| row.try_get::<String, _>("value")).transpose()?)
    }

    async fn write(&self, key: &str, value: &str) -> Result<()> {
        let now = chrono::Utc::now().timestamp();

        sqlx::query(
            "INSERT INTO storage_slots (key, value, updated_at)
             VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )
        .bind(key)
        .bind(value)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    fn is_durable(&self) -> bool {
        true
    }
}

/// In-process slot
#[derive(Default)]
pub struct MemorySlot {
    documents: RwLock<HashMap<String, String>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Slot for MemorySlot {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.documents.read().await.get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> Result<()> {
        self.documents
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn is_durable(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_slot_overwrites_whole_value() {
        let slot = MemorySlot::new();
        assert_eq!(slot.read("k").await.unwrap(), None);

        slot.write("k", "one").await.unwrap();
        slot.write("k", "two").await.unwrap();

        assert_eq!(slot.read("k").await.unwrap().as_deref(), Some("two"));
        assert!(!slot.is_durable());
    }

    #[tokio::test]
    async fn sqlite_slot_upserts_by_key() {
        let pool = crate::create_pool("sqlite::memory:").await.unwrap();
        crate::run_migrations(&pool).await.unwrap();
        let slot = SqliteSlot::new(pool);

        slot.write("a", "{}").await.unwrap();
        slot.write("a", "{\"x\":1}").await.unwrap();
        slot.write("b", "[]").await.unwrap();

        assert_eq!(slot.read("a").await.unwrap().as_deref(), Some("{\"x\":1}"));
        assert_eq!(slot.read("b").await.unwrap().as_deref(), Some("[]"));
        assert_eq!(slot.read("c").await.unwrap(), None);
    }

    #[tokio::test]
    async fn unusable_database_is_a_connection_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocked = dir.path().join("blocked.db");
        std::fs::create_dir(&blocked).unwrap();

        let result = SqliteSlot::connect(&format!("sqlite://{}", blocked.display())).await;
        assert!(matches!(result, Err(StorageError::Connection(_))));
    }
}
