//! Test helpers for storage integration tests
//!
//! `TestStore` uses a REAL SQLite file in a temp dir so migrations and the
//! durable slot are exercised the same way as in production.

#![allow(dead_code)]

use chrono::NaiveDate;
use siga_storage::{SqliteSlot, Store, DEFAULT_STORAGE_KEY};
use std::sync::Arc;
use tempfile::TempDir;

/// Store over a temporary SQLite database, removed on drop
pub struct TestStore {
    pub store: Arc<Store>,
    pub url: String,
    _temp_dir: TempDir,
}

impl TestStore {
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let url = format!("sqlite://{}", temp_dir.path().join("siga.db").display());

        let store = Arc::new(open_store(&url).await);

        Self {
            store,
            url,
            _temp_dir: temp_dir,
        }
    }

    /// A second store over the same database file, like a restarted process
    pub async fn reopen(&self) -> Store {
        open_store(&self.url).await
    }

    /// The raw slot, for planting documents by hand
    pub async fn slot(&self) -> SqliteSlot {
        SqliteSlot::connect(&self.url)
            .await
            .expect("Failed to connect slot")
    }
}

async fn open_store(url: &str) -> Store {
    let slot = SqliteSlot::connect(url)
        .await
        .expect("Failed to connect slot");
    Store::new(Arc::new(slot), DEFAULT_STORAGE_KEY)
}

/// Store that never touches disk
pub fn memory_store() -> Arc<Store> {
    Arc::new(Store::in_memory())
}

pub fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}
