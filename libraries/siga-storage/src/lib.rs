//! SIGA Storage
//!
//! Offline-first persistence for the SIGA association console.
//!
//! # Architecture
//!
//! - **One document**: members, events, and transactions live together in a
//!   single versioned JSON [`Snapshot`] stored under one key
//! - **Slots**: the document sits in a `SQLite` table ([`SqliteSlot`]) or, when
//!   no database can be opened, in process memory ([`MemorySlot`])
//! - **Self-healing**: a missing or unreadable document is replaced by seed data
//! - **Vertical slicing**: `members`, `events`, and `transactions` own the
//!   queries that go beyond CRUD
//!
//! # Example
//!
//! ```rust,no_run
//! use siga_core::{Member, Repository};
//! use siga_storage::{LocalRepository, StorageSettings, Store};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(Store::open(&StorageSettings::default()).await);
//! let members = LocalRepository::<Member>::new(store);
//!
//! let all = members.get_all().await?.into_inner();
//! println!("{} members", all.len());
//! # Ok(())
//! # }
//! ```

mod error;
mod repository;
mod seed;
mod slot;
mod snapshot;
mod store;

// Vertical slices
pub mod events;
pub mod members;
pub mod transactions;

pub use error::StorageError;
pub use repository::LocalRepository;
pub use slot::{MemorySlot, Slot, SqliteSlot};
pub use snapshot::{decode, migrate, Collection, Decoded, Snapshot, SNAPSHOT_VERSION};
pub use store::{StorageSettings, Store, DEFAULT_STORAGE_KEY};

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;
use tracing::debug;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://siga.db>`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    // Each connection to `:memory:` opens its own empty database
    let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    debug!(url = %database_url, max_connections, "SQLite pool created");
    Ok(pool)
}
