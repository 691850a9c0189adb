//! The store shim
//!
//! Wraps a [`Slot`] and exposes the whole dataset as one [`Snapshot`].
//! First access bootstraps the slot from seed data; an unreadable document is
//! replaced by seed data instead of failing (corruption is self-healing).
//!
//! There is no cross-process coordination: two processes writing the same
//! slot overwrite each other's documents, last writer wins. Within one
//! `Store`, read-modify-write cycles going through [`Store::mutate`] are
//! serialized.

use crate::error::{Result, StorageError};
use crate::slot::{MemorySlot, Slot, SqliteSlot};
use crate::snapshot::{self, Snapshot};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Key the dataset is stored under
pub const DEFAULT_STORAGE_KEY: &str = "siga_offline_data";

/// Where and how the store persists its document
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,

    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Skip the database entirely and keep data in memory
    #[serde(default)]
    pub in_memory: bool,
}

fn default_database_url() -> String {
    "sqlite://./data/siga.db".to_string()
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            storage_key: default_storage_key(),
            in_memory: false,
        }
    }
}

pub struct Store {
    slot: Arc<dyn Slot>,
    key: String,
    seed: Snapshot,
    write_lock: Mutex<()>,
}

impl Store {
    pub fn new(slot: Arc<dyn Slot>, key: impl Into<String>) -> Self {
        Self {
            slot,
            key: key.into(),
            seed: Snapshot::seed(),
            write_lock: Mutex::new(()),
        }
    }

    /// Store backed by process memory only
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySlot::new()), DEFAULT_STORAGE_KEY)
    }

    /// Replace the dataset used for bootstrap and reset
    #[must_use]
    pub fn with_seed(mut self, seed: Snapshot) -> Self {
        self.seed = seed;
        self
    }

    /// Open the configured database, falling back to memory when it is unusable
    pub async fn open(settings: &StorageSettings) -> Self {
        if settings.in_memory {
            info!("Using in-memory store");
            return Self::new(Arc::new(MemorySlot::new()), settings.storage_key.clone());
        }

        match SqliteSlot::connect(&settings.database_url).await {
            Ok(slot) => {
                info!(url = %settings.database_url, "Durable store ready");
                Self::new(Arc::new(slot), settings.storage_key.clone())
            }
            Err(err) => {
                warn!(
                    url = %settings.database_url,
                    error = %err,
                    "Durable storage unavailable, falling back to in-memory store"
                );
                Self::new(Arc::new(MemorySlot::new()), settings.storage_key.clone())
            }
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn is_durable(&self) -> bool {
        self.slot.is_durable()
    }

    /// Current snapshot
    ///
    /// Bootstraps from seed data when nothing is stored yet, and resets to
    /// seed data when the stored document cannot be read. Older documents are
    /// migrated and written back. A document from a newer build is reported
    /// as `UnsupportedVersion` and left as is.
    ///
    /// Reading a current document takes no lock. Anything that has to write
    /// takes the write lock and reads the slot again, so a concurrent
    /// `mutate` is never overwritten.
    pub async fn load(&self) -> Result<Snapshot> {
        if let Some(raw) = self.slot.read(&self.key).await? {
            match snapshot::decode(&raw) {
                Ok(decoded) if !decoded.migrated => return Ok(decoded.snapshot),
                Err(err @ StorageError::UnsupportedVersion { .. }) => return Err(err),
                _ => {}
            }
        }

        let _guard = self.write_lock.lock().await;
        self.load_locked().await
    }

    /// Replace the stored document with `snapshot`
    pub async fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.persist(snapshot).await
    }

    /// Discard everything and start over from seed data
    pub async fn reset(&self) -> Result<Snapshot> {
        let _guard = self.write_lock.lock().await;
        info!(key = %self.key, "Resetting store to seed data");
        self.reseed().await
    }

    /// Load, apply `f`, save
    ///
    /// Nothing is written when `f` fails.
    pub async fn mutate<T, F>(&self, f: F) -> siga_core::Result<T>
    where
        F: FnOnce(&mut Snapshot) -> siga_core::Result<T> + Send,
        T: Send,
    {
        let _guard = self.write_lock.lock().await;
        let mut snapshot = self.load_locked().await?;
        let output = f(&mut snapshot)?;
        self.persist(&snapshot).await?;
        Ok(output)
    }

    /// `load` for callers already holding the write lock
    async fn load_locked(&self) -> Result<Snapshot> {
        let Some(raw) = self.slot.read(&self.key).await? else {
            info!(key = %self.key, "No stored data, bootstrapping from seed");
            return self.reseed().await;
        };

        match snapshot::decode(&raw) {
            Ok(decoded) => {
                if decoded.migrated {
                    info!(
                        key = %self.key,
                        version = decoded.snapshot.version,
                        "Migrated stored data"
                    );
                    self.persist(&decoded.snapshot).await?;
                }
                Ok(decoded.snapshot)
            }
            Err(StorageError::SerializationError(reason)) => {
                warn!(key = %self.key, %reason, "Stored data unreadable, restoring seed data");
                self.reseed().await
            }
            Err(err) => Err(err),
        }
    }

    async fn reseed(&self) -> Result<Snapshot> {
        let snapshot = self.seed.clone();
        self.persist(&snapshot).await?;
        Ok(snapshot)
    }

    async fn persist(&self, snapshot: &Snapshot) -> Result<()> {
        let raw = snapshot.to_json()?;
        self.slot.write(&self.key, &raw).await?;
        debug!(key = %self.key, bytes = raw.len(), "Saved snapshot");
        Ok(())
    }
}
