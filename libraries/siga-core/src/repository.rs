//! Repository trait for the entity collections

use crate::entity::Entity;
use crate::envelope::Envelope;
use crate::error::Result;
use async_trait::async_trait;

/// Typed CRUD surface over one entity collection
///
/// This trait abstracts the backend so state containers work the same against
/// the local store and a remote REST API.
///
/// Not-found handling is deliberately quiet: `get_by_id` and `update` resolve
/// to `None`, `delete` resolves to `true` whether or not the record existed.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Get every record (owned copies)
    async fn get_all(&self) -> Result<Envelope<Vec<E>>>;

    /// Get a record by id
    async fn get_by_id(&self, id: &str) -> Result<Envelope<Option<E>>>;

    /// Create a record, assigning an id when the draft has none
    async fn create(&self, draft: E::Create) -> Result<Envelope<E>>;

    /// Merge a patch onto an existing record
    async fn update(&self, id: &str, patch: E::Update) -> Result<Envelope<Option<E>>>;

    /// Remove a record; idempotent
    async fn delete(&self, id: &str) -> Result<Envelope<bool>>;
}
