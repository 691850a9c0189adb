use crate::snapshot::Collection;
use crate::store::Store;
use async_trait::async_trait;
use siga_core::{Entity, Envelope, Repository, Result, SigaError};
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

/// Repository over one collection of the local store
///
/// Every call returns owned records, so callers can never reach into the
/// store's state by reference.
pub struct LocalRepository<E> {
    store: Arc<Store>,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for LocalRepository<E> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            _entity: PhantomData,
        }
    }
}

impl<E: Collection> LocalRepository<E> {
    pub fn new(store: Arc<Store>) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }

    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }
}

#[async_trait]
impl<E: Collection> Repository<E> for LocalRepository<E> {
    async fn get_all(&self) -> Result<Envelope<Vec<E>>> {
        let mut snapshot = self.store.load().await?;
        Ok(Envelope::new(std::mem::take(E::items_mut(&mut snapshot))))
    }

    async fn get_by_id(&self, id: &str) -> Result<Envelope<Option<E>>> {
        let mut snapshot = self.store.load().await?;
        let items = std::mem::take(E::items_mut(&mut snapshot));
        Ok(Envelope::new(items.into_iter().find(|item| item.id() == id)))
    }

    async fn create(&self, draft: E::Create) -> Result<Envelope<E>> {
        let record = E::build(draft)?;

        let created = self
            .store
            .mutate(move |snapshot| {
                let items = E::items_mut(snapshot);
                if items.iter().any(|item| item.id() == record.id()) {
                    return Err(SigaError::invalid_input(format!(
                        "{} id already exists: {}",
                        E::KIND,
                        record.id()
                    )));
                }
                items.push(record.clone());
                Ok(record)
            })
            .await?;

        debug!(entity = %E::KIND, id = %created.id(), "Created record");
        Ok(Envelope::new(created))
    }

    async fn update(&self, id: &str, patch: E::Update) -> Result<Envelope<Option<E>>> {
        let updated = self
            .store
            .mutate(move |snapshot| {
                match E::items_mut(snapshot).iter_mut().find(|item| item.id() == id) {
                    Some(item) => {
                        item.apply(patch)?;
                        Ok(Some(item.clone()))
                    }
                    None => Ok(None),
                }
            })
            .await?;

        debug!(entity = %E::KIND, id, found = updated.is_some(), "Updated record");
        Ok(Envelope::new(updated))
    }

    async fn delete(&self, id: &str) -> Result<Envelope<bool>> {
        let removed = self
            .store
            .mutate(move |snapshot| {
                let items = E::items_mut(snapshot);
                let before = items.len();
                items.retain(|item| item.id() != id);
                Ok(before - items.len())
            })
            .await?;

        debug!(entity = %E::KIND, id, removed, "Deleted record");
        Ok(Envelope::new(true))
    }
}
