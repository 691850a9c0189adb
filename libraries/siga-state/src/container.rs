//! State containers: a repository plus a reducer-driven cache
//!
//! A [`Container`] mirrors one collection for the console. Every operation
//! goes to the repository first and only then updates the cache through
//! [`reduce`]. Failures are recorded as a prefixed, user-facing message and
//! returned to the caller as well.
//!
//! Operations are not serialized. When two mutating calls race, their
//! results reach the cache in completion order, not call order.

use crate::messages::{self, Operation};
use crate::reducer::{reduce, Action, CollectionState};
use siga_core::{Entity, EventItem, Member, Repository, Result, SigaError, TransactionItem};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::warn;

pub type MemberContainer = Container<Member>;
pub type EventContainer = Container<EventItem>;
pub type TransactionContainer = Container<TransactionItem>;

pub struct Container<E: Entity> {
    repository: Arc<dyn Repository<E>>,
    state: watch::Sender<CollectionState<E>>,
}

impl<E: Entity> Container<E> {
    pub fn new(repository: Arc<dyn Repository<E>>) -> Self {
        let (state, _) = watch::channel(CollectionState::default());
        Self { repository, state }
    }

    /// Copy of the current state
    pub fn state(&self) -> CollectionState<E> {
        self.state.borrow().clone()
    }

    /// Receiver notified after every state change
    pub fn subscribe(&self) -> watch::Receiver<CollectionState<E>> {
        self.state.subscribe()
    }

    pub fn items(&self) -> Vec<E> {
        self.state.borrow().items.clone()
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    /// Replace the cache with the full collection
    ///
    /// The loading flag is cleared whatever the outcome.
    pub async fn load(&self) -> Result<()> {
        self.dispatch(Action::SetLoading(true));

        let result = match self.repository.get_all().await {
            Ok(envelope) => {
                self.dispatch(Action::SetItems(envelope.into_inner()));
                Ok(())
            }
            Err(err) => Err(self.fail(Operation::Load, err)),
        };

        self.dispatch(Action::SetLoading(false));
        result
    }

    /// Create a record and append it to the cache without reloading
    pub async fn create(&self, draft: E::Create) -> Result<E> {
        match self.repository.create(draft).await {
            Ok(envelope) => {
                let created = envelope.into_inner();
                self.dispatch(Action::Add(created.clone()));
                Ok(created)
            }
            Err(err) => Err(self.fail(Operation::Create, err)),
        }
    }

    /// Patch a record and replace the cached copy in place
    ///
    /// A missing record is reported as `SigaError::NotFound`.
    pub async fn update(&self, id: &str, patch: E::Update) -> Result<E> {
        let outcome = self
            .repository
            .update(id, patch)
            .await
            .and_then(|envelope| {
                envelope
                    .into_inner()
                    .ok_or_else(|| SigaError::not_found(E::KIND.as_str(), id))
            });

        match outcome {
            Ok(updated) => {
                self.dispatch(Action::Update(updated.clone()));
                Ok(updated)
            }
            Err(err) => Err(self.fail(Operation::Update, err)),
        }
    }

    /// Delete a record and drop it from the cache
    ///
    /// Deleting an id that does not exist succeeds.
    pub async fn delete(&self, id: &str) -> Result<()> {
        match self.repository.delete(id).await {
            Ok(_) => {
                self.dispatch(Action::Delete(id.to_string()));
                Ok(())
            }
            Err(err) => Err(self.fail(Operation::Delete, err)),
        }
    }

    /// Fetch one record and make it the focused record
    pub async fn get_by_id(&self, id: &str) -> Result<Option<E>> {
        match self.repository.get_by_id(id).await {
            Ok(envelope) => {
                let found = envelope.into_inner();
                self.dispatch(Action::SetCurrent(found.clone()));
                Ok(found)
            }
            Err(err) => Err(self.fail(Operation::Fetch, err)),
        }
    }

    fn dispatch(&self, action: Action<E>) {
        self.state.send_modify(|state| reduce(state, action));
    }

    fn fail(&self, op: Operation, err: SigaError) -> SigaError {
        let message = messages::describe(E::KIND, op, &err);
        warn!(entity = %E::KIND, operation = ?op, error = %err, "Container operation failed");
        self.dispatch(Action::SetError(message));
        err
    }
}
