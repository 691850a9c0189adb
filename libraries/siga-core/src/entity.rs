//! The `Entity` trait shared by every stored collection

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which collection a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Member,
    Event,
    Transaction,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Member => "member",
            EntityKind::Event => "event",
            EntityKind::Transaction => "transaction",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record stored in one of the snapshot collections
///
/// Each entity comes with a creation payload (`Create`) that may carry a
/// caller-chosen id, and a patch payload (`Update`) whose fields are all
/// optional and which never carries an id.
pub trait Entity:
    Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Data for creating a new record
    type Create: Clone + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static;

    /// Partial data merged onto an existing record
    type Update: Clone + fmt::Debug + Default + Serialize + DeserializeOwned + Send + Sync + 'static;

    const KIND: EntityKind;

    /// Snapshot key and REST resource path
    const COLLECTION: &'static str;

    fn id(&self) -> &str;

    /// Build a full record, assigning an id when the draft has none
    fn build(draft: Self::Create) -> Result<Self>;

    /// Shallow-merge a patch; the id is never touched
    fn apply(&mut self, patch: Self::Update) -> Result<()>;
}
