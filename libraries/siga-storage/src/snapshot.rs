//! The persisted document and its schema migrations
//!
//! The whole association dataset is one JSON document:
//!
//! ```json
//! { "version": 1, "members": [...], "events": [...], "transactions": [...] }
//! ```
//!
//! Documents written before versioning existed have no `version` key and may
//! carry `_id` instead of `id`; `decode` upgrades them before use.

use crate::error::{Result, StorageError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use siga_core::types::ids;
use siga_core::{Entity, EventItem, Member, TransactionItem};

/// Schema version written by this build
pub const SNAPSHOT_VERSION: u32 = 1;

const COLLECTIONS: [&str; 3] = [
    Member::COLLECTION,
    EventItem::COLLECTION,
    TransactionItem::COLLECTION,
];

/// Full store contents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub events: Vec<EventItem>,
    #[serde(default)]
    pub transactions: Vec<TransactionItem>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            members: Vec::new(),
            events: Vec::new(),
            transactions: Vec::new(),
        }
    }
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Collection holding entities of type `E`
    pub fn items<E: Collection>(&self) -> &[E] {
        E::items(self)
    }
}

/// Maps an entity type to its collection inside the snapshot
pub trait Collection: Entity {
    fn items(snapshot: &Snapshot) -> &Vec<Self>;
    fn items_mut(snapshot: &mut Snapshot) -> &mut Vec<Self>;
}

impl Collection for Member {
    fn items(snapshot: &Snapshot) -> &Vec<Self> {
        &snapshot.members
    }

    fn items_mut(snapshot: &mut Snapshot) -> &mut Vec<Self> {
        &mut snapshot.members
    }
}

impl Collection for EventItem {
    fn items(snapshot: &Snapshot) -> &Vec<Self> {
        &snapshot.events
    }

    fn items_mut(snapshot: &mut Snapshot) -> &mut Vec<Self> {
        &mut snapshot.events
    }
}

impl Collection for TransactionItem {
    fn items(snapshot: &Snapshot) -> &Vec<Self> {
        &snapshot.transactions
    }

    fn items_mut(snapshot: &mut Snapshot) -> &mut Vec<Self> {
        &mut snapshot.transactions
    }
}

/// Result of reading a persisted document
#[derive(Debug)]
pub struct Decoded {
    pub snapshot: Snapshot,
    /// The document was upgraded and should be written back
    pub migrated: bool,
}

/// Parse and, if needed, migrate a persisted document
///
/// Returns `StorageError::SerializationError` for anything unreadable and
/// `StorageError::UnsupportedVersion` for documents from a newer build.
pub fn decode(raw: &str) -> Result<Decoded> {
    let value: Value = serde_json::from_str(raw)?;
    let (value, migrated) = migrate(value)?;
    let snapshot = serde_json::from_value(value)?;
    Ok(Decoded { snapshot, migrated })
}

/// Bring a raw document up to `SNAPSHOT_VERSION`
pub fn migrate(value: Value) -> Result<(Value, bool)> {
    let Value::Object(mut doc) = value else {
        return Err(StorageError::SerializationError(
            "snapshot is not a JSON object".to_string(),
        ));
    };

    let version = match doc.get("version") {
        None | Some(Value::Null) => 0,
        Some(v) => v
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| StorageError::SerializationError(format!("invalid version: {}", v)))?,
    };

    if version > SNAPSHOT_VERSION {
        return Err(StorageError::UnsupportedVersion {
            found: version,
            supported: SNAPSHOT_VERSION,
        });
    }
    if version == SNAPSHOT_VERSION {
        return Ok((Value::Object(doc), false));
    }

    // Only one upgrade step exists so far: unversioned -> 1
    upgrade_unversioned(&mut doc);
    doc.insert("version".to_string(), Value::from(SNAPSHOT_VERSION));

    Ok((Value::Object(doc), true))
}

/// Normalize record ids: `_id` becomes `id`, missing ids are generated
fn upgrade_unversioned(doc: &mut Map<String, Value>) {
    for key in COLLECTIONS {
        let Some(Value::Array(records)) = doc.get_mut(key) else {
            continue;
        };
        for record in records.iter_mut() {
            if let Value::Object(fields) = record {
                normalize_id(fields);
            }
        }
    }
}

fn normalize_id(fields: &mut Map<String, Value>) {
    if !ids::normalize_record(fields) {
        fields.insert("id".to_string(), Value::String(ids::generate()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn current_version_is_not_migrated() {
        let raw = json!({ "version": 1, "members": [], "events": [], "transactions": [] });
        let decoded = decode(&raw.to_string()).unwrap();
        assert!(!decoded.migrated);
        assert_eq!(decoded.snapshot, Snapshot::default());
    }

    #[test]
    fn unversioned_document_gets_ids_normalized() {
        let raw = json!({
            "members": [
                { "_id": "legacy-1", "name": "Ana", "email": "ana@example.com" },
                { "name": "Sin Id", "email": "sinid@example.com" }
            ],
            "events": [
                { "id": "e1", "_id": "ignored", "title": "Asamblea", "date": "2024-06-20" }
            ]
        });

        let decoded = decode(&raw.to_string()).unwrap();
        assert!(decoded.migrated);

        let members = &decoded.snapshot.members;
        assert_eq!(members[0].id, "legacy-1");
        assert!(!members[1].id.is_empty());
        assert_eq!(decoded.snapshot.events[0].id, "e1");
        assert!(decoded.snapshot.transactions.is_empty());
        assert_eq!(decoded.snapshot.version, SNAPSHOT_VERSION);
    }

    #[test]
    fn newer_version_is_refused() {
        let raw = json!({ "version": 99 }).to_string();
        assert!(matches!(
            decode(&raw),
            Err(StorageError::UnsupportedVersion { found: 99, .. })
        ));
    }

    #[test]
    fn garbage_is_a_serialization_error() {
        assert!(matches!(
            decode("{not json"),
            Err(StorageError::SerializationError(_))
        ));
        assert!(matches!(
            decode("[1, 2, 3]"),
            Err(StorageError::SerializationError(_))
        ));
    }
}
