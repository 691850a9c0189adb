/// Record identifier helpers
use serde_json::{Map, Value};
use uuid::Uuid;

/// Generate a new random record id
pub fn generate() -> String {
    Uuid::new_v4().to_string()
}

/// Keep a caller-supplied id when it is non-empty, otherwise generate one
pub fn resolve(requested: Option<String>) -> String {
    requested
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .unwrap_or_else(generate)
}

/// Promote a legacy `_id` field to `id`
///
/// An existing non-empty `id` wins and `_id` is dropped either way. Returns
/// whether the record ends up with a non-empty `id`.
pub fn normalize_record(fields: &mut Map<String, Value>) -> bool {
    let legacy = fields.remove("_id");
    if has_id(fields) {
        return true;
    }

    let legacy = legacy
        .as_ref()
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|id| !id.is_empty());
    match legacy {
        Some(id) => {
            fields.insert("id".to_string(), Value::String(id.to_string()));
            true
        }
        None => false,
    }
}

fn has_id(fields: &Map<String, Value>) -> bool {
    fields
        .get("id")
        .and_then(Value::as_str)
        .is_some_and(|id| !id.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_creates_unique_ids() {
        let id1 = generate();
        let id2 = generate();
        assert_ne!(id1, id2);
        assert!(!id1.is_empty());
    }

    #[test]
    fn resolve_keeps_requested_id() {
        assert_eq!(resolve(Some("m42".to_string())), "m42");
    }

    #[test]
    fn resolve_replaces_blank_id() {
        let id = resolve(Some("   ".to_string()));
        assert!(!id.trim().is_empty());
        assert!(!resolve(None).is_empty());
    }

    fn fields(value: serde_json::Value) -> Map<String, Value> {
        match value {
            Value::Object(fields) => fields,
            other => panic!("not an object: {other}"),
        }
    }

    #[test]
    fn legacy_id_is_promoted() {
        let mut record = fields(serde_json::json!({ "_id": "abc", "name": "Ana" }));
        assert!(normalize_record(&mut record));
        assert_eq!(record["id"], "abc");
        assert!(!record.contains_key("_id"));
    }

    #[test]
    fn present_id_wins_over_legacy() {
        let mut record = fields(serde_json::json!({ "id": "e1", "_id": "ignored" }));
        assert!(normalize_record(&mut record));
        assert_eq!(record["id"], "e1");
        assert!(!record.contains_key("_id"));
    }

    #[test]
    fn blank_ids_are_reported_missing() {
        let mut record = fields(serde_json::json!({ "id": "", "_id": "  " }));
        assert!(!normalize_record(&mut record));
        assert!(!normalize_record(&mut fields(serde_json::json!({ "name": "Ana" }))));
    }
}
