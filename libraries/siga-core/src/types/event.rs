//! Event types

use super::{clearable, ids, merge, Clearable};
use crate::entity::{Entity, EntityKind};
use crate::error::Result;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle of a scheduled event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
}

/// Association event (assembly, workshop, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventItem {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub status: EventStatus,
    /// Free-form tag ("general", "training", ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Data for creating a new event
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EventStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl CreateEvent {
    pub fn new(title: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: None,
            title: title.into(),
            date,
            location: None,
            description: None,
            capacity: None,
            status: None,
            category: None,
        }
    }
}

/// Data for updating an event (all fields optional)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(
        default,
        deserialize_with = "clearable",
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Clearable<String>,
    #[serde(
        default,
        deserialize_with = "clearable",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Clearable<String>,
    #[serde(
        default,
        deserialize_with = "clearable",
        skip_serializing_if = "Option::is_none"
    )]
    pub capacity: Clearable<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EventStatus>,
    #[serde(
        default,
        deserialize_with = "clearable",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Clearable<String>,
}

impl Entity for EventItem {
    type Create = CreateEvent;
    type Update = UpdateEvent;

    const KIND: EntityKind = EntityKind::Event;
    const COLLECTION: &'static str = "events";

    fn id(&self) -> &str {
        &self.id
    }

    fn build(draft: CreateEvent) -> Result<Self> {
        Ok(Self {
            id: ids::resolve(draft.id),
            title: draft.title,
            date: draft.date,
            location: draft.location,
            description: draft.description,
            capacity: draft.capacity,
            status: draft.status.unwrap_or_default(),
            category: draft.category,
            created_at: Some(Utc::now()),
        })
    }

    fn apply(&mut self, patch: UpdateEvent) -> Result<()> {
        merge(&mut self.title, patch.title);
        merge(&mut self.date, patch.date);
        merge(&mut self.location, patch.location);
        merge(&mut self.description, patch.description);
        merge(&mut self.capacity, patch.capacity);
        merge(&mut self.status, patch.status);
        merge(&mut self.category, patch.category);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn build_defaults_to_scheduled_and_stamps_creation() {
        let event = EventItem::build(CreateEvent::new("Taller", date(2024, 7, 5))).unwrap();
        assert!(!event.id.is_empty());
        assert_eq!(event.status, EventStatus::Scheduled);
        assert!(event.created_at.is_some());
    }

    #[test]
    fn negative_capacity_is_rejected_by_deserialization() {
        let result: std::result::Result<CreateEvent, _> = serde_json::from_value(serde_json::json!({
            "title": "Asamblea",
            "date": "2024-06-20",
            "capacity": -5
        }));
        assert!(result.is_err());
    }

    #[test]
    fn apply_reschedules_and_cancels() {
        let mut event = EventItem::build(CreateEvent {
            id: Some("e1".to_string()),
            capacity: Some(80),
            ..CreateEvent::new("Asamblea General", date(2024, 6, 20))
        })
        .unwrap();

        event
            .apply(UpdateEvent {
                date: Some(date(2024, 6, 27)),
                status: Some(EventStatus::Cancelled),
                ..UpdateEvent::default()
            })
            .unwrap();

        assert_eq!(event.id, "e1");
        assert_eq!(event.date, date(2024, 6, 27));
        assert_eq!(event.status, EventStatus::Cancelled);
        assert_eq!(event.capacity, Some(80));

        event
            .apply(UpdateEvent {
                capacity: Some(None),
                location: Some(Some("Sala 2".to_string())),
                ..UpdateEvent::default()
            })
            .unwrap();
        assert_eq!(event.capacity, None);
        assert_eq!(event.location.as_deref(), Some("Sala 2"));
    }
}
