//! Event queries beyond plain CRUD

use crate::store::Store;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use siga_core::{error::Result, EventItem};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventStats {
    pub total: usize,
}

pub async fn stats(store: &Store) -> Result<EventStats> {
    let snapshot = store.load().await?;
    Ok(EventStats {
        total: snapshot.events.len(),
    })
}

/// Whether the event date falls within `[start, end]`; an absent bound is open
pub fn within(event: &EventItem, start: Option<NaiveDate>, end: Option<NaiveDate>) -> bool {
    start.map_or(true, |s| event.date >= s) && end.map_or(true, |e| event.date <= e)
}

/// Case-insensitive match on title or description
pub fn matches(event: &EventItem, query: &str) -> bool {
    let needle = query.to_lowercase();
    event.title.to_lowercase().contains(&needle)
        || event
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(&needle))
}

pub async fn filter_by_date(
    store: &Store,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<Vec<EventItem>> {
    let snapshot = store.load().await?;
    Ok(snapshot
        .events
        .into_iter()
        .filter(|e| within(e, start, end))
        .collect())
}

pub async fn search(store: &Store, query: &str) -> Result<Vec<EventItem>> {
    let snapshot = store.load().await?;
    Ok(snapshot
        .events
        .into_iter()
        .filter(|e| matches(e, query))
        .collect())
}
