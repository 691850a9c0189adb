//! Collection state and the reducer that drives it
//!
//! `reduce` is the only place state changes. Containers build an [`Action`]
//! from each repository outcome and hand it over; nothing else writes to a
//! [`CollectionState`].

use serde::Serialize;
use siga_core::Entity;

/// Where a container is in its fetch cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Ready,
    Error,
}

/// Cached view of one collection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionState<E> {
    pub items: Vec<E>,
    pub loading: bool,
    /// Last user-facing error message
    pub error: Option<String>,
    /// Record focused by an edit form
    pub current: Option<E>,
    pub phase: Phase,
}

impl<E> Default for CollectionState<E> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            current: None,
            phase: Phase::Idle,
        }
    }
}

impl<E: Entity> CollectionState<E> {
    pub fn find(&self, id: &str) -> Option<&E> {
        self.items.iter().find(|item| item.id() == id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action<E> {
    SetLoading(bool),
    SetItems(Vec<E>),
    Add(E),
    Update(E),
    Delete(String),
    SetCurrent(Option<E>),
    SetError(String),
}

pub fn reduce<E: Entity>(state: &mut CollectionState<E>, action: Action<E>) {
    match action {
        Action::SetLoading(true) => {
            state.loading = true;
            state.phase = Phase::Loading;
        }
        Action::SetLoading(false) => {
            state.loading = false;
            if state.phase == Phase::Loading {
                state.phase = if state.error.is_some() {
                    Phase::Error
                } else {
                    Phase::Ready
                };
            }
        }
        Action::SetItems(items) => {
            state.items = items;
            state.loading = false;
            state.error = None;
            state.phase = Phase::Ready;
        }
        Action::Add(item) => state.items.push(item),
        Action::Update(item) => {
            if let Some(slot) = state.items.iter_mut().find(|i| i.id() == item.id()) {
                *slot = item.clone();
            }
            if let Some(current) = state.current.as_mut().filter(|c| c.id() == item.id()) {
                *current = item;
            }
        }
        Action::Delete(id) => {
            state.items.retain(|item| item.id() != id);
            if state.current.as_ref().is_some_and(|c| c.id() == id) {
                state.current = None;
            }
        }
        Action::SetCurrent(current) => state.current = current,
        Action::SetError(message) => {
            state.error = Some(message);
            state.loading = false;
            state.phase = Phase::Error;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use siga_core::{CreateMember, Member, MemberStatus};

    fn member(id: &str, name: &str) -> Member {
        Member::build(CreateMember {
            id: Some(id.to_string()),
            ..CreateMember::new(name, format!("{id}@example.com"))
        })
        .unwrap()
    }

    #[test]
    fn load_cycle_moves_through_phases() {
        let mut state = CollectionState::<Member>::default();
        assert_eq!(state.phase, Phase::Idle);

        reduce(&mut state, Action::SetLoading(true));
        assert!(state.loading);
        assert_eq!(state.phase, Phase::Loading);

        reduce(&mut state, Action::SetItems(vec![member("a", "Ana")]));
        reduce(&mut state, Action::SetLoading(false));
        assert!(!state.loading);
        assert_eq!(state.phase, Phase::Ready);
        assert_eq!(state.items.len(), 1);
    }

    #[test]
    fn failed_load_ends_in_error_phase() {
        let mut state = CollectionState::<Member>::default();
        reduce(&mut state, Action::SetLoading(true));
        reduce(&mut state, Action::SetError("Error al cargar miembros: x".into()));
        reduce(&mut state, Action::SetLoading(false));

        assert_eq!(state.phase, Phase::Error);
        assert_eq!(state.error.as_deref(), Some("Error al cargar miembros: x"));
    }

    #[test]
    fn successful_reload_clears_error() {
        let mut state = CollectionState::<Member>::default();
        reduce(&mut state, Action::SetError("boom".into()));
        reduce(&mut state, Action::SetLoading(true));
        reduce(&mut state, Action::SetItems(Vec::new()));

        assert_eq!(state.error, None);
        assert_eq!(state.phase, Phase::Ready);
    }

    #[test]
    fn update_replaces_in_place_and_refreshes_current() {
        let mut state = CollectionState::default();
        reduce(
            &mut state,
            Action::SetItems(vec![member("a", "Ana"), member("b", "Beto")]),
        );
        reduce(&mut state, Action::SetCurrent(Some(member("b", "Beto"))));

        let mut changed = member("b", "Beto");
        changed.status = MemberStatus::Suspended;
        reduce(&mut state, Action::Update(changed.clone()));

        assert_eq!(state.items[1], changed);
        assert_eq!(state.items[0].name, "Ana");
        assert_eq!(state.current, Some(changed));
    }

    #[test]
    fn update_of_unknown_record_changes_nothing() {
        let mut state = CollectionState::default();
        reduce(&mut state, Action::SetItems(vec![member("a", "Ana")]));
        let before = state.clone();

        reduce(&mut state, Action::Update(member("zz", "Nadie")));
        assert_eq!(state, before);
    }

    #[test]
    fn delete_removes_record_and_focus() {
        let mut state = CollectionState::default();
        reduce(
            &mut state,
            Action::SetItems(vec![member("a", "Ana"), member("b", "Beto")]),
        );
        reduce(&mut state, Action::SetCurrent(Some(member("a", "Ana"))));
        reduce(&mut state, Action::Delete("a".into()));

        assert_eq!(state.items.len(), 1);
        assert!(state.find("a").is_none());
        assert_eq!(state.current, None);
    }

    #[test]
    fn add_appends() {
        let mut state = CollectionState::default();
        reduce(&mut state, Action::SetItems(vec![member("a", "Ana")]));
        reduce(&mut state, Action::Add(member("b", "Beto")));

        let ids: Vec<_> = state.items.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
