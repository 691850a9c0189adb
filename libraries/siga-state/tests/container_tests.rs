//! Containers over the local store and over a failing backend

use async_trait::async_trait;
use chrono::NaiveDate;
use mockall::mock;
use siga_core::{
    CreateEvent, CreateMember, Envelope, EventItem, EventStatus, Member, MemberStatus, Repository,
    Result, SigaError, UpdateEvent, UpdateMember,
};
use siga_state::{EventContainer, MemberContainer, Phase};
use siga_storage::{LocalRepository, Store};
use std::sync::Arc;

mock! {
    pub MemberRepo {}

    #[async_trait]
    impl Repository<Member> for MemberRepo {
        async fn get_all(&self) -> Result<Envelope<Vec<Member>>>;
        async fn get_by_id(&self, id: &str) -> Result<Envelope<Option<Member>>>;
        async fn create(&self, draft: CreateMember) -> Result<Envelope<Member>>;
        async fn update(&self, id: &str, patch: UpdateMember) -> Result<Envelope<Option<Member>>>;
        async fn delete(&self, id: &str) -> Result<Envelope<bool>>;
    }
}

fn local_members() -> MemberContainer {
    let store = Arc::new(Store::in_memory());
    MemberContainer::new(Arc::new(LocalRepository::<Member>::new(store)))
}

fn local_events() -> EventContainer {
    let store = Arc::new(Store::in_memory());
    EventContainer::new(Arc::new(LocalRepository::<EventItem>::new(store)))
}

#[tokio::test]
async fn test_load_fills_cache_and_clears_loading() {
    let members = local_members();
    let mut updates = members.subscribe();

    members.load().await.unwrap();

    let state = members.state();
    assert_eq!(state.items.len(), 3);
    assert!(!state.loading);
    assert_eq!(state.phase, Phase::Ready);
    assert_eq!(state.error, None);
    assert!(updates.has_changed().unwrap());
    assert_eq!(updates.borrow_and_update().items.len(), 3);
}

#[tokio::test]
async fn test_create_appends_without_reload() {
    let members = local_members();
    members.load().await.unwrap();

    let created = members
        .create(CreateMember::new("Ana Gómez", "ana@example.com"))
        .await
        .unwrap();

    let items = members.items();
    assert_eq!(items.len(), 4);
    assert_eq!(items.last(), Some(&created));
}

#[tokio::test]
async fn test_update_replaces_cached_record() {
    let members = local_members();
    members.load().await.unwrap();

    let patch = UpdateMember {
        status: Some(MemberStatus::Suspended),
        ..UpdateMember::default()
    };
    let updated = members.update("m2", patch).await.unwrap();

    assert_eq!(updated.status, MemberStatus::Suspended);
    assert_eq!(members.state().find("m2"), Some(&updated));
    assert_eq!(members.items()[1].id, "m2");
}

#[tokio::test]
async fn test_update_of_missing_record_is_not_found() {
    let members = local_members();
    members.load().await.unwrap();
    let before = members.items();

    let err = members
        .update("ghost", UpdateMember::default())
        .await
        .unwrap_err();

    assert!(matches!(err, SigaError::NotFound { .. }));
    let state = members.state();
    assert_eq!(state.items, before);
    assert!(state
        .error
        .as_deref()
        .is_some_and(|e| e.starts_with("Error al actualizar miembro: ")));
}

#[tokio::test]
async fn test_delete_drops_record_and_tolerates_missing_ids() {
    let members = local_members();
    members.load().await.unwrap();

    members.delete("m3").await.unwrap();
    members.delete("m3").await.unwrap();

    assert_eq!(members.items().len(), 2);
    assert!(members.state().find("m3").is_none());
}

#[tokio::test]
async fn test_get_by_id_sets_focused_record() {
    let members = local_members();

    let found = members.get_by_id("m1").await.unwrap();
    assert_eq!(members.state().current, found);
    assert_eq!(found.map(|m| m.name), Some("María López".to_string()));

    let missing = members.get_by_id("nope").await.unwrap();
    assert_eq!(missing, None);
    assert_eq!(members.state().current, None);
}

#[tokio::test]
async fn test_workshop_created_through_container_shows_in_reload() {
    let events = local_events();
    let date = NaiveDate::from_ymd_opt(2024, 7, 5).unwrap();

    let created = events.create(CreateEvent::new("Taller", date)).await.unwrap();
    assert!(!created.id.is_empty());

    events.load().await.unwrap();
    assert!(events.items().iter().any(|e| e.id == created.id));

    let cancelled = events
        .update(
            &created.id,
            UpdateEvent {
                status: Some(EventStatus::Cancelled),
                ..UpdateEvent::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(cancelled.id, created.id);
    assert_eq!(cancelled.title, "Taller");
}

#[tokio::test]
async fn test_failed_load_records_prefixed_message() {
    let mut repo = MockMemberRepo::new();
    repo.expect_get_all()
        .times(1)
        .returning(|| Err(SigaError::Network("connection refused".to_string())));

    let members = MemberContainer::new(Arc::new(repo));
    let err = members.load().await.unwrap_err();

    assert!(matches!(err, SigaError::Network(_)));
    let state = members.state();
    assert!(!state.loading);
    assert_eq!(state.phase, Phase::Error);
    assert_eq!(
        state.error.as_deref(),
        Some("Error al cargar miembros: Network error: connection refused")
    );
}

#[tokio::test]
async fn test_failed_mutations_are_rethrown() {
    let mut repo = MockMemberRepo::new();
    repo.expect_create()
        .returning(|_| Err(SigaError::storage("quota exceeded")));
    repo.expect_delete()
        .returning(|_| Err(SigaError::storage("quota exceeded")));
    repo.expect_get_by_id()
        .returning(|_| Err(SigaError::AuthRequired));

    let members = MemberContainer::new(Arc::new(repo));

    assert!(members
        .create(CreateMember::new("Ana", "ana@example.com"))
        .await
        .is_err());
    assert!(members
        .error()
        .is_some_and(|e| e.starts_with("Error al crear miembro: ")));

    assert!(members.delete("m1").await.is_err());
    assert!(members
        .error()
        .is_some_and(|e| e.starts_with("Error al eliminar miembro: ")));

    assert!(members.get_by_id("m1").await.unwrap_err().is_auth());
    assert!(members
        .error()
        .is_some_and(|e| e.starts_with("Error al cargar miembro: ")));
    assert!(members.items().is_empty());
}
