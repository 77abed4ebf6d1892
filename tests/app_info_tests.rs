use feedback_store::errors::ServiceError;
use feedback_store::repository::AppInfoRepository;
use feedback_store::repository::app_info::{
    ID_PREFIX, MISSING_FIELDS_ERROR, NO_FIELDS_ERROR, NOT_FOUND_ERROR,
};
use feedback_store::store::InMemoryStore;
use serde_json::{Value, json};

fn repo() -> AppInfoRepository<InMemoryStore> {
    AppInfoRepository::new(InMemoryStore::new("app-info"))
}

fn full_payload() -> Value {
    json!({
        "name": "reader",
        "title": "Reader Mode",
        "description": "Strips clutter from pages",
        "locale": "en",
        "pre_message": "Tell us why you are leaving",
        "pre_action": "open_survey"
    })
}

#[tokio::test]
async fn test_create_stamps_id_and_timestamp() {
    let repo = repo();

    let created = repo.create(&full_payload()).await.unwrap();

    assert!(created.id.starts_with(ID_PREFIX));
    assert!(created.id.len() > ID_PREFIX.len());
    assert_eq!(created.name, "reader");
    assert_eq!(created.pre_action, "open_survey");
    assert!(chrono::DateTime::parse_from_rfc3339(&created.created_at).is_ok());

    let fetched = repo.get_by_id(&created.id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_create_missing_any_field_persists_nothing() {
    let repo = repo();

    for field in ["name", "title", "description", "locale", "pre_message", "pre_action"] {
        let mut payload = full_payload();
        payload.as_object_mut().unwrap().remove(field);
        let err = repo.create(&payload).await.unwrap_err();
        assert!(
            matches!(err, ServiceError::ValidationError(ref m) if m == MISSING_FIELDS_ERROR),
            "missing {field} should fail"
        );

        let mut payload = full_payload();
        payload[field] = json!("");
        assert!(repo.create(&payload).await.is_err(), "empty {field} should fail");
    }

    assert_eq!(repo.store().write_count(), 0);
}

#[tokio::test]
async fn test_create_rejects_non_string_fields() {
    let mut payload = full_payload();
    payload["title"] = json!(42);

    let err = repo().create(&payload).await.unwrap_err();
    assert!(matches!(err, ServiceError::ValidationError(_)));
}

#[tokio::test]
async fn test_partial_update_merges_into_record() {
    let repo = repo();
    let created = repo.create(&full_payload()).await.unwrap();

    let updated = repo
        .update_by_id(&created.id, &json!({"title": "Reader", "locale": "de"}))
        .await
        .unwrap();

    assert_eq!(updated.title, "Reader");
    assert_eq!(updated.locale, "de");
    assert_eq!(updated.name, created.name);
    assert_eq!(updated.description, created.description);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at.is_some());
}

#[tokio::test]
async fn test_update_with_no_fields_is_rejected() {
    let repo = repo();
    let created = repo.create(&full_payload()).await.unwrap();

    let err = repo
        .update_by_id(&created.id, &json!({"color": "blue"}))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::ValidationError(ref m) if m == NO_FIELDS_ERROR));
}

#[tokio::test]
async fn test_update_unknown_id_is_not_found() {
    let repo = repo();

    let err = repo
        .update_by_id("ext-id-missing", &json!({"title": "x"}))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::NotFoundError(ref m) if m == NOT_FOUND_ERROR));
    assert!(repo.store().is_empty().await);
}

#[tokio::test]
async fn test_get_unknown_id_is_not_found() {
    let err = repo().get_by_id("ext-id-missing").await.unwrap_err();
    assert_eq!(err.status_code(500), 404);
}

#[tokio::test]
async fn test_list_and_idempotent_delete() {
    let repo = repo();
    let first = repo.create(&full_payload()).await.unwrap();
    repo.create(&full_payload()).await.unwrap();

    assert_eq!(repo.list().await.unwrap().len(), 2);

    repo.delete_by_id(&first.id).await.unwrap();
    repo.delete_by_id(&first.id).await.unwrap();
    repo.delete_by_id("ext-id-never").await.unwrap();

    let remaining = repo.list().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_ne!(remaining[0].id, first.id);
}
