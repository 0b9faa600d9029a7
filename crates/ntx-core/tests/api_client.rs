//! Integration tests for the notes API client against a mock server.

use ntx_core::api::{ApiErrorKind, NoteDraft, NotesApi};
use ntx_core::session::Session;
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api(server: &MockServer) -> NotesApi {
    NotesApi::new(server.uri())
}

#[tokio::test]
async fn test_register_then_login_yields_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 1,
            "email": "alice@example.com",
            "created_at": "2026-01-01T00:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "tok-abcdefghijklmnop",
            "token_type": "bearer"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = api(&server);
    let user = api.register("alice@example.com", "pw123").await.unwrap();
    assert_eq!(user.email, "alice@example.com");

    let session = api.login("alice@example.com", "pw123").await.unwrap();
    assert_eq!(session.token(), "tok-abcdefghijklmnop");
}

#[tokio::test]
async fn test_login_sends_form_encoded_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/token"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("username=alice%40example.com"))
        .and(body_string_contains("password=pw123"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"access_token": "tok"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    api(&server).login("alice@example.com", "pw123").await.unwrap();
}

#[tokio::test]
async fn test_login_failure_surfaces_server_detail() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/token"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"detail": "Incorrect email or password"})),
        )
        .mount(&server)
        .await;

    let err = api(&server).login("alice@example.com", "wrong").await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Auth);
    assert_eq!(err.message, "Incorrect email or password");
}

#[tokio::test]
async fn test_register_duplicate_email_surfaces_detail() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"detail": "Email already registered"})),
        )
        .mount(&server)
        .await;

    let err = api(&server)
        .register("alice@example.com", "pw123")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Auth);
    assert_eq!(err.message, "Email already registered");
}

#[tokio::test]
async fn test_list_notes_attaches_bearer_and_returns_collection() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/notes"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "title": "Groceries", "content": "milk", "owner_id": 7},
            {"id": 2, "title": "Ideas", "content": null, "owner_id": 7}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let notes = api(&server)
        .list_notes(&Session::new("tok-1"))
        .await
        .unwrap();
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0].title, "Groceries");
    assert_eq!(notes[0].content.as_deref(), Some("milk"));
    assert!(notes[1].content.is_none());
}

#[tokio::test]
async fn test_rejected_token_maps_to_auth_expired() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/notes"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = api(&server)
        .list_notes(&Session::new("stale"))
        .await
        .unwrap_err();
    assert!(err.is_auth_expired());
}

#[tokio::test]
async fn test_forbidden_also_maps_to_auth_expired() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/notes/9"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let err = api(&server)
        .delete_note(&Session::new("stale"), 9)
        .await
        .unwrap_err();
    assert!(err.is_auth_expired());
}

#[tokio::test]
async fn test_create_with_blank_title_issues_no_request() {
    let server = MockServer::start().await;

    // Any POST would fail the expectation check on drop.
    Mock::given(method("POST"))
        .and(path("/notes"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let err = api(&server)
        .create_note(&Session::new("tok"), &NoteDraft::new("   ", None))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::EmptyTitle);
}

#[tokio::test]
async fn test_create_note_posts_json_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/notes"))
        .and(header("authorization", "Bearer tok"))
        .and(body_string_contains("\"title\":\"Groceries\""))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 1, "title": "Groceries", "content": "milk"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let note = api(&server)
        .create_note(
            &Session::new("tok"),
            &NoteDraft::new("Groceries", Some("milk".to_string())),
        )
        .await
        .unwrap();
    assert_eq!(note.id, 1);
}

#[tokio::test]
async fn test_delete_note_succeeds_on_204() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/notes/1"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    api(&server).delete_note(&Session::new("tok"), 1).await.unwrap();
}

#[tokio::test]
async fn test_delete_missing_note_is_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/notes/42"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"detail": "Note not found"})),
        )
        .mount(&server)
        .await;

    let err = api(&server)
        .delete_note(&Session::new("tok"), 42)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::NotFound);
}

#[tokio::test]
async fn test_get_and_update_note() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/notes/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 5, "title": "Old", "content": "body"
        })))
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/notes/5"))
        .and(body_string_contains("\"title\":\"New\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 5, "title": "New", "content": "body"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = api(&server);
    let session = Session::new("tok");

    let note = api.get_note(&session, 5).await.unwrap();
    assert_eq!(note.title, "Old");

    let updated = api
        .update_note(&session, 5, &NoteDraft::new("New", Some("body".to_string())))
        .await
        .unwrap();
    assert_eq!(updated.title, "New");
}

#[tokio::test]
async fn test_me_returns_user() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7, "email": "alice@example.com", "created_at": "2026-01-01T00:00:00Z"
        })))
        .mount(&server)
        .await;

    let user = api(&server).me(&Session::new("tok")).await.unwrap();
    assert_eq!(user.id, 7);
    assert_eq!(user.email, "alice@example.com");
}

#[tokio::test]
async fn test_server_error_carries_status_and_detail() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/notes"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"detail": "boom"})))
        .mount(&server)
        .await;

    let err = api(&server)
        .create_note(&Session::new("tok"), &NoteDraft::new("t", None))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::HttpStatus);
    assert_eq!(err.message, "HTTP 500: boom");
}
