//! 401 handling and credential requirements

use assert_matches::assert_matches;
use feedback_board::egui_app::session::{FileSessionStorage, SessionStorage};
use feedback_board::egui_app::{SessionEvent, SessionStore, SignOutReason};
use feedback_board::shared::{ApiError, Role};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::assert_signed_out;
use crate::common::*;

#[tokio::test]
async fn test_any_401_tears_down_session() {
    let backend = TestBackend::signed_in(test_user("u1", "alice", Role::User)).await;
    Mock::given(method("PUT"))
        .and(path("/feedback/f1/upvote"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "Token expired" })))
        .mount(&backend.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/auth/profile"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&backend.server)
        .await;

    let mut events = backend.session.subscribe();
    let result = backend.feedback().upvote("f1").await;

    assert_matches!(result, Err(ApiError::Authentication(ref m)) if m == "Token expired");
    assert_signed_out!(backend.session);
    assert!(backend.storage.raw().is_none());
    assert_matches!(
        events.try_recv(),
        Ok(SessionEvent::SignedOut(SignOutReason::Unauthorized))
    );
    assert_matches!(backend.auth().get_profile().await, Err(ApiError::Authentication(_)));
}

#[tokio::test]
async fn test_profile_without_session_is_rejected_locally() {
    let backend = TestBackend::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/profile"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&backend.server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/auth/promote/u1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&backend.server)
        .await;

    let auth = backend.auth();
    assert_matches!(auth.get_profile().await, Err(ApiError::Authentication(_)));
    assert_matches!(auth.promote_to_admin("u1").await, Err(ApiError::Authentication(_)));
}

#[tokio::test]
async fn test_session_survives_restart_through_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let file = dir.path().join("nested").join("session.json");

    let first = SessionStore::restore(FileSessionStorage::new(&file));
    first
        .sign_in(TOKEN.to_string(), test_user("u1", "alice", Role::Admin))
        .expect("sign in");

    let restored = SessionStore::restore(FileSessionStorage::new(&file));
    assert_eq!(restored.token().as_deref(), Some(TOKEN));
    assert_eq!(
        restored.current_user().map(|u| u.role),
        Some(Role::Admin)
    );

    restored.sign_out(SignOutReason::Logout);
    let storage = FileSessionStorage::new(&file);
    assert!(storage.load().expect("load").is_none());
}
