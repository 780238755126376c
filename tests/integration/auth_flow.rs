//! Registration, login, profile and promotion through the auth facade

use assert_matches::assert_matches;
use feedback_board::shared::{ApiError, Role};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common::*;
use crate::{assert_ok, assert_signed_out};

#[tokio::test]
async fn test_register_then_login_round_trip() {
    let backend = TestBackend::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .and(body_json(json!({
            "username": "alice",
            "email": "alice@example.com",
            "password": "hunter22",
            "phone": "555-0100",
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(auth_json("u1", "alice", "user")))
        .expect(1)
        .mount(&backend.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({ "username": "alice", "password": "hunter22" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_json("u1", "alice", "user")))
        .expect(1)
        .mount(&backend.server)
        .await;

    let auth = backend.auth();
    let registered = assert_ok!(
        auth.register("alice", "alice@example.com", "hunter22", "555-0100")
            .await
    );
    assert_eq!(registered.user.username, "alice");
    assert!(backend.session.is_authenticated());

    backend
        .session
        .sign_out(feedback_board::egui_app::SignOutReason::Logout);
    assert_signed_out!(backend.session);

    let logged_in = assert_ok!(auth.login("alice", "hunter22").await);
    assert_eq!(logged_in.user.id, registered.user.id);
    assert_eq!(logged_in.user.username, registered.user.username);
    assert_eq!(logged_in.user.email, registered.user.email);
    assert_eq!(logged_in.user.phone, registered.user.phone);
    assert_eq!(backend.session.token().as_deref(), Some(TOKEN));
    assert!(backend.storage.raw().is_some_and(|raw| raw.contains(TOKEN)));
}

#[tokio::test]
async fn test_duplicate_registration_is_registration_error() {
    let backend = TestBackend::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "message": "User already exists" })),
        )
        .mount(&backend.server)
        .await;

    let result = backend
        .auth()
        .register("alice", "alice@example.com", "hunter22", "555-0100")
        .await;

    assert_matches!(result, Err(ApiError::Registration(ref m)) if m == "User already exists");
    assert_signed_out!(backend.session);
}

#[tokio::test]
async fn test_wrong_password_is_authentication_error() {
    let backend = TestBackend::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Invalid credentials" })),
        )
        .mount(&backend.server)
        .await;

    let mut events = backend.session.subscribe();
    let result = backend.auth().login("alice", "wrong").await;

    assert_matches!(result, Err(ApiError::Authentication(ref m)) if m == "Invalid credentials");
    assert_signed_out!(backend.session);
    assert!(events.try_recv().is_err(), "no session existed, so nothing to announce");
}

#[tokio::test]
async fn test_empty_login_fields_never_reach_network() {
    let backend = TestBackend::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&backend.server)
        .await;

    let result = backend.auth().login("  ", "secret").await;
    assert_matches!(result, Err(ApiError::Validation(_)));
}

#[tokio::test]
async fn test_get_profile_is_idempotent() {
    let backend = TestBackend::signed_in(test_user("u1", "alice", Role::User)).await;
    Mock::given(method("GET"))
        .and(path("/auth/profile"))
        .and(header("authorization", format!("Bearer {}", TOKEN).as_str()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "user": user_json("u1", "alice", "user") })),
        )
        .expect(2)
        .mount(&backend.server)
        .await;

    let auth = backend.auth();
    let first = assert_ok!(auth.get_profile().await);
    let second = assert_ok!(auth.get_profile().await);
    assert_eq!(first, second);
    assert_eq!(backend.session.current_user(), Some(first));
}

#[tokio::test]
async fn test_promote_self_grants_admin_controls() {
    let backend = TestBackend::signed_in(test_user("u1", "alice", Role::User)).await;
    Mock::given(method("PUT"))
        .and(path("/auth/promote/u1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "user": user_json("u1", "alice", "admin") })),
        )
        .expect(1)
        .mount(&backend.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/auth/profile"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "user": user_json("u1", "alice", "admin") })),
        )
        .mount(&backend.server)
        .await;

    let auth = backend.auth();
    let promoted = assert_ok!(auth.promote_to_admin("u1").await);
    assert_eq!(promoted.role, Role::Admin);

    let current = backend.session.current_user().expect("still signed in");
    assert!(current.is_admin());
    assert!(current.can_change_status());
    assert!(!current.can_promote());

    let profile = assert_ok!(auth.get_profile().await);
    let reconciled = assert_ok!(backend.session.reconcile_user(profile));
    assert_eq!(reconciled.role, Role::Admin);
}

#[tokio::test]
async fn test_verify_invalid_token_signs_out() {
    let backend = TestBackend::signed_in(test_user("u1", "alice", Role::User)).await;
    Mock::given(method("GET"))
        .and(path("/auth/verify"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "valid": false })))
        .mount(&backend.server)
        .await;

    let result = backend.auth().verify().await;
    assert_matches!(result, Err(ApiError::Authentication(_)));
    assert_signed_out!(backend.session);
    assert!(backend.storage.raw().is_none());
}

#[tokio::test]
async fn test_logout_ends_session_even_when_backend_fails() {
    let backend = TestBackend::signed_in(test_user("u1", "alice", Role::User)).await;
    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&backend.server)
        .await;

    backend.auth().logout().await;
    assert_signed_out!(backend.session);
}

#[tokio::test]
async fn test_logout_does_not_wait_for_backend() {
    let backend = TestBackend::signed_in(test_user("u1", "alice", Role::User)).await;
    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&backend.server)
        .await;

    let auth = backend.auth();
    let token = auth.end_session();
    assert_eq!(token.as_deref(), Some(TOKEN));
    assert_signed_out!(backend.session);
    assert!(backend.storage.raw().is_none());

    let slow = tokio::time::timeout(Duration::from_millis(300), auth.notify_logout(token)).await;
    assert!(slow.is_err(), "the notification is still in flight");
    assert_signed_out!(backend.session);
}

#[tokio::test]
async fn test_logout_notification_carries_revoked_token() {
    let backend = TestBackend::signed_in(test_user("u1", "alice", Role::User)).await;
    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .and(header("authorization", format!("Bearer {}", TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "Logged out" })))
        .expect(1)
        .mount(&backend.server)
        .await;

    backend.auth().logout().await;
    assert_signed_out!(backend.session);
}

#[tokio::test]
async fn test_forbidden_promote_leaves_role_untouched() {
    let backend = TestBackend::signed_in(test_user("u1", "alice", Role::User)).await;
    Mock::given(method("PUT"))
        .and(path("/auth/promote/u1"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({ "message": "Admin access required" })),
        )
        .expect(1)
        .mount(&backend.server)
        .await;

    let persisted = backend.storage.raw();
    let result = backend.auth().promote_to_admin("u1").await;

    assert_matches!(result, Err(ApiError::Authorization(ref m)) if m == "Admin access required");
    assert_eq!(
        backend.session.current_user().map(|u| u.role),
        Some(Role::User)
    );
    assert_eq!(backend.storage.raw(), persisted);
}
