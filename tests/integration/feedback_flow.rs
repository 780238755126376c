//! Feedback facade against a mocked backend

use assert_matches::assert_matches;
use feedback_board::shared::{ApiError, FeedbackStatus, NewFeedback, Role};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::assert_ok;
use crate::common::*;

#[tokio::test]
async fn test_submit_then_list_shows_new_entry() {
    let backend = TestBackend::signed_in(test_user("u1", "alice", Role::User)).await;
    Mock::given(method("POST"))
        .and(path("/feedback"))
        .and(header("authorization", format!("Bearer {}", TOKEN).as_str()))
        .and(body_json(json!({
            "title": "Add dark mode",
            "description": "Please add a dark theme",
            "status": "pending",
        })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(feedback_json("f1", "Add dark mode", "pending", 0)),
        )
        .expect(1)
        .mount(&backend.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/feedback"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            feedback_json("f1", "Add dark mode", "pending", 0),
        ])))
        .mount(&backend.server)
        .await;

    let api = backend.feedback();
    let created = assert_ok!(
        api.create(NewFeedback::new("  Add dark mode ", "Please add a dark theme"))
            .await
    );
    assert_eq!(created.id, "f1");

    let list = assert_ok!(api.list().await);
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].title, "Add dark mode");
    assert_eq!(list[0].status, FeedbackStatus::Pending);
    assert_eq!(list[0].upvotes, 0);
    assert_eq!(list[0].author_name(), "alice");
}

#[tokio::test]
async fn test_list_keeps_server_order_and_handles_missing_author() {
    let backend = TestBackend::start().await;
    let mut anonymous = feedback_json("f2", "Faster search", "in-progress", 7);
    anonymous["user"] = serde_json::Value::Null;
    Mock::given(method("GET"))
        .and(path("/feedback"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            feedback_json("f3", "Export CSV", "completed", 2),
            anonymous,
            feedback_json("f1", "Dark mode", "closed", 9),
        ])))
        .mount(&backend.server)
        .await;

    let list = assert_ok!(backend.feedback().list().await);
    let ids: Vec<&str> = list.iter().map(|f| f.id.as_str()).collect();
    assert_eq!(ids, vec!["f3", "f2", "f1"]);
    assert_eq!(list[1].author_name(), "Anonymous");
    assert_eq!(list[1].status, FeedbackStatus::InProgress);
}

#[tokio::test]
async fn test_two_upvotes_both_count() {
    let backend = TestBackend::signed_in(test_user("u2", "bob", Role::User)).await;
    Mock::given(method("PUT"))
        .and(path("/feedback/f1/upvote"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(feedback_json("f1", "Dark mode", "pending", 4)),
        )
        .up_to_n_times(1)
        .expect(1)
        .mount(&backend.server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/feedback/f1/upvote"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(feedback_json("f1", "Dark mode", "pending", 5)),
        )
        .expect(1)
        .mount(&backend.server)
        .await;

    let api = backend.feedback();
    let first = assert_ok!(api.upvote("f1").await);
    let second = assert_ok!(api.upvote("f1").await);
    assert_eq!(first.upvotes, 4);
    assert_eq!(second.upvotes, 5);
}

#[tokio::test]
async fn test_concurrent_upvotes_are_both_sent() {
    let backend = TestBackend::signed_in(test_user("u2", "bob", Role::User)).await;
    Mock::given(method("PUT"))
        .and(path("/feedback/f1/upvote"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(feedback_json("f1", "Dark mode", "pending", 4)),
        )
        .up_to_n_times(1)
        .expect(1)
        .mount(&backend.server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/feedback/f1/upvote"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(feedback_json("f1", "Dark mode", "pending", 5)),
        )
        .up_to_n_times(1)
        .expect(1)
        .mount(&backend.server)
        .await;

    let api = backend.feedback();
    let (first, second) = tokio::join!(api.upvote("f1"), api.upvote("f1"));
    let mut counts = vec![assert_ok!(first).upvotes, assert_ok!(second).upvotes];
    counts.sort_unstable();
    assert_eq!(counts, vec![4, 5]);
}

#[tokio::test]
async fn test_non_admin_status_change_is_forbidden() {
    let backend = TestBackend::signed_in(test_user("u2", "bob", Role::User)).await;
    Mock::given(method("PUT"))
        .and(path("/feedback/f1/status"))
        .and(body_json(json!({ "status": "completed" })))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({ "message": "Admin access required" })),
        )
        .mount(&backend.server)
        .await;

    let result = backend
        .feedback()
        .update_status("f1", FeedbackStatus::Completed)
        .await;

    assert_matches!(result, Err(ApiError::Authorization(ref m)) if m == "Admin access required");
    assert!(backend.session.is_authenticated(), "403 must not end the session");
}

#[tokio::test]
async fn test_admin_moves_status_backwards() {
    let backend = TestBackend::signed_in(test_user("a1", "root", Role::Admin)).await;
    Mock::given(method("PUT"))
        .and(path("/feedback/f1/status"))
        .and(body_json(json!({ "status": "pending" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(feedback_json("f1", "Dark mode", "pending", 1)),
        )
        .expect(1)
        .mount(&backend.server)
        .await;

    let updated = assert_ok!(
        backend
            .feedback()
            .update_status("f1", FeedbackStatus::Pending)
            .await
    );
    assert_eq!(updated.status, FeedbackStatus::Pending);
}

#[tokio::test]
async fn test_delete_missing_feedback_is_not_found() {
    let backend = TestBackend::signed_in(test_user("u1", "alice", Role::User)).await;
    Mock::given(method("DELETE"))
        .and(path("/feedback/gone"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Feedback not found" })))
        .mount(&backend.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/feedback/f1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&backend.server)
        .await;

    let api = backend.feedback();
    assert_ok!(api.remove("f1").await);
    assert_matches!(api.remove("gone").await, Err(ApiError::NotFound(_)));
}

#[tokio::test]
async fn test_unknown_status_value_is_server_error() {
    let backend = TestBackend::start().await;
    Mock::given(method("GET"))
        .and(path("/feedback"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            feedback_json("f1", "Dark mode", "archived", 0),
        ])))
        .mount(&backend.server)
        .await;

    assert_matches!(backend.feedback().list().await, Err(ApiError::Server(_)));
}

#[tokio::test]
async fn test_blank_submission_is_rejected_locally() {
    let backend = TestBackend::signed_in(test_user("u1", "alice", Role::User)).await;
    Mock::given(method("POST"))
        .and(path("/feedback"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&backend.server)
        .await;

    let result = backend.feedback().create(NewFeedback::new("Title", "   ")).await;
    assert_matches!(result, Err(ApiError::Validation(ref m)) if m == "Please fill all fields");
}
