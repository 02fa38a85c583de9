//! Web API task tests.
//!
//! Integration tests for the ownership-filtered task CRUD endpoints.

mod common;

use axum::http::{header::AUTHORIZATION, StatusCode};
use serde_json::{json, Value};

use common::{bearer, create_test_server, register_and_login, GOOD_PASSWORD};

async fn create_task(
    server: &axum_test::TestServer,
    token: &str,
    title: &str,
    shared: bool,
) -> Value {
    let response = server
        .post("/api/tasks")
        .add_header(AUTHORIZATION, bearer(token))
        .json(&json!({ "title": title, "shared": shared }))
        .await;
    response.assert_status_ok();
    response.json()
}

#[tokio::test]
async fn test_create_task() {
    let server = create_test_server().await;
    let token = register_and_login(&server, "alice", GOOD_PASSWORD).await;

    let task = create_task(&server, &token, "write report", false).await;

    assert!(task["id"].is_i64());
    assert_eq!(task["title"], "write report");
    assert_eq!(task["completed"], false);
    assert_eq!(task["shared"], false);
}

#[tokio::test]
async fn test_create_task_rejects_empty_title() {
    let server = create_test_server().await;
    let token = register_and_login(&server, "alice", GOOD_PASSWORD).await;

    let response = server
        .post("/api/tasks")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({ "title": "" }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_create_task_requires_auth() {
    let server = create_test_server().await;

    let response = server
        .post("/api/tasks")
        .json(&json!({ "title": "sneaky" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_includes_own_and_shared_tasks() {
    let server = create_test_server().await;
    let alice = register_and_login(&server, "alice", GOOD_PASSWORD).await;
    let bob = register_and_login(&server, "bob", GOOD_PASSWORD).await;

    create_task(&server, &alice, "alice private", false).await;
    create_task(&server, &bob, "bob private", false).await;
    create_task(&server, &bob, "bob shared", true).await;

    let response = server
        .get("/api/tasks")
        .add_header(AUTHORIZATION, bearer(&alice))
        .await;
    response.assert_status_ok();

    let tasks: Value = response.json();
    let titles: Vec<&str> = tasks
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();

    assert!(titles.contains(&"alice private"));
    assert!(titles.contains(&"bob shared"));
    assert!(!titles.contains(&"bob private"));
}

#[tokio::test]
async fn test_list_orders_newest_first() {
    let server = create_test_server().await;
    let token = register_and_login(&server, "alice", GOOD_PASSWORD).await;

    create_task(&server, &token, "first", false).await;
    create_task(&server, &token, "second", false).await;

    let tasks: Value = server
        .get("/api/tasks")
        .add_header(AUTHORIZATION, bearer(&token))
        .await
        .json();

    let titles: Vec<&str> = tasks
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();

    assert_eq!(titles, vec!["second", "first"]);
}

#[tokio::test]
async fn test_complete_own_task() {
    let server = create_test_server().await;
    let token = register_and_login(&server, "alice", GOOD_PASSWORD).await;

    let task = create_task(&server, &token, "finish me", false).await;
    let id = task["id"].as_i64().unwrap();

    let response = server
        .patch(&format!("/api/tasks/{id}"))
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({ "completed": true }))
        .await;
    response.assert_status_ok();

    let tasks: Value = server
        .get("/api/tasks")
        .add_header(AUTHORIZATION, bearer(&token))
        .await
        .json();
    assert_eq!(tasks[0]["completed"], true);
}

#[tokio::test]
async fn test_cannot_modify_another_users_task() {
    let server = create_test_server().await;
    let alice = register_and_login(&server, "alice", GOOD_PASSWORD).await;
    let bob = register_and_login(&server, "bob", GOOD_PASSWORD).await;

    // Even a shared task can only be modified by its owner
    let task = create_task(&server, &alice, "alice shared", true).await;
    let id = task["id"].as_i64().unwrap();

    let response = server
        .patch(&format!("/api/tasks/{id}"))
        .add_header(AUTHORIZATION, bearer(&bob))
        .json(&json!({ "completed": true }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    let response = server
        .delete(&format!("/api/tasks/{id}"))
        .add_header(AUTHORIZATION, bearer(&bob))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_own_task() {
    let server = create_test_server().await;
    let token = register_and_login(&server, "alice", GOOD_PASSWORD).await;

    let task = create_task(&server, &token, "remove me", false).await;
    let id = task["id"].as_i64().unwrap();

    let response = server
        .delete(&format!("/api/tasks/{id}"))
        .add_header(AUTHORIZATION, bearer(&token))
        .await;
    response.assert_status_ok();

    let tasks: Value = server
        .get("/api/tasks")
        .add_header(AUTHORIZATION, bearer(&token))
        .await
        .json();
    assert!(tasks.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_missing_task() {
    let server = create_test_server().await;
    let token = register_and_login(&server, "alice", GOOD_PASSWORD).await;

    let response = server
        .delete("/api/tasks/9999")
        .add_header(AUTHORIZATION, bearer(&token))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}
