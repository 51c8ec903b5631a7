//! Published recipients and batch marking integration tests.
//!
//! Run with: `cargo test -p postroom-api --test published_test`
//! Requires Docker for testcontainers (Postgres).

mod helpers;

use helpers::auth::seed_user;
use helpers::fixtures::recipient_form;
use helpers::{api_path, setup_test_app};
use serde_json::{json, Value};

async fn create_recipient(app: &helpers::TestApp, token: &str, name: &str, pages: usize) -> Value {
    let response = app
        .client()
        .post(&api_path("/recipients"))
        .add_header("Authorization", format!("Bearer {}", token))
        .multipart(recipient_form(name, pages))
        .await;
    assert_eq!(response.status_code(), 201);
    response.json()
}

#[tokio::test]
async fn test_published_buckets_paginate_independently() {
    let app = setup_test_app().await;
    let user = seed_user(&app.pool, "Ana Lima", "ana@example.com").await;

    for i in 0..7 {
        create_recipient(&app, &user.token, &format!("Curto {}", i), 3).await;
    }
    for i in 0..3 {
        create_recipient(&app, &user.token, &format!("Longo {}", i), 12).await;
    }

    let response = app
        .client()
        .get(&api_path("/recipients/published"))
        .add_query_param("per_page", "5")
        .add_header("Authorization", format!("Bearer {}", user.token))
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();

    let env = &body["self_envelopment"];
    assert_eq!(env["total"], 7);
    assert_eq!(env["last_page"], 2);
    assert_eq!(env["current_page"], 1);
    assert_eq!(env["data"].as_array().map(Vec::len), Some(5));

    let ins = &body["insertion"];
    assert_eq!(ins["total"], 3);
    assert_eq!(ins["last_page"], 1);
    assert_eq!(ins["data"].as_array().map(Vec::len), Some(3));

    // Owner's display name is joined into every published row.
    assert_eq!(env["data"][0]["user_name"], "Ana Lima");
    assert_eq!(ins["data"][0]["finish_type"], "insertion");
}

#[tokio::test]
async fn test_published_second_page() {
    let app = setup_test_app().await;
    let user = seed_user(&app.pool, "Ana Lima", "ana@example.com").await;

    for i in 0..7 {
        create_recipient(&app, &user.token, &format!("Curto {}", i), 3).await;
    }

    let response = app
        .client()
        .get(&api_path("/recipients/published"))
        .add_query_param("per_page", "5")
        .add_query_param("self_envelopment_page", "2")
        .add_header("Authorization", format!("Bearer {}", user.token))
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();

    let env = &body["self_envelopment"];
    assert_eq!(env["current_page"], 2);
    assert_eq!(env["data"].as_array().map(Vec::len), Some(2));
    assert_eq!(env["total"], 7);
}

#[tokio::test]
async fn test_batched_recipients_leave_published_lists() {
    let app = setup_test_app().await;
    let user = seed_user(&app.pool, "Ana Lima", "ana@example.com").await;

    let first = create_recipient(&app, &user.token, "Primeiro", 3).await;
    let second = create_recipient(&app, &user.token, "Segundo", 3).await;
    let ids = [
        first["id"].as_str().expect("first id"),
        second["id"].as_str().expect("second id"),
    ];

    let response = app
        .client()
        .post(&api_path("/recipients/batch"))
        .add_header("Authorization", format!("Bearer {}", user.token))
        .json(&json!({ "recipient_ids": ids }))
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["updated"], 2);

    let response = app
        .client()
        .get(&api_path("/recipients/published"))
        .add_header("Authorization", format!("Bearer {}", user.token))
        .await;
    let body: Value = response.json();
    assert_eq!(body["self_envelopment"]["total"], 0);

    // Marking again is a no-op, not an error.
    let response = app
        .client()
        .post(&api_path("/recipients/batch"))
        .add_header("Authorization", format!("Bearer {}", user.token))
        .json(&json!({ "recipient_ids": ids }))
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["updated"], 0);
}

#[tokio::test]
async fn test_batch_with_unknown_ids_counts_only_updates() {
    let app = setup_test_app().await;
    let user = seed_user(&app.pool, "Ana Lima", "ana@example.com").await;

    let first = create_recipient(&app, &user.token, "Existente", 3).await;
    let ids = [
        first["id"].as_str().expect("first id").to_string(),
        uuid::Uuid::new_v4().to_string(),
    ];

    let response = app
        .client()
        .post(&api_path("/recipients/batch"))
        .add_header("Authorization", format!("Bearer {}", user.token))
        .json(&json!({ "recipient_ids": ids }))
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["updated"], 1);
}

#[tokio::test]
async fn test_batch_rejects_empty_id_list() {
    let app = setup_test_app().await;
    let user = seed_user(&app.pool, "Ana Lima", "ana@example.com").await;

    let response = app
        .client()
        .post(&api_path("/recipients/batch"))
        .add_header("Authorization", format!("Bearer {}", user.token))
        .json(&json!({ "recipient_ids": [] }))
        .await;

    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_batch_rejects_malformed_ids() {
    let app = setup_test_app().await;
    let user = seed_user(&app.pool, "Ana Lima", "ana@example.com").await;

    let response = app
        .client()
        .post(&api_path("/recipients/batch"))
        .add_header("Authorization", format!("Bearer {}", user.token))
        .json(&json!({ "recipient_ids": ["not-a-uuid"] }))
        .await;

    assert_eq!(response.status_code(), 400);
}
