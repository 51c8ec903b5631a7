//! Recipient API integration tests.
//!
//! Run with: `cargo test -p postroom-api --test recipients_test`
//! Requires Docker for testcontainers (Postgres).

mod helpers;

use helpers::auth::seed_user;
use helpers::fixtures::{address_form, recipient_form};
use helpers::{api_path, setup_test_app};
use serde_json::Value;

#[tokio::test]
async fn test_create_recipient_with_short_document() {
    let app = setup_test_app().await;
    let user = seed_user(&app.pool, "Maria Souza", "maria@example.com").await;

    let response = app
        .client()
        .post(&api_path("/recipients"))
        .add_header("Authorization", format!("Bearer {}", user.token))
        .multipart(recipient_form("Ana Lima", 3))
        .await;

    assert_eq!(response.status_code(), 201);
    let body: Value = response.json();
    assert_eq!(body["name"], "Ana Lima");
    assert_eq!(body["street"], "Avenida Paulista");
    assert_eq!(body["postal_code"], "01310200");
    assert_eq!(body["file_pages"], 3);
    assert_eq!(body["finish_type"], "self_envelopment");
    assert_eq!(body["in_batch"], false);
    assert_eq!(body["user_id"], user.user_id.to_string());
}

#[tokio::test]
async fn test_create_recipient_with_long_document() {
    let app = setup_test_app().await;
    let user = seed_user(&app.pool, "Maria Souza", "maria@example.com").await;

    let response = app
        .client()
        .post(&api_path("/recipients"))
        .add_header("Authorization", format!("Bearer {}", user.token))
        .multipart(recipient_form("Carlos Dias", 12))
        .await;

    assert_eq!(response.status_code(), 201);
    let body: Value = response.json();
    assert_eq!(body["file_pages"], 12);
    assert_eq!(body["finish_type"], "insertion");
}

#[tokio::test]
async fn test_five_page_document_is_still_self_envelopment() {
    let app = setup_test_app().await;
    let user = seed_user(&app.pool, "Maria Souza", "maria@example.com").await;

    let response = app
        .client()
        .post(&api_path("/recipients"))
        .add_header("Authorization", format!("Bearer {}", user.token))
        .multipart(recipient_form("Limite Exato", 5))
        .await;

    assert_eq!(response.status_code(), 201);
    let body: Value = response.json();
    assert_eq!(body["finish_type"], "self_envelopment");
}

#[tokio::test]
async fn test_create_requires_document() {
    let app = setup_test_app().await;
    let user = seed_user(&app.pool, "Maria Souza", "maria@example.com").await;

    let response = app
        .client()
        .post(&api_path("/recipients"))
        .add_header("Authorization", format!("Bearer {}", user.token))
        .multipart(address_form("Sem Documento"))
        .await;

    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_create_rejects_non_pdf_upload() {
    let app = setup_test_app().await;
    let user = seed_user(&app.pool, "Maria Souza", "maria@example.com").await;

    let part = axum_test::multipart::Part::bytes(b"not a pdf".to_vec())
        .file_name("notes.txt")
        .mime_type("text/plain");
    let form = address_form("Tipo Errado").add_part("file", part);

    let response = app
        .client()
        .post(&api_path("/recipients"))
        .add_header("Authorization", format!("Bearer {}", user.token))
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_get_recipient_not_found() {
    let app = setup_test_app().await;
    let user = seed_user(&app.pool, "Maria Souza", "maria@example.com").await;

    let response = app
        .client()
        .get(&api_path(&format!("/recipients/{}", uuid::Uuid::new_v4())))
        .add_header("Authorization", format!("Bearer {}", user.token))
        .await;

    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_list_recipients_scoped_to_owner() {
    let app = setup_test_app().await;
    let owner = seed_user(&app.pool, "Maria Souza", "maria@example.com").await;
    let other = seed_user(&app.pool, "Jorge Prado", "jorge@example.com").await;

    for name in ["Primeiro", "Segundo"] {
        let response = app
            .client()
            .post(&api_path("/recipients"))
            .add_header("Authorization", format!("Bearer {}", owner.token))
            .multipart(recipient_form(name, 2))
            .await;
        assert_eq!(response.status_code(), 201);
    }
    let response = app
        .client()
        .post(&api_path("/recipients"))
        .add_header("Authorization", format!("Bearer {}", other.token))
        .multipart(recipient_form("Terceiro", 2))
        .await;
    assert_eq!(response.status_code(), 201);

    let response = app
        .client()
        .get(&api_path("/recipients"))
        .add_header("Authorization", format!("Bearer {}", owner.token))
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["total"], 2);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(2));

    let response = app
        .client()
        .get(&api_path("/recipients"))
        .add_header("Authorization", format!("Bearer {}", other.token))
        .await;
    let body: Value = response.json();
    assert_eq!(body["total"], 1);
}

#[tokio::test]
async fn test_update_address_keeps_document() {
    let app = setup_test_app().await;
    let user = seed_user(&app.pool, "Maria Souza", "maria@example.com").await;

    let created: Value = app
        .client()
        .post(&api_path("/recipients"))
        .add_header("Authorization", format!("Bearer {}", user.token))
        .multipart(recipient_form("Nome Antigo", 3))
        .await
        .json();
    let id = created["id"].as_str().expect("created id").to_string();

    let response = app
        .client()
        .put(&api_path(&format!("/recipients/{}", id)))
        .add_header("Authorization", format!("Bearer {}", user.token))
        .multipart(address_form("Nome Novo"))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["name"], "Nome Novo");
    assert_eq!(body["file_pages"], 3);
    assert_eq!(body["finish_type"], "self_envelopment");
    assert_eq!(body["file_path"], created["file_path"]);
}

#[tokio::test]
async fn test_update_with_new_document_reclassifies() {
    let app = setup_test_app().await;
    let user = seed_user(&app.pool, "Maria Souza", "maria@example.com").await;

    let created: Value = app
        .client()
        .post(&api_path("/recipients"))
        .add_header("Authorization", format!("Bearer {}", user.token))
        .multipart(recipient_form("Ana Lima", 3))
        .await
        .json();
    let id = created["id"].as_str().expect("created id").to_string();

    let response = app
        .client()
        .put(&api_path(&format!("/recipients/{}", id)))
        .add_header("Authorization", format!("Bearer {}", user.token))
        .multipart(recipient_form("Ana Lima", 12))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["file_pages"], 12);
    assert_eq!(body["finish_type"], "insertion");
    assert_ne!(body["file_path"], created["file_path"]);

    // The replaced document is removed from storage once the row is committed.
    let old_path = created["file_path"].as_str().expect("old file path");
    assert!(!app._temp_dir.path().join(old_path).exists());
}

#[tokio::test]
async fn test_delete_recipient() {
    let app = setup_test_app().await;
    let user = seed_user(&app.pool, "Maria Souza", "maria@example.com").await;

    let created: Value = app
        .client()
        .post(&api_path("/recipients"))
        .add_header("Authorization", format!("Bearer {}", user.token))
        .multipart(recipient_form("Para Remover", 3))
        .await
        .json();
    let id = created["id"].as_str().expect("created id").to_string();

    let response = app
        .client()
        .delete(&api_path(&format!("/recipients/{}", id)))
        .add_header("Authorization", format!("Bearer {}", user.token))
        .await;
    assert_eq!(response.status_code(), 204);

    let response = app
        .client()
        .get(&api_path(&format!("/recipients/{}", id)))
        .add_header("Authorization", format!("Bearer {}", user.token))
        .await;
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_download_recipient_document() {
    let app = setup_test_app().await;
    let user = seed_user(&app.pool, "Maria Souza", "maria@example.com").await;

    let created: Value = app
        .client()
        .post(&api_path("/recipients"))
        .add_header("Authorization", format!("Bearer {}", user.token))
        .multipart(recipient_form("Com Anexo", 3))
        .await
        .json();
    let id = created["id"].as_str().expect("created id").to_string();

    let response = app
        .client()
        .get(&api_path(&format!("/recipients/{}/file", id)))
        .add_header("Authorization", format!("Bearer {}", user.token))
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.header("content-type"), "application/pdf");
    // Round-trip: the stored bytes are still a readable 3-page PDF.
    let doc = lopdf::Document::load_mem(response.as_bytes()).expect("stored PDF parses");
    assert_eq!(doc.get_pages().len(), 3);
}

#[tokio::test]
async fn test_missing_authorization_header_rejected() {
    let app = setup_test_app().await;

    let response = app.client().get(&api_path("/recipients")).await;

    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn test_unknown_access_key_rejected() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .get(&api_path("/recipients"))
        .add_header(
            "Authorization",
            format!("Bearer pr_live_{}", "f".repeat(40)),
        )
        .await;

    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn test_repeated_auth_failures_are_rate_limited() {
    let app = setup_test_app().await;

    for _ in 0..9 {
        let response = app
            .client()
            .get(&api_path("/recipients"))
            .add_header(
                "Authorization",
                format!("Bearer pr_live_{}", "0".repeat(40)),
            )
            .await;
        assert_eq!(response.status_code(), 401);
    }

    let response = app
        .client()
        .get(&api_path("/recipients"))
        .add_header(
            "Authorization",
            format!("Bearer pr_live_{}", "0".repeat(40)),
        )
        .await;
    assert_eq!(response.status_code(), 429);
}

#[tokio::test]
async fn test_health_and_docs_are_public() {
    let app = setup_test_app().await;

    assert_eq!(app.client().get("/live").await.status_code(), 200);
    assert_eq!(app.client().get("/ready").await.status_code(), 200);
    assert_eq!(app.client().get("/health").await.status_code(), 200);

    let spec = app.client().get("/api/openapi.json").await;
    assert_eq!(spec.status_code(), 200);
    let body: Value = spec.json();
    assert!(body["paths"]["/api/v0/recipients"].is_object());
}
