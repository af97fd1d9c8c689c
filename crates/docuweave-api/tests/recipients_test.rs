//! Recipient API integration tests.
//!
//! Run with: `cargo test -p docuweave-api --test recipients_test`

mod helpers;

use axum::http::StatusCode;
use serde_json::{json, Value};

use helpers::{api_path, setup_test_app};

#[tokio::test]
async fn test_add_and_list_recipients() {
    let app = setup_test_app();
    let client = app.client();

    let response = client
        .post(&api_path("/recipients"))
        .json(&json!({
            "email": "hong@example.com",
            "name": "홍길동",
            "phone": "010-1234-5678"
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let created = response.json::<Value>();
    assert_eq!(created["email"], "hong@example.com");
    assert!(created["id"].as_str().is_some());

    let response = client.get(&api_path("/recipients")).await;
    response.assert_status_ok();
    let listed = response.json::<Vec<Value>>();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["name"], "홍길동");
}

#[tokio::test]
async fn test_add_recipient_rejects_invalid_email() {
    let app = setup_test_app();
    let response = app
        .client()
        .post(&api_path("/recipients"))
        .json(&json!({ "email": "not-an-email", "name": "홍길동" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(body["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_add_recipient_rejects_missing_name() {
    let app = setup_test_app();
    let response = app
        .client()
        .post(&api_path("/recipients"))
        .json(&json!({ "email": "hong@example.com" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_recipient() {
    let app = setup_test_app();
    let client = app.client();
    let id = helpers::fixtures::create_recipient(client).await;

    let response = client
        .patch(&api_path(&format!("/recipients/{}", id)))
        .json(&json!({ "name": "김철수" }))
        .await;
    response.assert_status_ok();
    let updated = response.json::<Value>();
    assert_eq!(updated["name"], "김철수");
    assert_eq!(updated["email"], "hong@example.com");
}

#[tokio::test]
async fn test_update_unknown_recipient_is_404() {
    let app = setup_test_app();
    let response = app
        .client()
        .patch(&api_path(&format!(
            "/recipients/{}",
            uuid::Uuid::new_v4()
        )))
        .json(&json!({ "name": "없음" }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_recipient() {
    let app = setup_test_app();
    let client = app.client();
    let id = helpers::fixtures::create_recipient(client).await;

    let response = client
        .delete(&api_path(&format!("/recipients/{}", id)))
        .await;
    response.assert_status(StatusCode::NO_CONTENT);

    let response = client
        .delete(&api_path(&format!("/recipients/{}", id)))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}
