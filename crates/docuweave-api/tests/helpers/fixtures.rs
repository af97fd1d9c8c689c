//! Shared fixtures for integration tests.

#![allow(dead_code)]

use axum_test::TestServer;
use serde_json::{json, Value};

use super::api_path;

/// Smallest valid PNG (1x1 transparent pixel).
pub fn minimal_png() -> Vec<u8> {
    vec![
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48,
        0x44, 0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00,
        0x00, 0x1F, 0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78,
        0x9C, 0x62, 0x00, 0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00,
        0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ]
}

/// Register a recipient, returning its id.
pub async fn create_recipient(server: &TestServer) -> String {
    let response = server
        .post(&api_path("/recipients"))
        .json(&json!({
            "email": "hong@example.com",
            "name": "홍길동",
            "organization": "길동상사"
        }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()["id"]
        .as_str()
        .expect("recipient id")
        .to_string()
}

/// Create a document request (required 사업자등록증 + optional 포트폴리오),
/// dispatching in the same call. Returns the response JSON.
pub async fn create_dispatched_request(server: &TestServer, recipient_id: &str) -> Value {
    let response = server
        .post(&api_path("/document-requests"))
        .json(&json!({
            "recipient_id": recipient_id,
            "project_name": "웹사이트 리뉴얼",
            "company_name": "길동상사",
            "documents": [
                { "name": "사업자등록증", "required": true },
                { "name": "포트폴리오", "required": false }
            ],
            "send_email": true
        }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}
