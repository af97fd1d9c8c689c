use axum::{
    extract::{Multipart, Query, State},
    response::IntoResponse,
    Json,
};
use bytes::Bytes;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use docuweave_core::models::{RequestedDocument, UploadSession};
use docuweave_core::AppError;

use crate::constants::UPLOADS_PUBLIC_PREFIX;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::validation::{sanitize_filename, UploadValidator};

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct TokenQuery {
    pub token: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    pub success: bool,
    pub url: String,
    pub document: RequestedDocument,
}

#[utoipa::path(
    get,
    path = "/api/v0/uploads/validate",
    tag = "uploads",
    params(TokenQuery),
    responses(
        (status = 200, description = "Token resolves to a request summary", body = UploadSession),
        (status = 401, description = "Token absent, expired, or used", body = ErrorResponse)
    )
)]
pub async fn validate_token(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TokenQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let session = state
        .requests
        .validate_token(&query.token)
        .await
        .map_err(HttpAppError::from)?;
    Ok(Json(session))
}

#[utoipa::path(
    post,
    path = "/api/v0/uploads",
    tag = "uploads",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Artifact stored and document marked uploaded", body = UploadResponse),
        (status = 400, description = "Missing fields", body = ErrorResponse),
        (status = 401, description = "Invalid upload token", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 415, description = "Unsupported media type", body = ErrorResponse)
    )
)]
pub async fn upload_document(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let mut token: Option<String> = None;
    let mut document_id: Option<String> = None;
    let mut file: Option<(String, String, Bytes)> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        HttpAppError::from(AppError::Validation(format!(
            "Invalid multipart body: {}",
            e
        )))
    })? {
        let name = field.name().map(|s| s.to_string());
        match name.as_deref() {
            Some("token") => {
                token = Some(field.text().await.map_err(multipart_error)?);
            }
            Some("document_id") => {
                document_id = Some(field.text().await.map_err(multipart_error)?);
            }
            Some("file") => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let content_type = field.content_type().unwrap_or("").to_string();
                let data = field.bytes().await.map_err(multipart_error)?;
                file = Some((filename, content_type, data));
            }
            _ => {}
        }
    }

    let token =
        token.ok_or_else(|| AppError::Validation("Missing 'token' field".to_string()))?;
    let document_id: Uuid = document_id
        .ok_or_else(|| AppError::Validation("Missing 'document_id' field".to_string()))?
        .parse()
        .map_err(|_| AppError::Validation("'document_id' must be a UUID".to_string()))?;
    let (filename, content_type, data) =
        file.ok_or_else(|| AppError::Validation("Missing 'file' field".to_string()))?;

    // Token first, then the upload policy; nothing touches storage before
    // both checks pass.
    state
        .requests
        .validate_token(&token)
        .await
        .map_err(HttpAppError::from)?;

    let policy = &state.uploads;
    let validator = UploadValidator::new(
        policy.max_file_size,
        &policy.allowed_extensions,
        &policy.allowed_content_types,
    );
    validator
        .validate_all(&filename, &content_type, data.len())
        .map_err(HttpAppError::from)?;

    let stored_name = format!(
        "{}-{}",
        Utc::now().timestamp_millis(),
        sanitize_filename(&filename)
    );
    tokio::fs::create_dir_all(&policy.upload_dir)
        .await
        .map_err(AppError::from)?;
    tokio::fs::write(policy.upload_dir.join(&stored_name), &data)
        .await
        .map_err(AppError::from)?;

    let url = format!("{}/{}", UPLOADS_PUBLIC_PREFIX, stored_name);
    let document = state
        .requests
        .record_upload(&token, document_id, url.clone())
        .await
        .map_err(HttpAppError::from)?;

    tracing::info!(
        document_id = %document_id,
        stored_name = %stored_name,
        size = data.len(),
        "Upload stored"
    );
    Ok(Json(UploadResponse {
        success: true,
        url,
        document,
    }))
}

fn multipart_error(err: axum::extract::multipart::MultipartError) -> HttpAppError {
    HttpAppError::from(AppError::Validation(format!(
        "Invalid multipart body: {}",
        err
    )))
}
