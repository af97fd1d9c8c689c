use axum::{
    extract::{Multipart, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use docuweave_core::AppError;
use docuweave_services::ai::{ExtractionResult, GenerateRequest, GenerationResult};

use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use crate::validation::UploadValidator;

#[utoipa::path(
    post,
    path = "/api/v0/assistant/extract",
    tag = "assistant",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Structured data extracted (best-effort fallback on unparseable answers)", body = ExtractionResult),
        (status = 400, description = "Missing file", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 415, description = "Unsupported media type", body = ErrorResponse),
        (status = 502, description = "Model call failed", body = ErrorResponse)
    )
)]
pub async fn extract_document(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let mut file: Option<(String, String, Vec<u8>)> = None;
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        HttpAppError::from(AppError::Validation(format!(
            "Invalid multipart body: {}",
            e
        )))
    })? {
        let name = field.name().map(|s| s.to_string());
        if name.as_deref() == Some("file") {
            let filename = field.file_name().unwrap_or("upload").to_string();
            let content_type = field.content_type().unwrap_or("").to_string();
            let data = field.bytes().await.map_err(|e| {
                HttpAppError::from(AppError::Validation(format!(
                    "Invalid multipart body: {}",
                    e
                )))
            })?;
            file = Some((filename, content_type, data.to_vec()));
        }
    }
    let (filename, content_type, data) =
        file.ok_or_else(|| AppError::Validation("Missing 'file' field".to_string()))?;

    // Extraction inputs follow the same upload policy as document uploads.
    let policy = &state.uploads;
    let validator = UploadValidator::new(
        policy.max_file_size,
        &policy.allowed_extensions,
        &policy.allowed_content_types,
    );
    validator
        .validate_all(&filename, &content_type, data.len())
        .map_err(HttpAppError::from)?;

    let result = state
        .assistant
        .extract_document(data, &content_type)
        .await
        .map_err(HttpAppError::from)?;
    Ok(Json(result))
}

#[utoipa::path(
    post,
    path = "/api/v0/assistant/generate",
    tag = "assistant",
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "Generated document", body = GenerationResult),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 502, description = "Model call failed", body = ErrorResponse)
    )
)]
pub async fn generate_document(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<GenerateRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    if payload.prompt.trim().is_empty() {
        return Err(AppError::Validation("'prompt' must not be empty".to_string()).into());
    }
    let result = state
        .assistant
        .generate_document(payload)
        .await
        .map_err(HttpAppError::from)?;
    Ok(Json(result))
}
