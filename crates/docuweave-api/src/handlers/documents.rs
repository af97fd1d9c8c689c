use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use docuweave_core::models::{RequestedDocument, ReviewDecision};
use docuweave_core::AppError;

use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;

/// Reviewer decision payload.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ReviewBody {
    pub status: ReviewDecision,
    pub rejection_reason: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewResponse {
    pub success: bool,
    pub document: RequestedDocument,
}

#[utoipa::path(
    get,
    path = "/api/v0/document-requests/{request_id}/documents/{document_id}",
    tag = "document-requests",
    params(
        ("request_id" = Uuid, Path, description = "Document request ID"),
        ("document_id" = Uuid, Path, description = "Requested document ID")
    ),
    responses(
        (status = 200, description = "Requested document found", body = RequestedDocument),
        (status = 404, description = "Request or document not found", body = ErrorResponse)
    )
)]
pub async fn get_document(
    State(state): State<Arc<AppState>>,
    Path((request_id, document_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, HttpAppError> {
    let document = state
        .requests
        .get_document(request_id, document_id)
        .await
        .map_err(HttpAppError::from)?
        .ok_or_else(|| AppError::NotFound("Requested document not found".to_string()))?;
    Ok(Json(document))
}

#[utoipa::path(
    patch,
    path = "/api/v0/document-requests/{request_id}/documents/{document_id}",
    tag = "document-requests",
    params(
        ("request_id" = Uuid, Path, description = "Document request ID"),
        ("document_id" = Uuid, Path, description = "Requested document ID")
    ),
    request_body = ReviewBody,
    responses(
        (status = 200, description = "Decision recorded", body = ReviewResponse),
        (status = 400, description = "Missing rejection reason", body = ErrorResponse),
        (status = 404, description = "Request or document not found", body = ErrorResponse)
    )
)]
pub async fn review_document(
    State(state): State<Arc<AppState>>,
    Path((request_id, document_id)): Path<(Uuid, Uuid)>,
    ValidatedJson(body): ValidatedJson<ReviewBody>,
) -> Result<impl IntoResponse, HttpAppError> {
    let document = state
        .requests
        .review(request_id, document_id, body.status, body.rejection_reason)
        .await
        .map_err(HttpAppError::from)?;
    Ok(Json(ReviewResponse {
        success: true,
        document,
    }))
}
