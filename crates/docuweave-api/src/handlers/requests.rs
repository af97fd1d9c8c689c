use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use docuweave_core::models::{DocumentRequest, NewDocumentRequest};
use docuweave_core::AppError;
use docuweave_services::DispatchOutcome;

use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;

fn default_send_email() -> bool {
    true
}

/// Creation payload; `send_email` dispatches the request in the same call.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRequestBody {
    #[serde(flatten)]
    pub request: NewDocumentRequest,
    #[serde(default = "default_send_email")]
    pub send_email: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateRequestResponse {
    pub document_request: DocumentRequest,
    pub email_sent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload_token: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/v0/document-requests",
    tag = "document-requests",
    request_body = CreateRequestBody,
    responses(
        (status = 201, description = "Document request created", body = CreateRequestResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 502, description = "Notification dispatch failed", body = ErrorResponse)
    )
)]
pub async fn create_request(
    State(state): State<Arc<AppState>>,
    ValidatedJson(body): ValidatedJson<CreateRequestBody>,
) -> Result<impl IntoResponse, HttpAppError> {
    let request = state
        .requests
        .create_request(body.request)
        .await
        .map_err(HttpAppError::from)?;

    let mut email_sent = false;
    let mut upload_token = None;
    if body.send_email {
        let outcome = state
            .requests
            .dispatch(request.id)
            .await
            .map_err(HttpAppError::from)?;
        email_sent = outcome.notified;
        upload_token = Some(outcome.token);
    }

    // Re-read so the response carries the post-dispatch status.
    let document_request = state
        .requests
        .get(request.id)
        .await
        .map_err(HttpAppError::from)?
        .unwrap_or(request);

    Ok((
        StatusCode::CREATED,
        Json(CreateRequestResponse {
            document_request,
            email_sent,
            upload_token,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v0/document-requests",
    tag = "document-requests",
    responses(
        (status = 200, description = "All document requests in creation order", body = Vec<DocumentRequest>)
    )
)]
pub async fn list_requests(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let requests = state.requests.list().await.map_err(HttpAppError::from)?;
    Ok(Json(requests))
}

#[utoipa::path(
    get,
    path = "/api/v0/document-requests/{id}",
    tag = "document-requests",
    params(("id" = Uuid, Path, description = "Document request ID")),
    responses(
        (status = 200, description = "Document request found", body = DocumentRequest),
        (status = 404, description = "Document request not found", body = ErrorResponse)
    )
)]
pub async fn get_request(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let request = state
        .requests
        .get(id)
        .await
        .map_err(HttpAppError::from)?
        .ok_or_else(|| AppError::NotFound("Document request not found".to_string()))?;
    Ok(Json(request))
}

#[utoipa::path(
    post,
    path = "/api/v0/document-requests/{id}/dispatch",
    tag = "document-requests",
    params(("id" = Uuid, Path, description = "Document request ID")),
    responses(
        (status = 200, description = "Request dispatched", body = DispatchOutcome),
        (status = 404, description = "Document request not found", body = ErrorResponse),
        (status = 502, description = "Notification dispatch failed", body = ErrorResponse)
    )
)]
pub async fn dispatch_request(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let outcome = state
        .requests
        .dispatch(id)
        .await
        .map_err(HttpAppError::from)?;
    Ok(Json(outcome))
}
