use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;

use docuweave_core::models::NewDocumentRequest;
use docuweave_services::EmailPreview;

use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/v0/emails/preview",
    tag = "emails",
    request_body = NewDocumentRequest,
    responses(
        (status = 200, description = "Rendered request email", body = EmailPreview),
        (status = 404, description = "Recipient not found", body = ErrorResponse)
    )
)]
pub async fn preview_email(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<NewDocumentRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    // Previews may carry an empty document list; full validation only applies
    // when a request is actually created.
    let preview = state
        .requests
        .preview(&payload)
        .await
        .map_err(HttpAppError::from)?;
    Ok(Json(preview))
}
