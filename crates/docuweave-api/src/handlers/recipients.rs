use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use docuweave_core::models::{NewRecipient, Recipient, UpdateRecipient};
use docuweave_core::AppError;

use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/v0/recipients",
    tag = "recipients",
    responses(
        (status = 200, description = "List of recipients", body = Vec<Recipient>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_recipients(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let recipients = state.recipients.list().await.map_err(HttpAppError::from)?;
    Ok(Json(recipients))
}

#[utoipa::path(
    post,
    path = "/api/v0/recipients",
    tag = "recipients",
    request_body = NewRecipient,
    responses(
        (status = 201, description = "Recipient created", body = Recipient),
        (status = 400, description = "Invalid input", body = ErrorResponse)
    )
)]
pub async fn add_recipient(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<NewRecipient>,
) -> Result<impl IntoResponse, HttpAppError> {
    payload.validate().map_err(AppError::from)?;

    let recipient = Recipient::new(
        payload.email,
        payload.name,
        payload.organization,
        payload.phone,
    );
    let recipient = state
        .recipients
        .create(recipient)
        .await
        .map_err(HttpAppError::from)?;
    tracing::info!(recipient_id = %recipient.id, "Recipient added");
    Ok((StatusCode::CREATED, Json(recipient)))
}

#[utoipa::path(
    patch,
    path = "/api/v0/recipients/{id}",
    tag = "recipients",
    params(("id" = Uuid, Path, description = "Recipient ID")),
    request_body = UpdateRecipient,
    responses(
        (status = 200, description = "Recipient updated", body = Recipient),
        (status = 404, description = "Recipient not found", body = ErrorResponse)
    )
)]
pub async fn update_recipient(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateRecipient>,
) -> Result<impl IntoResponse, HttpAppError> {
    payload.validate().map_err(AppError::from)?;

    let recipient = state
        .recipients
        .update(id, payload)
        .await
        .map_err(HttpAppError::from)?
        .ok_or_else(|| AppError::NotFound("Recipient not found".to_string()))?;
    Ok(Json(recipient))
}

#[utoipa::path(
    delete,
    path = "/api/v0/recipients/{id}",
    tag = "recipients",
    params(("id" = Uuid, Path, description = "Recipient ID")),
    responses(
        (status = 204, description = "Recipient deleted"),
        (status = 404, description = "Recipient not found", body = ErrorResponse)
    )
)]
pub async fn delete_recipient(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let deleted = state
        .recipients
        .delete(id)
        .await
        .map_err(HttpAppError::from)?;
    if !deleted {
        return Err(AppError::NotFound("Recipient not found".to_string()).into());
    }
    Ok(StatusCode::NO_CONTENT)
}
