use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;

use docuweave_core::models::{BusinessLookupRequest, BusinessStatusResponse};

use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/api/v0/business-info",
    tag = "business",
    request_body = BusinessLookupRequest,
    responses(
        (status = 200, description = "Registry status, passed through unmodified", body = BusinessStatusResponse),
        (status = 400, description = "Malformed registration number", body = ErrorResponse),
        (status = 401, description = "Registry rejected the API key", body = ErrorResponse),
        (status = 429, description = "Registry rate limit exceeded", body = ErrorResponse),
        (status = 502, description = "Registry unreachable", body = ErrorResponse)
    )
)]
pub async fn lookup_business(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<BusinessLookupRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let response = state
        .business
        .lookup(&payload.business_number)
        .await
        .map_err(HttpAppError::from)?;
    Ok(Json(response))
}
