use axum::{
    extract::Query,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use docuweave_core::models::DocumentKind;
use docuweave_core::templates::{self, DocumentTemplate};

use crate::error::HttpAppError;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct TemplateQuery {
    /// Restrict to one document kind.
    pub document_type: Option<DocumentKind>,
}

#[utoipa::path(
    get,
    path = "/api/v0/templates",
    tag = "templates",
    params(TemplateQuery),
    responses(
        (status = 200, description = "Template catalog (bodies omitted)", body = Vec<DocumentTemplate>)
    )
)]
pub async fn list_templates(
    Query(query): Query<TemplateQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let entries: Vec<&'static DocumentTemplate> = match query.document_type {
        Some(kind) => templates::by_kind(kind),
        None => templates::all().iter().collect(),
    };
    Ok(Json(entries))
}
