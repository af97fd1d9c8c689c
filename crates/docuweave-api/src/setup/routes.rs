//! Route configuration and setup.

use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    response::IntoResponse,
    routing::{get, patch, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use docuweave_core::Config;

use crate::api_doc::ApiDoc;
use crate::constants::API_PREFIX;
use crate::handlers::{
    assistant, business, documents, preview, recipients, requests, templates, uploads,
};
use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Headroom on top of the upload limit for multipart framing and the other
/// form fields.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>> {
    let cors = setup_cors(config)?;

    let api = Router::new()
        .route(
            "/recipients",
            get(recipients::list_recipients).post(recipients::add_recipient),
        )
        .route(
            "/recipients/{id}",
            patch(recipients::update_recipient).delete(recipients::delete_recipient),
        )
        .route(
            "/document-requests",
            get(requests::list_requests).post(requests::create_request),
        )
        .route("/document-requests/{id}", get(requests::get_request))
        .route(
            "/document-requests/{id}/dispatch",
            post(requests::dispatch_request),
        )
        .route(
            "/document-requests/{request_id}/documents/{document_id}",
            get(documents::get_document).patch(documents::review_document),
        )
        .route("/uploads/validate", get(uploads::validate_token))
        .route("/uploads", post(uploads::upload_document))
        .route("/emails/preview", post(preview::preview_email))
        .route("/business-info", post(business::lookup_business))
        .route("/assistant/extract", post(assistant::extract_document))
        .route("/assistant/generate", post(assistant::generate_document))
        .route("/templates", get(templates::list_templates));

    let app = Router::new()
        .route("/health", get(health_check))
        .route("/api/openapi.json", get(openapi_json))
        .merge(utoipa_rapidoc::RapiDoc::new("/api/openapi.json").path("/docs"))
        .nest(API_PREFIX, api)
        .layer(RequestBodyLimitLayer::new(
            config.max_upload_size_bytes() + MULTIPART_OVERHEAD_BYTES,
        ))
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(request_id_middleware))
        .with_state(state);

    Ok(app)
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

fn setup_cors(config: &Config) -> Result<CorsLayer> {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PATCH,
        Method::DELETE,
        Method::OPTIONS,
    ];
    if config.cors_origins().is_empty() {
        return Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any));
    }
    let origins = config
        .cors_origins()
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .map_err(|e| anyhow::anyhow!("Invalid CORS origin '{}': {}", origin, e))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(methods)
        .allow_headers(Any))
}
