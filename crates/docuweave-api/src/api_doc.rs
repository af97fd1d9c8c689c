//! OpenAPI documentation assembly.

use utoipa::OpenApi;

use crate::error::ErrorResponse;
use crate::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Docuweave API",
        description = "Business-document assistant: document requests with token-gated uploads, template-based document generation, data extraction, and business registration lookup."
    ),
    paths(
        handlers::recipients::list_recipients,
        handlers::recipients::add_recipient,
        handlers::recipients::update_recipient,
        handlers::recipients::delete_recipient,
        handlers::requests::create_request,
        handlers::requests::list_requests,
        handlers::requests::get_request,
        handlers::requests::dispatch_request,
        handlers::documents::get_document,
        handlers::documents::review_document,
        handlers::uploads::validate_token,
        handlers::uploads::upload_document,
        handlers::preview::preview_email,
        handlers::business::lookup_business,
        handlers::assistant::extract_document,
        handlers::assistant::generate_document,
        handlers::templates::list_templates,
    ),
    components(schemas(
        ErrorResponse,
        docuweave_core::models::Recipient,
        docuweave_core::models::NewRecipient,
        docuweave_core::models::UpdateRecipient,
        docuweave_core::models::DocumentRequest,
        docuweave_core::models::RequestedDocument,
        docuweave_core::models::DocumentStatus,
        docuweave_core::models::RequestStatus,
        docuweave_core::models::ReviewDecision,
        docuweave_core::models::NewDocumentRequest,
        docuweave_core::models::NewRequestedDocument,
        docuweave_core::models::UploadSession,
        docuweave_core::models::BusinessLookupRequest,
        docuweave_core::models::BusinessStatusResponse,
        docuweave_core::models::BusinessStatusItem,
        docuweave_core::models::DocumentKind,
        docuweave_core::models::ExtractedDocument,
        docuweave_core::models::ExtractedItem,
        docuweave_core::models::GeneratedDocument,
        docuweave_core::models::TokenUsage,
        docuweave_core::templates::DocumentTemplate,
        docuweave_core::templates::ClientData,
        docuweave_core::templates::ProjectData,
        docuweave_services::DispatchOutcome,
        docuweave_services::EmailPreview,
        docuweave_services::PreviewRecipient,
        docuweave_services::ai::GenerateRequest,
        docuweave_services::ai::ExtractionResult,
        docuweave_services::ai::GenerationResult,
        handlers::requests::CreateRequestBody,
        handlers::requests::CreateRequestResponse,
        handlers::documents::ReviewBody,
        handlers::documents::ReviewResponse,
        handlers::uploads::UploadResponse,
    )),
    tags(
        (name = "recipients", description = "Recipient management"),
        (name = "document-requests", description = "Document request workflow"),
        (name = "uploads", description = "Token-gated document uploads"),
        (name = "emails", description = "Notification previews"),
        (name = "business", description = "Business registration lookup"),
        (name = "assistant", description = "Model-backed extraction and generation"),
        (name = "templates", description = "Document template catalog"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::OpenApi;

    #[test]
    fn test_openapi_spec_builds() {
        let spec = ApiDoc::openapi();
        let json = serde_json::to_string(&spec).expect("spec serializes");
        assert!(json.contains("/api/v0/document-requests"));
        assert!(json.contains("/api/v0/uploads"));
    }
}
