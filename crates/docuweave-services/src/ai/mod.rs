//! Generative-model assistant.
//!
//! Two operations ride the same model API: multimodal extraction of
//! structured data from uploaded receipts/invoices, and template-based
//! generation of business documents. The client is a trait so the HTTP layer
//! can be exercised against a mock.

mod gemini;
pub mod usage;

use async_trait::async_trait;
use serde::Deserialize;
use utoipa::ToSchema;

use docuweave_core::models::{DocumentKind, ExtractedDocument, GeneratedDocument, TokenUsage};
use docuweave_core::templates::{ClientData, ProjectData};
use docuweave_core::AppError;

pub use gemini::GeminiClient;

/// Inputs for document generation.
#[derive(Debug, Deserialize, ToSchema)]
pub struct GenerateRequest {
    pub document_type: DocumentKind,
    /// Catalog template id; the kind's standard template when omitted.
    pub template_id: Option<String>,
    /// Free-text project information for the model.
    pub prompt: String,
    #[serde(default)]
    pub client_data: ClientData,
    #[serde(default)]
    pub project_data: ProjectData,
}

/// Extraction output plus usage accounting.
#[derive(Debug, serde::Serialize, ToSchema)]
pub struct ExtractionResult {
    pub data: ExtractedDocument,
    pub model: String,
    pub token_usage: TokenUsage,
}

/// Generation output plus usage accounting.
#[derive(Debug, serde::Serialize, ToSchema)]
pub struct GenerationResult {
    pub data: GeneratedDocument,
    pub token_usage: TokenUsage,
}

/// Model API seam used by the assistant endpoints.
#[async_trait]
pub trait AssistantClient: Send + Sync {
    /// Extract structured data from an uploaded artifact.
    ///
    /// A model answer that is not parseable JSON yields the graceful
    /// fallback, not an error; only transport/API failures error out.
    async fn extract_document(
        &self,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<ExtractionResult, AppError>;

    /// Generate a business document from a catalog template and project data.
    async fn generate_document(
        &self,
        request: GenerateRequest,
    ) -> Result<GenerationResult, AppError>;
}
