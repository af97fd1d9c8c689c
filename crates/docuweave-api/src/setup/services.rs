//! Service and repository wiring.

use anyhow::Result;
use std::sync::Arc;

use docuweave_core::Config;
use docuweave_db::{
    DynDocumentRequestRepository, DynRecipientRepository, DynUploadTokenRepository,
    InMemoryDocumentRequestRepository, InMemoryRecipientRepository, InMemoryUploadTokenRepository,
};
use docuweave_services::{
    AssistantClient, BusinessLookupService, DocumentRequestService, EmailService, EmailTransport,
    GeminiClient, HttpRegistryClient, SimulatedEmailTransport, SmtpEmailTransport, TokenIssuer,
};

use crate::state::{AppState, UploadPolicy};

/// Build repositories and services into the shared application state.
pub fn initialize_services(config: &Config) -> Result<Arc<AppState>> {
    let recipients: DynRecipientRepository = Arc::new(InMemoryRecipientRepository::new());
    let requests: DynDocumentRequestRepository = Arc::new(InMemoryDocumentRequestRepository::new());
    let tokens: DynUploadTokenRepository = Arc::new(InMemoryUploadTokenRepository::new());

    let transport: Arc<dyn EmailTransport> = match SmtpEmailTransport::from_config(config) {
        Some(smtp) => Arc::new(smtp),
        None => {
            tracing::info!("Email delivery is simulated (no SMTP transport configured)");
            Arc::new(SimulatedEmailTransport::new())
        }
    };
    let email = EmailService::new(transport);
    let issuer = TokenIssuer::new(tokens, config.upload_token_ttl_days());

    let request_service = DocumentRequestService::new(
        recipients.clone(),
        requests,
        issuer,
        email,
        config.public_base_url().to_string(),
    );

    let business = BusinessLookupService::new(Arc::new(HttpRegistryClient::from_config(config)?));
    let assistant: Arc<dyn AssistantClient> = Arc::new(GeminiClient::from_config(config)?);

    Ok(Arc::new(AppState {
        recipients,
        requests: request_service,
        business,
        assistant,
        uploads: UploadPolicy {
            max_file_size: config.max_upload_size_bytes(),
            allowed_extensions: config.upload_allowed_extensions().to_vec(),
            allowed_content_types: config.upload_allowed_content_types().to_vec(),
            upload_dir: config.upload_dir().into(),
        },
        config: config.clone(),
        is_production: config.is_production(),
    }))
}
