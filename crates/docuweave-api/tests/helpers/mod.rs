//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p docuweave-api`. The stores are
//! in-memory, email delivery is simulated, and the model/registry clients are
//! mocks, so no external service is touched.

#![allow(dead_code)]

pub mod fixtures;

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::Utc;
use std::sync::Arc;
use tempfile::TempDir;

use docuweave_api::constants;
use docuweave_api::setup::routes;
use docuweave_api::state::{AppState, UploadPolicy};
use docuweave_core::models::{
    BusinessStatusItem, BusinessStatusResponse, ExtractedDocument, GeneratedDocument, TokenUsage,
};
use docuweave_core::{AppError, Config};
use docuweave_db::{
    InMemoryDocumentRequestRepository, InMemoryRecipientRepository, InMemoryUploadTokenRepository,
};
use docuweave_services::ai::{ExtractionResult, GenerateRequest, GenerationResult};
use docuweave_services::{
    AssistantClient, BusinessLookupService, DocumentRequestService, EmailService, RegistryClient,
    SimulatedEmailTransport, TokenIssuer,
};

/// API path prefix for tests (e.g. `/api/v0`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", constants::API_PREFIX, path)
}

/// Test application: server plus the handles tests inspect.
pub struct TestApp {
    pub server: TestServer,
    pub transport: SimulatedEmailTransport,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

/// Canned model client: extraction always yields a fixed receipt, generation
/// echoes the prompt into the content.
pub struct MockAssistant;

#[async_trait]
impl AssistantClient for MockAssistant {
    async fn extract_document(
        &self,
        _data: Vec<u8>,
        _content_type: &str,
    ) -> Result<ExtractionResult, AppError> {
        Ok(ExtractionResult {
            data: ExtractedDocument {
                document_type: "receipt".to_string(),
                date: Some("2025-03-14".to_string()),
                vendor: Some("카페온도".to_string()),
                items: vec![],
                tax_amount: Some(1136.0),
                total_amount: Some(12500.0),
                additional_info: None,
                raw_text: None,
                confidence: None,
            },
            model: "mock-model".to_string(),
            token_usage: TokenUsage {
                input_tokens: 100,
                output_tokens: 50,
                total_tokens: 150,
                cost_usd: 0.0,
            },
        })
    }

    async fn generate_document(
        &self,
        request: GenerateRequest,
    ) -> Result<GenerationResult, AppError> {
        Ok(GenerationResult {
            data: GeneratedDocument {
                kind: request.document_type,
                title: "표준 견적서".to_string(),
                content: format!("# 견적서\n\n{}", request.prompt),
                template_id: "standard-quote".to_string(),
                model: "mock-model".to_string(),
                created_at: Utc::now(),
            },
            token_usage: TokenUsage {
                input_tokens: 200,
                output_tokens: 300,
                total_tokens: 500,
                cost_usd: 0.0,
            },
        })
    }
}

/// Canned registry client: every normalized number is an active business.
pub struct MockRegistryClient;

#[async_trait]
impl RegistryClient for MockRegistryClient {
    async fn status(&self, business_number: &str) -> Result<BusinessStatusResponse, AppError> {
        Ok(BusinessStatusResponse {
            status_code: "OK".to_string(),
            match_cnt: Some(1),
            request_cnt: Some(1),
            data: vec![BusinessStatusItem {
                b_no: business_number.to_string(),
                b_stt: Some("계속사업자".to_string()),
                b_stt_cd: Some("01".to_string()),
                tax_type: Some("부가가치세 일반과세자".to_string()),
                tax_type_cd: Some("01".to_string()),
                end_dt: Some(String::new()),
                utcc_yn: None,
                tax_type_change_dt: None,
                invoice_apply_dt: None,
            }],
        })
    }
}

/// Setup a test app with in-memory stores and mocked external collaborators.
pub fn setup_test_app() -> TestApp {
    let config = Config::from_env().expect("test config from env");

    let recipients = Arc::new(InMemoryRecipientRepository::new());
    let requests = Arc::new(InMemoryDocumentRequestRepository::new());
    let tokens = Arc::new(InMemoryUploadTokenRepository::new());
    let transport = SimulatedEmailTransport::new();
    let temp_dir = tempfile::tempdir().expect("temp upload dir");

    let request_service = DocumentRequestService::new(
        recipients.clone(),
        requests,
        TokenIssuer::new(tokens, config.upload_token_ttl_days()),
        EmailService::new(Arc::new(transport.clone())),
        "http://localhost:3000".to_string(),
    );

    let state = Arc::new(AppState {
        recipients,
        requests: request_service,
        business: BusinessLookupService::new(Arc::new(MockRegistryClient)),
        assistant: Arc::new(MockAssistant),
        uploads: UploadPolicy {
            max_file_size: config.max_upload_size_bytes(),
            allowed_extensions: config.upload_allowed_extensions().to_vec(),
            allowed_content_types: config.upload_allowed_content_types().to_vec(),
            upload_dir: temp_dir.path().to_path_buf(),
        },
        config: config.clone(),
        is_production: false,
    });

    let router = routes::setup_routes(&config, state).expect("router builds");
    let server = TestServer::new(router).expect("test server starts");

    TestApp {
        server,
        transport,
        _temp_dir: temp_dir,
    }
}
