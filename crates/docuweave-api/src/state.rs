//! Application state and sub-state extractors.
//!
//! AppState aggregates the repositories and services handlers need; the
//! upload policy is split out so the upload handler can extract only what it
//! needs via Axum's `FromRef`.

use std::path::PathBuf;
use std::sync::Arc;

use docuweave_core::Config;
use docuweave_db::DynRecipientRepository;
use docuweave_services::{AssistantClient, BusinessLookupService, DocumentRequestService};

/// Limits and allow-lists applied to incoming uploads.
#[derive(Clone)]
pub struct UploadPolicy {
    pub max_file_size: usize,
    pub allowed_extensions: Vec<String>,
    pub allowed_content_types: Vec<String>,
    /// Directory uploaded artifacts are written to.
    pub upload_dir: PathBuf,
}

/// Main application state: aggregates services for dependency injection.
#[derive(Clone)]
pub struct AppState {
    pub recipients: DynRecipientRepository,
    pub requests: DocumentRequestService,
    pub business: BusinessLookupService,
    pub assistant: Arc<dyn AssistantClient>,
    pub uploads: UploadPolicy,
    pub config: Config,
    pub is_production: bool,
}

impl axum::extract::FromRef<Arc<AppState>> for UploadPolicy {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.uploads.clone()
    }
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
