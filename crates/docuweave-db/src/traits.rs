use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use docuweave_core::models::{DocumentRequest, Recipient, UpdateRecipient, UploadToken};
use docuweave_core::AppError;

/// Boxed mutation applied atomically to one stored request.
///
/// The store runs it under its write lock against a copy of the record; the
/// record is only replaced when the mutation returns `Ok`, so a failed
/// mutation leaves the store untouched.
pub type RequestMutation =
    Box<dyn FnOnce(&mut DocumentRequest) -> Result<(), AppError> + Send + 'static>;

#[async_trait]
pub trait RecipientRepository: Send + Sync {
    async fn create(&self, recipient: Recipient) -> Result<Recipient, AppError>;

    async fn get(&self, id: Uuid) -> Result<Option<Recipient>, AppError>;

    /// All recipients in insertion order.
    async fn list(&self) -> Result<Vec<Recipient>, AppError>;

    /// Apply a partial update; `None` if the id does not resolve.
    async fn update(
        &self,
        id: Uuid,
        update: UpdateRecipient,
    ) -> Result<Option<Recipient>, AppError>;

    /// Returns whether a record was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}

#[async_trait]
pub trait DocumentRequestRepository: Send + Sync {
    async fn create(&self, request: DocumentRequest) -> Result<DocumentRequest, AppError>;

    async fn get(&self, id: Uuid) -> Result<Option<DocumentRequest>, AppError>;

    /// All requests in insertion order.
    async fn list(&self) -> Result<Vec<DocumentRequest>, AppError>;

    /// Atomically mutate one request under the store lock.
    ///
    /// Returns the updated record, or `None` if the id does not resolve.
    async fn update_with(
        &self,
        id: Uuid,
        mutation: RequestMutation,
    ) -> Result<Option<DocumentRequest>, AppError>;
}

#[async_trait]
pub trait UploadTokenRepository: Send + Sync {
    async fn create(&self, token: UploadToken) -> Result<UploadToken, AppError>;

    /// Resolve a token by value, rejecting expired and used tokens.
    ///
    /// Absent, expired, and used all yield `None`; the caller cannot tell
    /// which. The value comparison is constant-time.
    async fn find_valid(
        &self,
        token_value: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<UploadToken>, AppError>;

    /// Mark every outstanding token of a request as used. Returns the number
    /// of tokens consumed.
    async fn mark_used_for_request(
        &self,
        document_request_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<usize, AppError>;
}

pub type DynRecipientRepository = Arc<dyn RecipientRepository>;
pub type DynDocumentRequestRepository = Arc<dyn DocumentRequestRepository>;
pub type DynUploadTokenRepository = Arc<dyn UploadTokenRepository>;
