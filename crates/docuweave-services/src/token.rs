//! Upload token issuance and lookup.
//!
//! Token values are 32 bytes from the process CSPRNG, base64url-encoded
//! (256 bits of entropy, 43 characters). Lookup goes through the repository,
//! which compares values in constant time and rejects expired or used tokens
//! without saying which.

use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use uuid::Uuid;

use docuweave_core::models::UploadToken;
use docuweave_core::AppError;
use docuweave_db::DynUploadTokenRepository;

const TOKEN_BYTES: usize = 32;

#[derive(Clone)]
pub struct TokenIssuer {
    tokens: DynUploadTokenRepository,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(tokens: DynUploadTokenRepository, ttl_days: i64) -> Self {
        Self {
            tokens,
            ttl: Duration::days(ttl_days),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn generate_value() -> String {
        let mut bytes = [0u8; TOKEN_BYTES];
        rand::rng().fill_bytes(&mut bytes);
        base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
    }

    /// Create and persist a token for one (recipient, request) pair.
    pub async fn issue(
        &self,
        recipient_id: Uuid,
        document_request_id: Uuid,
    ) -> Result<UploadToken, AppError> {
        let now = Utc::now();
        let token = UploadToken {
            id: Uuid::new_v4(),
            token: Self::generate_value(),
            recipient_id,
            document_request_id,
            expires_at: now + self.ttl,
            used_at: None,
            created_at: now,
        };
        let token = self.tokens.create(token).await?;
        tracing::debug!(
            document_request_id = %document_request_id,
            expires_at = %token.expires_at,
            "Issued upload token"
        );
        Ok(token)
    }

    /// Resolve a token value; absent, expired, and used are all `None`.
    pub async fn lookup(&self, token_value: &str) -> Result<Option<UploadToken>, AppError> {
        self.tokens.find_valid(token_value, Utc::now()).await
    }

    /// Consume every outstanding token of a request (called on completion).
    pub async fn consume_for_request(
        &self,
        document_request_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<usize, AppError> {
        self.tokens
            .mark_used_for_request(document_request_id, now)
            .await
    }
}
