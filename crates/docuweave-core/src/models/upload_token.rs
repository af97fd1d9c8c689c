use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A capability granting one recipient upload access to one document request.
///
/// Valid iff `used_at` is unset and `expires_at` lies in the future. Several
/// valid tokens may coexist for the same request; the upload path does not
/// consume them. Tokens are marked used when the request completes.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadToken {
    pub id: Uuid,
    /// Opaque CSPRNG value, base64url, 256 bits of entropy.
    pub token: String,
    pub recipient_id: Uuid,
    pub document_request_id: Uuid,
    pub expires_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl UploadToken {
    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        self.used_at.is_none() && now < self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn token(expires_at: DateTime<Utc>, used_at: Option<DateTime<Utc>>) -> UploadToken {
        UploadToken {
            id: Uuid::new_v4(),
            token: "t".repeat(43),
            recipient_id: Uuid::new_v4(),
            document_request_id: Uuid::new_v4(),
            expires_at,
            used_at,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_fresh_token_is_valid() {
        let now = Utc::now();
        assert!(token(now + Duration::days(7), None).is_valid(now));
    }

    #[test]
    fn test_expired_token_is_invalid() {
        let now = Utc::now();
        assert!(!token(now - Duration::seconds(1), None).is_valid(now));
    }

    #[test]
    fn test_used_token_is_invalid() {
        let now = Utc::now();
        assert!(!token(now + Duration::days(7), Some(now)).is_valid(now));
    }
}
