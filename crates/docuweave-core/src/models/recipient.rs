use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Someone who receives document requests.
///
/// Referenced by id from [`super::DocumentRequest`] and [`super::UploadToken`];
/// neither owns it. Email uniqueness is not enforced.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Recipient {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Recipient {
    pub fn new(
        email: String,
        name: String,
        organization: Option<String>,
        phone: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            name,
            organization,
            phone,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Payload to register a new recipient
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct NewRecipient {
    #[validate(email(message = "Must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: String,
    #[validate(length(max = 255))]
    pub organization: Option<String>,
    #[validate(length(max = 64))]
    pub phone: Option<String>,
}

/// Partial update for an existing recipient; absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct UpdateRecipient {
    #[validate(email(message = "Must be a valid email address"))]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(length(max = 255))]
    pub organization: Option<String>,
    #[validate(length(max = 64))]
    pub phone: Option<String>,
}
