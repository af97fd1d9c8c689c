use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Lifecycle of a single requested document.
///
/// `Pending` on creation, `Uploaded` when a file arrives, then `Approved` or
/// `Rejected` by reviewer action. A rejected document goes back to `Uploaded`
/// when the submitter re-uploads; there is no transition back to `Pending`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Pending,
    Uploaded,
    Approved,
    Rejected,
}

impl Display for DocumentStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DocumentStatus::Pending => write!(f, "pending"),
            DocumentStatus::Uploaded => write!(f, "uploaded"),
            DocumentStatus::Approved => write!(f, "approved"),
            DocumentStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// Aggregate lifecycle of a document request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Sent,
    Completed,
    Expired,
}

impl Display for RequestStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            RequestStatus::Pending => write!(f, "pending"),
            RequestStatus::Sent => write!(f, "sent"),
            RequestStatus::Completed => write!(f, "completed"),
            RequestStatus::Expired => write!(f, "expired"),
        }
    }
}

/// Reviewer decision on an uploaded document.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReviewDecision {
    Approved,
    Rejected,
}

impl FromStr for ReviewDecision {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(ReviewDecision::Approved),
            "rejected" => Ok(ReviewDecision::Rejected),
            _ => Err(anyhow::anyhow!("Invalid review decision: {}", s)),
        }
    }
}

/// One named artifact a recipient must submit.
///
/// Owned exclusively by its parent [`DocumentRequest`]; ids are unique only
/// within the owning request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RequestedDocument {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub required: bool,
    pub status: DocumentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploaded_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploaded_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
}

impl RequestedDocument {
    pub fn new(name: String, description: Option<String>, required: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            description,
            required,
            status: DocumentStatus::Pending,
            uploaded_url: None,
            uploaded_at: None,
            rejection_reason: None,
        }
    }

    /// Record an upload. A re-upload after rejection clears the stale reason.
    pub fn record_upload(&mut self, artifact_url: String, now: DateTime<Utc>) {
        self.status = DocumentStatus::Uploaded;
        self.uploaded_url = Some(artifact_url);
        self.uploaded_at = Some(now);
        self.rejection_reason = None;
    }

    pub fn approve(&mut self) {
        self.status = DocumentStatus::Approved;
    }

    pub fn reject(&mut self, reason: String) {
        self.status = DocumentStatus::Rejected;
        self.rejection_reason = Some(reason);
    }
}

/// An aggregate of requested documents addressed to one recipient for one project.
///
/// `recipient_id` is a weak reference (lookup only); referential integrity is
/// the caller's responsibility.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DocumentRequest {
    pub id: Uuid,
    pub recipient_id: Uuid,
    pub project_name: String,
    pub company_name: String,
    pub documents: Vec<RequestedDocument>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DocumentRequest {
    pub fn new(
        recipient_id: Uuid,
        project_name: String,
        company_name: String,
        documents: Vec<RequestedDocument>,
        message: Option<String>,
        due_date: Option<DateTime<Utc>>,
    ) -> Self {
        let now = Utc::now();
        let mut request = Self {
            id: Uuid::new_v4(),
            recipient_id,
            project_name,
            company_name,
            documents,
            message,
            due_date,
            status: RequestStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        // A request with zero required documents is complete from the start.
        request.status = request.derive_status(now);
        request
    }

    pub fn document(&self, document_id: Uuid) -> Option<&RequestedDocument> {
        self.documents.iter().find(|d| d.id == document_id)
    }

    pub fn document_mut(&mut self, document_id: Uuid) -> Option<&mut RequestedDocument> {
        self.documents.iter_mut().find(|d| d.id == document_id)
    }

    /// Whether every required document is approved. Optional documents never
    /// block completion; with no required documents this holds vacuously.
    pub fn all_required_approved(&self) -> bool {
        self.documents
            .iter()
            .filter(|d| d.required)
            .all(|d| d.status == DocumentStatus::Approved)
    }

    /// Derive the aggregate status at `now` without mutating.
    ///
    /// `Completed` is terminal. Otherwise the request completes exactly when
    /// every required document is approved, and a past-due request that is
    /// still incomplete is `Expired`. Order of approvals does not matter.
    pub fn derive_status(&self, now: DateTime<Utc>) -> RequestStatus {
        if self.status == RequestStatus::Completed {
            return RequestStatus::Completed;
        }
        if self.all_required_approved() {
            return RequestStatus::Completed;
        }
        if let Some(due) = self.due_date {
            if now > due {
                return RequestStatus::Expired;
            }
        }
        self.status
    }

    /// Re-derive the aggregate status, returning true if it changed.
    pub fn recompute_status(&mut self, now: DateTime<Utc>) -> bool {
        let derived = self.derive_status(now);
        if derived != self.status {
            self.status = derived;
            true
        } else {
            false
        }
    }
}

/// One document entry in a creation payload
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct NewRequestedDocument {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: String,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
}

/// Payload to create a document request
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct NewDocumentRequest {
    pub recipient_id: Uuid,
    #[validate(length(
        min = 1,
        max = 255,
        message = "Project name must be between 1 and 255 characters"
    ))]
    pub project_name: String,
    #[validate(length(
        min = 1,
        max = 255,
        message = "Company name must be between 1 and 255 characters"
    ))]
    pub company_name: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "At least one document must be requested"), nested)]
    pub documents: Vec<NewRequestedDocument>,
    #[validate(length(max = 4000))]
    pub message: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
}

/// What a token holder is allowed to see about a request.
#[derive(Debug, Serialize, ToSchema)]
pub struct UploadSession {
    pub id: Uuid,
    pub project_name: String,
    pub company_name: String,
    pub recipient_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    pub documents: Vec<RequestedDocument>,
}
