//! Document request workflow.
//!
//! Orchestrates request creation, token issuance, notification dispatch,
//! upload recording, review decisions, and derivation of the aggregate
//! status. Depends only on the repository traits; every mutation of a request
//! runs atomically under the store lock via `update_with`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use docuweave_core::models::{
    DocumentRequest, NewDocumentRequest, Recipient, RequestStatus, RequestedDocument,
    ReviewDecision, UploadSession,
};
use docuweave_core::AppError;
use docuweave_db::{DynDocumentRequestRepository, DynRecipientRepository};

use crate::email::{self, EmailService};
use crate::token::TokenIssuer;

/// Token value embedded in preview links instead of a real capability.
const PREVIEW_TOKEN: &str = "PREVIEW_TOKEN_EXAMPLE";

/// Result of dispatching a request.
#[derive(Debug, Serialize, ToSchema)]
pub struct DispatchOutcome {
    pub notified: bool,
    pub token: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PreviewRecipient {
    pub email: String,
    pub name: String,
}

/// Rendered document-request email, for preview before sending.
#[derive(Debug, Serialize, ToSchema)]
pub struct EmailPreview {
    pub subject: String,
    pub html: String,
    pub recipient: PreviewRecipient,
}

#[derive(Clone)]
pub struct DocumentRequestService {
    recipients: DynRecipientRepository,
    requests: DynDocumentRequestRepository,
    tokens: TokenIssuer,
    email: EmailService,
    public_base_url: String,
}

impl DocumentRequestService {
    pub fn new(
        recipients: DynRecipientRepository,
        requests: DynDocumentRequestRepository,
        tokens: TokenIssuer,
        email: EmailService,
        public_base_url: String,
    ) -> Self {
        Self {
            recipients,
            requests,
            tokens,
            email,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create a request with all sub-documents `pending`, preserving input
    /// order. Referential integrity of `recipient_id` is the caller's
    /// concern; any id is accepted.
    pub async fn create_request(
        &self,
        payload: NewDocumentRequest,
    ) -> Result<DocumentRequest, AppError> {
        payload.validate()?;

        let documents = payload
            .documents
            .into_iter()
            .map(|d| RequestedDocument::new(d.name, d.description, d.required))
            .collect();
        let request = DocumentRequest::new(
            payload.recipient_id,
            payload.project_name,
            payload.company_name,
            documents,
            payload.message,
            payload.due_date,
        );
        let request = self.requests.create(request).await?;
        tracing::info!(
            request_id = %request.id,
            recipient_id = %request.recipient_id,
            documents = request.documents.len(),
            "Document request created"
        );
        Ok(request)
    }

    /// Issue a token, render the request email, and send it. On success the
    /// request moves to `sent`; on delivery failure it stays `pending` and
    /// the error surfaces to the caller (no automatic retry).
    pub async fn dispatch(&self, request_id: Uuid) -> Result<DispatchOutcome, AppError> {
        let request = self
            .requests
            .get(request_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Document request not found".to_string()))?;
        let recipient = self
            .recipients
            .get(request.recipient_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Recipient not found".to_string()))?;

        let token = self.tokens.issue(recipient.id, request.id).await?;

        let template = email::document_request();
        let values = self.request_email_values(&request, &recipient, &token.token, token.expires_at);
        let subject = template.render_subject(&values);
        let html = template.render(&values);

        let outcome = self.email.send(&recipient.email, &subject, &html).await;
        if !outcome.success {
            return Err(AppError::EmailDelivery(
                outcome
                    .error
                    .unwrap_or_else(|| "delivery failed".to_string()),
            ));
        }

        let now = Utc::now();
        self.requests
            .update_with(
                request.id,
                Box::new(move |r| {
                    // A completed or expired request keeps its status.
                    if matches!(r.status, RequestStatus::Pending | RequestStatus::Sent) {
                        r.status = RequestStatus::Sent;
                        r.updated_at = now;
                    }
                    Ok(())
                }),
            )
            .await?;

        tracing::info!(request_id = %request.id, recipient = %recipient.email, "Document request dispatched");
        Ok(DispatchOutcome {
            notified: true,
            token: token.token,
        })
    }

    /// Resolve an upload token into the summary a token holder may see.
    pub async fn validate_token(&self, token_value: &str) -> Result<UploadSession, AppError> {
        let token = self
            .tokens
            .lookup(token_value)
            .await?
            .ok_or(AppError::InvalidToken)?;
        let request = self
            .refresh(token.document_request_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Document request not found".to_string()))?;
        let recipient = self
            .recipients
            .get(token.recipient_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Recipient not found".to_string()))?;

        Ok(UploadSession {
            id: request.id,
            project_name: request.project_name,
            company_name: request.company_name,
            recipient_name: recipient.name,
            message: request.message,
            due_date: request.due_date,
            documents: request.documents,
        })
    }

    /// Record an uploaded artifact against one requested document.
    ///
    /// Upload alone can never complete a request: completion requires
    /// approval, not mere upload.
    pub async fn record_upload(
        &self,
        token_value: &str,
        document_id: Uuid,
        artifact_url: String,
    ) -> Result<RequestedDocument, AppError> {
        let token = self
            .tokens
            .lookup(token_value)
            .await?
            .ok_or(AppError::InvalidToken)?;

        let now = Utc::now();
        let updated = self
            .requests
            .update_with(
                token.document_request_id,
                Box::new(move |r| {
                    let doc = r.document_mut(document_id).ok_or_else(|| {
                        AppError::NotFound("Requested document not found".to_string())
                    })?;
                    doc.record_upload(artifact_url, now);
                    r.recompute_status(now);
                    r.updated_at = now;
                    Ok(())
                }),
            )
            .await?
            .ok_or_else(|| AppError::NotFound("Document request not found".to_string()))?;

        let document = updated
            .document(document_id)
            .cloned()
            .ok_or_else(|| AppError::Internal("Updated document missing".to_string()))?;
        tracing::info!(
            request_id = %updated.id,
            document_id = %document_id,
            "Document uploaded"
        );
        Ok(document)
    }

    /// Apply a reviewer decision and recompute the aggregate status.
    ///
    /// A rejection with a blank reason fails validation before any mutation.
    /// When the request reaches `completed`, its outstanding tokens are
    /// consumed, closing the upload link.
    pub async fn review(
        &self,
        request_id: Uuid,
        document_id: Uuid,
        decision: ReviewDecision,
        rejection_reason: Option<String>,
    ) -> Result<RequestedDocument, AppError> {
        let reason = match decision {
            ReviewDecision::Rejected => Some(
                rejection_reason
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .ok_or_else(|| {
                        AppError::Validation(
                            "Rejection requires a non-empty reason".to_string(),
                        )
                    })?,
            ),
            ReviewDecision::Approved => None,
        };

        let now = Utc::now();
        let updated = self
            .requests
            .update_with(
                request_id,
                Box::new(move |r| {
                    let doc = r.document_mut(document_id).ok_or_else(|| {
                        AppError::NotFound("Requested document not found".to_string())
                    })?;
                    match decision {
                        ReviewDecision::Approved => doc.approve(),
                        ReviewDecision::Rejected => {
                            doc.reject(reason.expect("reason validated for rejection"))
                        }
                    }
                    r.recompute_status(now);
                    r.updated_at = now;
                    Ok(())
                }),
            )
            .await?
            .ok_or_else(|| AppError::NotFound("Document request not found".to_string()))?;

        if updated.status == RequestStatus::Completed {
            let consumed = self.tokens.consume_for_request(updated.id, now).await?;
            tracing::info!(
                request_id = %updated.id,
                tokens_consumed = consumed,
                "Document request completed"
            );
        }

        self.notify_review(&updated, document_id, decision).await;

        updated
            .document(document_id)
            .cloned()
            .ok_or_else(|| AppError::Internal("Updated document missing".to_string()))
    }

    /// Fetch one request, lazily applying due-date expiry.
    pub async fn get(&self, request_id: Uuid) -> Result<Option<DocumentRequest>, AppError> {
        self.refresh(request_id).await
    }

    /// Fetch one document within a request.
    pub async fn get_document(
        &self,
        request_id: Uuid,
        document_id: Uuid,
    ) -> Result<Option<RequestedDocument>, AppError> {
        Ok(self
            .refresh(request_id)
            .await?
            .and_then(|r| r.document(document_id).cloned()))
    }

    /// All requests in insertion order, lazily applying due-date expiry.
    pub async fn list(&self) -> Result<Vec<DocumentRequest>, AppError> {
        let now = Utc::now();
        let mut out = Vec::new();
        for request in self.requests.list().await? {
            if request.derive_status(now) != request.status {
                if let Some(updated) = self.refresh(request.id).await? {
                    out.push(updated);
                }
            } else {
                out.push(request);
            }
        }
        Ok(out)
    }

    /// Render the request email without sending anything or issuing a token.
    pub async fn preview(&self, payload: &NewDocumentRequest) -> Result<EmailPreview, AppError> {
        let recipient = self
            .recipients
            .get(payload.recipient_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Recipient not found".to_string()))?;

        let documents: Vec<RequestedDocument> = payload
            .documents
            .iter()
            .map(|d| RequestedDocument::new(d.name.clone(), d.description.clone(), d.required))
            .collect();

        let template = email::document_request();
        let mut values = HashMap::new();
        values.insert(
            "companyName".to_string(),
            payload.company_name.clone(),
        );
        values.insert("recipientName".to_string(), recipient.name.clone());
        values.insert("projectName".to_string(), payload.project_name.clone());
        values.insert(
            "message".to_string(),
            payload.message.clone().unwrap_or_else(|| {
                "프로젝트 진행을 위해 아래 문서 제출을 부탁드립니다.".to_string()
            }),
        );
        values.insert(
            "documentList".to_string(),
            document_list_html(&documents),
        );
        values.insert(
            "dueDate".to_string(),
            payload
                .due_date
                .map(korean_date)
                .unwrap_or_else(|| "별도 안내".to_string()),
        );
        values.insert(
            "uploadUrl".to_string(),
            self.upload_url(PREVIEW_TOKEN),
        );
        values.insert(
            "expiryDate".to_string(),
            korean_date(Utc::now() + self.tokens.ttl()),
        );

        Ok(EmailPreview {
            subject: template.render_subject(&values),
            html: template.render(&values),
            recipient: PreviewRecipient {
                email: recipient.email,
                name: recipient.name,
            },
        })
    }

    fn upload_url(&self, token_value: &str) -> String {
        format!("{}/upload/{}", self.public_base_url, token_value)
    }

    fn request_email_values(
        &self,
        request: &DocumentRequest,
        recipient: &Recipient,
        token_value: &str,
        expires_at: DateTime<Utc>,
    ) -> HashMap<String, String> {
        let mut values = HashMap::new();
        values.insert("companyName".to_string(), request.company_name.clone());
        values.insert("recipientName".to_string(), recipient.name.clone());
        values.insert("projectName".to_string(), request.project_name.clone());
        values.insert(
            "message".to_string(),
            request.message.clone().unwrap_or_default(),
        );
        values.insert(
            "documentList".to_string(),
            document_list_html(&request.documents),
        );
        values.insert(
            "dueDate".to_string(),
            request
                .due_date
                .map(korean_date)
                .unwrap_or_else(|| "별도 안내".to_string()),
        );
        values.insert("uploadUrl".to_string(), self.upload_url(token_value));
        values.insert("expiryDate".to_string(), korean_date(expires_at));
        values
    }

    /// Best-effort review notification; failures are logged, never surfaced.
    async fn notify_review(
        &self,
        request: &DocumentRequest,
        document_id: Uuid,
        decision: ReviewDecision,
    ) {
        let Some(document) = request.document(document_id) else {
            return;
        };
        let recipient = match self.recipients.get(request.recipient_id).await {
            Ok(Some(recipient)) => recipient,
            Ok(None) => {
                tracing::warn!(request_id = %request.id, "Review notification skipped: recipient missing");
                return;
            }
            Err(err) => {
                tracing::warn!(request_id = %request.id, error = %err, "Review notification skipped");
                return;
            }
        };

        let mut values = HashMap::new();
        values.insert("companyName".to_string(), request.company_name.clone());
        values.insert("recipientName".to_string(), recipient.name.clone());
        values.insert("documentName".to_string(), document.name.clone());
        values.insert("projectName".to_string(), request.project_name.clone());

        let template = match decision {
            ReviewDecision::Approved => {
                values.insert("approvedAt".to_string(), korean_date(Utc::now()));
                email::document_approved()
            }
            ReviewDecision::Rejected => {
                values.insert(
                    "rejectionReason".to_string(),
                    document.rejection_reason.clone().unwrap_or_default(),
                );
                // A fresh link so the submitter can re-upload even if the
                // original token has meanwhile expired.
                match self.tokens.issue(recipient.id, request.id).await {
                    Ok(token) => {
                        values.insert("uploadUrl".to_string(), self.upload_url(&token.token));
                    }
                    Err(err) => {
                        tracing::warn!(request_id = %request.id, error = %err, "Re-upload token issuance failed");
                    }
                }
                email::document_rejected()
            }
        };

        let subject = template.render_subject(&values);
        let html = template.render(&values);
        let outcome = self.email.send(&recipient.email, &subject, &html).await;
        if !outcome.success {
            tracing::warn!(
                request_id = %request.id,
                document_id = %document_id,
                "Review notification delivery failed"
            );
        }
    }

    async fn refresh(&self, id: Uuid) -> Result<Option<DocumentRequest>, AppError> {
        let now = Utc::now();
        self.requests
            .update_with(
                id,
                Box::new(move |r| {
                    if r.recompute_status(now) {
                        r.updated_at = now;
                    }
                    Ok(())
                }),
            )
            .await
    }
}

/// Korean short date, e.g. `2025. 3. 14.`
fn korean_date(dt: DateTime<Utc>) -> String {
    dt.format("%Y. %-m. %-d.").to_string()
}

fn document_list_html(documents: &[RequestedDocument]) -> String {
    if documents.is_empty() {
        return "<ul><li>요청 문서가 없습니다.</li></ul>".to_string();
    }
    let items: String = documents
        .iter()
        .map(|doc| {
            let required = if doc.required {
                " <strong>(필수)</strong>"
            } else {
                ""
            };
            let description = doc
                .description
                .as_deref()
                .map(|d| format!(" - {}", d))
                .unwrap_or_default();
            format!("<li>{}{}{}</li>", doc.name, required, description)
        })
        .collect();
    format!("<ul>{}</ul>", items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::email::SimulatedEmailTransport;
    use chrono::Duration;
    use docuweave_core::models::{DocumentStatus, NewRequestedDocument};
    use docuweave_db::{
        InMemoryDocumentRequestRepository, InMemoryRecipientRepository,
        InMemoryUploadTokenRepository, RecipientRepository,
    };
    use std::sync::Arc;

    struct Harness {
        service: DocumentRequestService,
        recipients: Arc<InMemoryRecipientRepository>,
        transport: SimulatedEmailTransport,
    }

    fn harness() -> Harness {
        let recipients = Arc::new(InMemoryRecipientRepository::new());
        let requests = Arc::new(InMemoryDocumentRequestRepository::new());
        let tokens = Arc::new(InMemoryUploadTokenRepository::new());
        let transport = SimulatedEmailTransport::new();
        let service = DocumentRequestService::new(
            recipients.clone(),
            requests,
            TokenIssuer::new(tokens, 7),
            EmailService::new(Arc::new(transport.clone())),
            "http://localhost:3000".to_string(),
        );
        Harness {
            service,
            recipients,
            transport,
        }
    }

    async fn add_recipient(harness: &Harness) -> Uuid {
        let recipient = Recipient::new(
            "hong@example.com".to_string(),
            "홍길동".to_string(),
            None,
            None,
        );
        harness.recipients.create(recipient).await.unwrap().id
    }

    fn payload(recipient_id: Uuid, documents: Vec<NewRequestedDocument>) -> NewDocumentRequest {
        NewDocumentRequest {
            recipient_id,
            project_name: "웹사이트 리뉴얼".to_string(),
            company_name: "길동상사".to_string(),
            documents,
            message: None,
            due_date: None,
        }
    }

    fn doc(name: &str, required: bool) -> NewRequestedDocument {
        NewRequestedDocument {
            name: name.to_string(),
            description: None,
            required,
        }
    }

    #[tokio::test]
    async fn test_create_request_rejects_empty_document_list() {
        let harness = harness();
        let recipient_id = add_recipient(&harness).await;
        let err = harness
            .service
            .create_request(payload(recipient_id, vec![]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_request_starts_pending_in_input_order() {
        let harness = harness();
        let recipient_id = add_recipient(&harness).await;
        let request = harness
            .service
            .create_request(payload(
                recipient_id,
                vec![doc("사업자등록증", true), doc("포트폴리오", false)],
            ))
            .await
            .unwrap();
        assert_eq!(request.status, RequestStatus::Pending);
        let names: Vec<&str> = request.documents.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["사업자등록증", "포트폴리오"]);
        assert!(request
            .documents
            .iter()
            .all(|d| d.status == DocumentStatus::Pending));
    }

    #[tokio::test]
    async fn test_dispatch_sends_email_and_marks_sent() {
        let harness = harness();
        let recipient_id = add_recipient(&harness).await;
        let request = harness
            .service
            .create_request(payload(recipient_id, vec![doc("사업자등록증", true)]))
            .await
            .unwrap();

        let outcome = harness.service.dispatch(request.id).await.unwrap();
        assert!(outcome.notified);

        let sent = harness.transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "hong@example.com");
        assert!(sent[0].subject.contains("길동상사"));
        assert!(sent[0].body.contains(&outcome.token));
        assert!(sent[0].body.contains("사업자등록증"));

        let stored = harness.service.get(request.id).await.unwrap().unwrap();
        assert_eq!(stored.status, RequestStatus::Sent);
    }

    #[tokio::test]
    async fn test_dispatch_unknown_request_is_not_found() {
        let harness = harness();
        let err = harness.service.dispatch(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_validate_token_returns_session_summary() {
        let harness = harness();
        let recipient_id = add_recipient(&harness).await;
        let request = harness
            .service
            .create_request(payload(recipient_id, vec![doc("사업자등록증", true)]))
            .await
            .unwrap();
        let outcome = harness.service.dispatch(request.id).await.unwrap();

        let session = harness
            .service
            .validate_token(&outcome.token)
            .await
            .unwrap();
        assert_eq!(session.id, request.id);
        assert_eq!(session.recipient_name, "홍길동");
        assert_eq!(session.documents.len(), 1);
    }

    #[tokio::test]
    async fn test_validate_token_rejects_unknown_token() {
        let harness = harness();
        let err = harness
            .service
            .validate_token("no-such-token")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidToken));
    }

    #[tokio::test]
    async fn test_upload_sets_uploaded_but_not_completed() {
        let harness = harness();
        let recipient_id = add_recipient(&harness).await;
        let request = harness
            .service
            .create_request(payload(recipient_id, vec![doc("사업자등록증", true)]))
            .await
            .unwrap();
        let outcome = harness.service.dispatch(request.id).await.unwrap();
        let document_id = request.documents[0].id;

        let document = harness
            .service
            .record_upload(&outcome.token, document_id, "/uploads/1-cert.pdf".to_string())
            .await
            .unwrap();
        assert_eq!(document.status, DocumentStatus::Uploaded);
        assert_eq!(document.uploaded_url.as_deref(), Some("/uploads/1-cert.pdf"));
        assert!(document.uploaded_at.is_some());

        let stored = harness.service.get(request.id).await.unwrap().unwrap();
        assert_eq!(stored.status, RequestStatus::Sent);
    }

    #[tokio::test]
    async fn test_upload_with_unknown_document_id_is_not_found() {
        let harness = harness();
        let recipient_id = add_recipient(&harness).await;
        let request = harness
            .service
            .create_request(payload(recipient_id, vec![doc("사업자등록증", true)]))
            .await
            .unwrap();
        let outcome = harness.service.dispatch(request.id).await.unwrap();

        let err = harness
            .service
            .record_upload(&outcome.token, Uuid::new_v4(), "/uploads/x.pdf".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_reject_requires_reason_and_does_not_mutate() {
        let harness = harness();
        let recipient_id = add_recipient(&harness).await;
        let request = harness
            .service
            .create_request(payload(recipient_id, vec![doc("사업자등록증", true)]))
            .await
            .unwrap();
        let outcome = harness.service.dispatch(request.id).await.unwrap();
        let document_id = request.documents[0].id;
        harness
            .service
            .record_upload(&outcome.token, document_id, "/uploads/1.pdf".to_string())
            .await
            .unwrap();

        for bad_reason in [None, Some("".to_string()), Some("   ".to_string())] {
            let err = harness
                .service
                .review(request.id, document_id, ReviewDecision::Rejected, bad_reason)
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        }

        let stored = harness
            .service
            .get_document(request.id, document_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, DocumentStatus::Uploaded);
        assert!(stored.rejection_reason.is_none());
    }

    #[tokio::test]
    async fn test_rejection_sets_reason_and_reupload_clears_it() {
        let harness = harness();
        let recipient_id = add_recipient(&harness).await;
        let request = harness
            .service
            .create_request(payload(recipient_id, vec![doc("사업자등록증", true)]))
            .await
            .unwrap();
        let outcome = harness.service.dispatch(request.id).await.unwrap();
        let document_id = request.documents[0].id;
        harness
            .service
            .record_upload(&outcome.token, document_id, "/uploads/1.pdf".to_string())
            .await
            .unwrap();

        let rejected = harness
            .service
            .review(
                request.id,
                document_id,
                ReviewDecision::Rejected,
                Some("서류가 흐릿합니다".to_string()),
            )
            .await
            .unwrap();
        assert_eq!(rejected.status, DocumentStatus::Rejected);
        assert_eq!(rejected.rejection_reason.as_deref(), Some("서류가 흐릿합니다"));

        let reuploaded = harness
            .service
            .record_upload(&outcome.token, document_id, "/uploads/2.pdf".to_string())
            .await
            .unwrap();
        assert_eq!(reuploaded.status, DocumentStatus::Uploaded);
        assert!(reuploaded.rejection_reason.is_none());
    }

    /// End-to-end: required 사업자등록증 + optional 포트폴리오; approving the
    /// required document completes the request while the optional one is
    /// still pending, and completion consumes the upload link.
    #[tokio::test]
    async fn test_end_to_end_completion_with_optional_document_pending() {
        let harness = harness();
        let recipient_id = add_recipient(&harness).await;
        let request = harness
            .service
            .create_request(payload(
                recipient_id,
                vec![doc("사업자등록증", true), doc("포트폴리오", false)],
            ))
            .await
            .unwrap();
        let outcome = harness.service.dispatch(request.id).await.unwrap();
        let required_id = request.documents[0].id;

        harness
            .service
            .record_upload(&outcome.token, required_id, "/uploads/cert.pdf".to_string())
            .await
            .unwrap();
        let approved = harness
            .service
            .review(request.id, required_id, ReviewDecision::Approved, None)
            .await
            .unwrap();
        assert_eq!(approved.status, DocumentStatus::Approved);

        let stored = harness.service.get(request.id).await.unwrap().unwrap();
        assert_eq!(stored.status, RequestStatus::Completed);
        assert_eq!(stored.documents[1].status, DocumentStatus::Pending);

        // Completion closes the link.
        let err = harness
            .service
            .validate_token(&outcome.token)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidToken));
    }

    #[tokio::test]
    async fn test_completion_is_order_independent_across_reviews() {
        let harness = harness();
        let recipient_id = add_recipient(&harness).await;
        let request = harness
            .service
            .create_request(payload(recipient_id, vec![doc("a", true), doc("b", true)]))
            .await
            .unwrap();
        let outcome = harness.service.dispatch(request.id).await.unwrap();
        let first = request.documents[0].id;
        let second = request.documents[1].id;
        for id in [first, second] {
            harness
                .service
                .record_upload(&outcome.token, id, format!("/uploads/{}.pdf", id))
                .await
                .unwrap();
        }

        // Approve in reverse order.
        harness
            .service
            .review(request.id, second, ReviewDecision::Approved, None)
            .await
            .unwrap();
        let mid = harness.service.get(request.id).await.unwrap().unwrap();
        assert_ne!(mid.status, RequestStatus::Completed);

        harness
            .service
            .review(request.id, first, ReviewDecision::Approved, None)
            .await
            .unwrap();
        let done = harness.service.get(request.id).await.unwrap().unwrap();
        assert_eq!(done.status, RequestStatus::Completed);
    }

    #[tokio::test]
    async fn test_request_with_only_optional_documents_is_completed_at_creation() {
        let harness = harness();
        let recipient_id = add_recipient(&harness).await;
        let request = harness
            .service
            .create_request(payload(recipient_id, vec![doc("포트폴리오", false)]))
            .await
            .unwrap();
        assert_eq!(request.status, RequestStatus::Completed);
    }

    #[tokio::test]
    async fn test_past_due_request_expires_lazily_on_read() {
        let harness = harness();
        let recipient_id = add_recipient(&harness).await;
        let mut payload = payload(recipient_id, vec![doc("a", true)]);
        payload.due_date = Some(Utc::now() - Duration::days(1));
        let request = harness.service.create_request(payload).await.unwrap();

        let stored = harness.service.get(request.id).await.unwrap().unwrap();
        assert_eq!(stored.status, RequestStatus::Expired);

        let listed = harness.service.list().await.unwrap();
        assert_eq!(listed[0].status, RequestStatus::Expired);
    }

    #[tokio::test]
    async fn test_review_sends_notification_emails() {
        let harness = harness();
        let recipient_id = add_recipient(&harness).await;
        let request = harness
            .service
            .create_request(payload(recipient_id, vec![doc("사업자등록증", true)]))
            .await
            .unwrap();
        let outcome = harness.service.dispatch(request.id).await.unwrap();
        let document_id = request.documents[0].id;
        harness
            .service
            .record_upload(&outcome.token, document_id, "/uploads/1.pdf".to_string())
            .await
            .unwrap();

        harness
            .service
            .review(
                request.id,
                document_id,
                ReviewDecision::Rejected,
                Some("다시 제출해주세요".to_string()),
            )
            .await
            .unwrap();

        let sent = harness.transport.sent();
        // Dispatch email plus the rejection notice.
        assert_eq!(sent.len(), 2);
        assert!(sent[1].subject.contains("재제출"));
        assert!(sent[1].body.contains("다시 제출해주세요"));
    }

    #[tokio::test]
    async fn test_preview_renders_without_issuing_token() {
        let harness = harness();
        let recipient_id = add_recipient(&harness).await;
        let preview = harness
            .service
            .preview(&payload(recipient_id, vec![doc("사업자등록증", true)]))
            .await
            .unwrap();
        assert!(preview.subject.contains("길동상사"));
        assert!(preview.html.contains("PREVIEW_TOKEN_EXAMPLE"));
        assert_eq!(preview.recipient.email, "hong@example.com");
        assert!(harness.transport.sent().is_empty());
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let harness = harness();
        let recipient_id = add_recipient(&harness).await;
        let mut ids = Vec::new();
        for name in ["one", "two", "three"] {
            let mut p = payload(recipient_id, vec![doc("a", true)]);
            p.project_name = name.to_string();
            ids.push(harness.service.create_request(p).await.unwrap().id);
        }
        let listed = harness.service.list().await.unwrap();
        let listed_ids: Vec<Uuid> = listed.iter().map(|r| r.id).collect();
        assert_eq!(listed_ids, ids);
    }
}
