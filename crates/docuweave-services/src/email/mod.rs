//! Notification dispatch.
//!
//! The email-sending capability is injectable so the document-request
//! service's control flow is testable independent of real email
//! infrastructure. The default transport simulates delivery: it always
//! succeeds, fabricates a message id, and logs the attempt. An SMTP transport
//! (lettre) is selected by configuration for real deployments.

mod templates;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use docuweave_core::{AppError, Config};

pub use templates::{document_approved, document_rejected, document_request};

/// Result of one send attempt.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SendOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Injectable email-sending capability.
#[async_trait]
pub trait EmailTransport: Send + Sync {
    /// Deliver one message; returns the transport's message id.
    async fn deliver(&self, to: &str, subject: &str, html_body: &str) -> Result<String, AppError>;
}

/// Record of one simulated delivery, kept for inspection.
#[derive(Debug, Clone)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
    pub message_id: String,
    pub sent_at: DateTime<Utc>,
}

/// Transport that performs no real delivery: every send succeeds with a
/// fabricated message id and is logged.
#[derive(Clone, Default)]
pub struct SimulatedEmailTransport {
    sent: Arc<Mutex<Vec<SentEmail>>>,
}

impl SimulatedEmailTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything "sent" so far, oldest first.
    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().expect("email log lock").clone()
    }
}

#[async_trait]
impl EmailTransport for SimulatedEmailTransport {
    async fn deliver(&self, to: &str, subject: &str, html_body: &str) -> Result<String, AppError> {
        let message_id = format!("msg-{}", Uuid::new_v4());
        tracing::info!(to = %to, subject = %subject, message_id = %message_id, "Simulated email send");
        self.sent.lock().expect("email log lock").push(SentEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: html_body.to_string(),
            message_id: message_id.clone(),
            sent_at: Utc::now(),
        });
        Ok(message_id)
    }
}

/// SMTP transport via lettre.
#[derive(Clone)]
pub struct SmtpEmailTransport {
    mailer: Arc<AsyncSmtpTransport<Tokio1Executor>>,
    from: String,
}

impl SmtpEmailTransport {
    /// Build from config. Returns `None` when email is disabled or SMTP is
    /// not configured, in which case the caller falls back to simulation.
    pub fn from_config(config: &Config) -> Option<Self> {
        if !config.email_enabled() {
            tracing::debug!("Email disabled (EMAIL_ENABLED=false), using simulated transport");
            return None;
        }
        let host = config.smtp_host()?;
        let from = config.smtp_from()?.to_string();
        let port = config.smtp_port().unwrap_or(587);

        let mailer = if config.smtp_tls() {
            let b = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host).ok()?;
            let b = b.port(port);
            let b = if let (Some(u), Some(p)) = (config.smtp_user(), config.smtp_password()) {
                b.credentials(Credentials::new(u.to_string(), p.to_string()))
            } else {
                b
            };
            tracing::info!(host = %host, port = port, "Email transport initialized (SMTP with STARTTLS)");
            b.build()
        } else {
            let b = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host).port(port);
            let b = if let (Some(u), Some(p)) = (config.smtp_user(), config.smtp_password()) {
                b.credentials(Credentials::new(u.to_string(), p.to_string()))
            } else {
                b
            };
            tracing::info!(host = %host, port = port, "Email transport initialized (SMTP)");
            b.build()
        };

        Some(Self {
            mailer: Arc::new(mailer),
            from,
        })
    }
}

#[async_trait]
impl EmailTransport for SmtpEmailTransport {
    async fn deliver(&self, to: &str, subject: &str, html_body: &str) -> Result<String, AppError> {
        let to_addr: Mailbox = to
            .parse()
            .map_err(|e| AppError::Validation(format!("Invalid recipient address: {}", e)))?;
        let from_addr: Mailbox = self
            .from
            .parse()
            .map_err(|e| AppError::Internal(format!("Invalid SMTP_FROM: {}", e)))?;

        let email = Message::builder()
            .from(from_addr)
            .to(to_addr)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html_body.to_string())
            .map_err(|e| AppError::EmailDelivery(e.to_string()))?;

        self.mailer
            .send(email)
            .await
            .map_err(|e| AppError::EmailDelivery(e.to_string()))?;
        Ok(format!("smtp-{}", Uuid::new_v4()))
    }
}

/// Email service wrapping the injected transport.
#[derive(Clone)]
pub struct EmailService {
    transport: Arc<dyn EmailTransport>,
}

impl EmailService {
    pub fn new(transport: Arc<dyn EmailTransport>) -> Self {
        Self { transport }
    }

    /// Send one message. Transport failures come back inside the outcome, not
    /// as an error, so callers decide whether delivery is load-bearing.
    pub async fn send(&self, to: &str, subject: &str, html_body: &str) -> SendOutcome {
        match self.transport.deliver(to, subject, html_body).await {
            Ok(message_id) => SendOutcome {
                success: true,
                message_id: Some(message_id),
                error: None,
            },
            Err(err) => {
                tracing::warn!(to = %to, error = %err, "Email delivery failed");
                SendOutcome {
                    success: false,
                    message_id: None,
                    error: Some(err.to_string()),
                }
            }
        }
    }
}
