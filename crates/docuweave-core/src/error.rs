//! Error types module
//!
//! This module provides the core error types used throughout the Docuweave
//! application. All errors are unified under the `AppError` enum which can
//! represent validation, lookup, token, upload-policy, and external-service
//! failures.
//!
//! Absent, expired, and already-used upload tokens all map to the single
//! `InvalidToken` variant so callers cannot distinguish which condition
//! rejected them.

use std::io;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like upload-policy rejections
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
/// This trait allows errors to self-describe their HTTP response characteristics
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "INVALID_TOKEN")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the client
    fn suggested_action(&self) -> Option<&'static str>;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden in production
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid upload token")]
    InvalidToken,

    #[error("Unsupported media type: {content_type}")]
    UnsupportedMedia {
        content_type: String,
        allowed: Vec<String>,
    },

    #[error("File too large: {size} bytes (max: {max} bytes)")]
    PayloadTooLarge { size: usize, max: usize },

    #[error("External service '{service}' failed: {message}")]
    ExternalService { service: String, message: String },

    /// An upstream API answered with an error status that is forwarded as-is
    /// (e.g. the registry's 401/429).
    #[error("External service '{service}' returned status {status}: {message}")]
    UpstreamStatus {
        service: String,
        status: u16,
        message: String,
    },

    #[error("Email delivery failed: {0}")]
    EmailDelivery(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

// Error conversion implementations following Rust best practices
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Validation(format!("JSON parsing error: {}", err))
    }
}

impl From<uuid::Error> for AppError {
    fn from(err: uuid::Error) -> Self {
        AppError::Validation(format!("UUID parsing error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(format!("Validation error: {}", err))
    }
}

/// Static metadata for each variant: (http_status, error_code, recoverable, suggested_action, sensitive, log_level).
/// Reduces duplication in ErrorMetadata impl; client_message stays per-variant for dynamic content.
fn app_error_static_metadata(
    err: &AppError,
) -> (
    u16,
    &'static str,
    bool,
    Option<&'static str>,
    bool,
    LogLevel,
) {
    match err {
        AppError::Validation(_) => (
            400,
            "INVALID_INPUT",
            false,
            Some("Check request parameters and try again"),
            false,
            LogLevel::Debug,
        ),
        AppError::NotFound(_) => (
            404,
            "NOT_FOUND",
            false,
            Some("Verify the resource ID exists"),
            false,
            LogLevel::Debug,
        ),
        AppError::InvalidToken => (
            401,
            "INVALID_TOKEN",
            false,
            Some("Request a new upload link"),
            false,
            LogLevel::Debug,
        ),
        AppError::UnsupportedMedia { .. } => (
            415,
            "UNSUPPORTED_MEDIA_TYPE",
            false,
            Some("Upload a JPEG, PNG, GIF, WEBP, or PDF file"),
            false,
            LogLevel::Warn,
        ),
        AppError::PayloadTooLarge { .. } => (
            413,
            "PAYLOAD_TOO_LARGE",
            false,
            Some("Reduce file size and retry"),
            false,
            LogLevel::Debug,
        ),
        AppError::ExternalService { .. } => (
            502,
            "EXTERNAL_SERVICE_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::UpstreamStatus { status, .. } => (
            *status,
            "UPSTREAM_ERROR",
            *status == 429,
            Some("Check upstream credentials or retry later"),
            false,
            LogLevel::Warn,
        ),
        AppError::EmailDelivery(_) => (
            502,
            "EMAIL_DELIVERY_ERROR",
            true,
            Some("Retry the dispatch"),
            true,
            LogLevel::Error,
        ),
        AppError::Internal(_) => (
            500,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::InternalWithSource { .. } => (
            500,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
    }
}

impl AppError {
    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &str {
        match self {
            AppError::Validation(_) => "Validation",
            AppError::NotFound(_) => "NotFound",
            AppError::InvalidToken => "InvalidToken",
            AppError::UnsupportedMedia { .. } => "UnsupportedMedia",
            AppError::PayloadTooLarge { .. } => "PayloadTooLarge",
            AppError::ExternalService { .. } => "ExternalService",
            AppError::UpstreamStatus { .. } => "UpstreamStatus",
            AppError::EmailDelivery(_) => "EmailDelivery",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        // Add source error chain
        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn suggested_action(&self) -> Option<&'static str> {
        app_error_static_metadata(self).3
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).4
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).5
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Validation(ref msg) => msg.clone(),
            AppError::NotFound(ref msg) => msg.clone(),
            // Absent, expired, and used tokens share one message on purpose.
            AppError::InvalidToken => {
                "Invalid upload token. The link may have expired or already been used.".to_string()
            }
            AppError::UnsupportedMedia {
                content_type,
                allowed,
            } => {
                format!(
                    "Unsupported media type '{}'. Allowed: {}",
                    content_type,
                    allowed.join(", ")
                )
            }
            AppError::PayloadTooLarge { size, max } => {
                format!("File too large: {} bytes (max: {} bytes)", size, max)
            }
            AppError::ExternalService { service, .. } => {
                format!("The {} service is currently unavailable", service)
            }
            AppError::UpstreamStatus { message, .. } => message.clone(),
            AppError::EmailDelivery(_) => "Failed to deliver notification email".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
            AppError::InternalWithSource { .. } => "Internal server error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_metadata_validation() {
        let err = AppError::Validation("documents must not be empty".to_string());
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(!err.is_recoverable());
        assert_eq!(err.client_message(), "documents must not be empty");
        assert!(!err.is_sensitive());
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_error_metadata_not_found() {
        let err = AppError::NotFound("Document request not found".to_string());
        assert_eq!(err.http_status_code(), 404);
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert!(!err.is_recoverable());
        assert_eq!(err.client_message(), "Document request not found");
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    /// The token error never says whether the token was absent, expired, or used.
    #[test]
    fn test_invalid_token_message_is_generic() {
        let err = AppError::InvalidToken;
        assert_eq!(err.http_status_code(), 401);
        assert_eq!(err.error_code(), "INVALID_TOKEN");
        let msg = err.client_message();
        assert!(!msg.to_lowercase().contains("not issued"));
        assert!(!msg.to_lowercase().contains("never"));
    }

    #[test]
    fn test_error_metadata_external_service_is_sensitive() {
        let err = AppError::ExternalService {
            service: "business registry".to_string(),
            message: "connection reset by peer at 10.0.0.3".to_string(),
        };
        assert_eq!(err.http_status_code(), 502);
        assert!(err.is_recoverable());
        assert!(err.is_sensitive());
        // The raw message must not leak through the client message.
        assert!(!err.client_message().contains("10.0.0.3"));
        assert_eq!(err.log_level(), LogLevel::Error);
    }

    #[test]
    fn test_error_metadata_unsupported_media() {
        let err = AppError::UnsupportedMedia {
            content_type: "application/x-msdownload".to_string(),
            allowed: vec!["image/jpeg".to_string(), "application/pdf".to_string()],
        };
        assert_eq!(err.http_status_code(), 415);
        assert!(err.client_message().contains("application/x-msdownload"));
        assert!(err.client_message().contains("application/pdf"));
    }

    #[test]
    fn test_upstream_status_is_forwarded_as_is() {
        let err = AppError::UpstreamStatus {
            service: "business registry".to_string(),
            status: 429,
            message: "API 호출 한도를 초과했습니다.".to_string(),
        };
        assert_eq!(err.http_status_code(), 429);
        assert!(err.is_recoverable());
        assert_eq!(err.client_message(), "API 호출 한도를 초과했습니다.");

        let err = AppError::UpstreamStatus {
            service: "business registry".to_string(),
            status: 401,
            message: "unauthorized".to_string(),
        };
        assert_eq!(err.http_status_code(), 401);
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_error_metadata_payload_too_large() {
        let err = AppError::PayloadTooLarge {
            size: 11 * 1024 * 1024,
            max: 10 * 1024 * 1024,
        };
        assert_eq!(err.http_status_code(), 413);
        assert!(err.client_message().contains("11534336"));
        assert!(err.client_message().contains("10485760"));
    }
}
