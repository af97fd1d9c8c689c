//! Configuration module
//!
//! Environment-based configuration for the API and services. Call
//! [`Config::from_env`] once at startup (after loading `.env` via dotenvy)
//! and pass the result down; services never read the environment themselves.

use std::env;

const DEFAULT_SERVER_PORT: u16 = 3000;
const DEFAULT_MAX_UPLOAD_SIZE_MB: usize = 10;
const DEFAULT_UPLOAD_TOKEN_TTL_DAYS: i64 = 7;
const DEFAULT_BUSINESS_API_URL: &str = "https://api.odcloud.kr/api/nts-businessman/v1/status";
const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash-lite";

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    server_port: u16,
    cors_origins: Vec<String>,
    environment: String,
    /// Public base URL used to build upload links embedded in emails.
    public_base_url: String,
    upload_dir: String,
    max_upload_size_bytes: usize,
    upload_allowed_extensions: Vec<String>,
    upload_allowed_content_types: Vec<String>,
    upload_token_ttl_days: i64,
    business_api_url: String,
    business_api_key: Option<String>,
    gemini_api_url: String,
    gemini_api_key: Option<String>,
    gemini_model: String,
    email_enabled: bool,
    smtp_host: Option<String>,
    smtp_port: Option<u16>,
    smtp_user: Option<String>,
    smtp_password: Option<String>,
    smtp_from: Option<String>,
    smtp_tls: bool,
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.trim().is_empty())
}

fn env_parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn env_bool_or(key: &str, default: bool) -> bool {
    env::var(key)
        .map(|s| matches!(s.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(default)
}

fn env_list_or(key: &str, default: &[&str]) -> Vec<String> {
    env::var(key)
        .map(|s| {
            s.split(',')
                .map(|p| p.trim().to_lowercase())
                .filter(|p| !p.is_empty())
                .collect()
        })
        .unwrap_or_else(|_| default.iter().map(|s| s.to_string()).collect())
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let max_upload_size_mb: usize =
            env_parse_or("MAX_UPLOAD_SIZE_MB", DEFAULT_MAX_UPLOAD_SIZE_MB);

        Ok(Self {
            server_port: env_parse_or("PORT", DEFAULT_SERVER_PORT),
            cors_origins: env_list_or("CORS_ORIGINS", &[]),
            environment: env_or("ENVIRONMENT", "development"),
            public_base_url: env_or("PUBLIC_BASE_URL", "http://localhost:3000"),
            upload_dir: env_or("UPLOAD_DIR", "./uploads"),
            max_upload_size_bytes: max_upload_size_mb * 1024 * 1024,
            upload_allowed_extensions: env_list_or(
                "UPLOAD_ALLOWED_EXTENSIONS",
                &["jpg", "jpeg", "png", "gif", "webp", "pdf"],
            ),
            upload_allowed_content_types: env_list_or(
                "UPLOAD_ALLOWED_CONTENT_TYPES",
                &[
                    "image/jpeg",
                    "image/png",
                    "image/gif",
                    "image/webp",
                    "application/pdf",
                ],
            ),
            upload_token_ttl_days: env_parse_or(
                "UPLOAD_TOKEN_TTL_DAYS",
                DEFAULT_UPLOAD_TOKEN_TTL_DAYS,
            ),
            business_api_url: env_or("BUSINESS_API_URL", DEFAULT_BUSINESS_API_URL),
            business_api_key: env_opt("BUSINESS_API_KEY"),
            gemini_api_url: env_or("GEMINI_API_URL", DEFAULT_GEMINI_API_URL),
            gemini_api_key: env_opt("GEMINI_API_KEY"),
            gemini_model: env_or("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
            email_enabled: env_bool_or("EMAIL_ENABLED", false),
            smtp_host: env_opt("SMTP_HOST"),
            smtp_port: env_opt("SMTP_PORT").and_then(|s| s.parse().ok()),
            smtp_user: env_opt("SMTP_USER"),
            smtp_password: env_opt("SMTP_PASSWORD"),
            smtp_from: env_opt("SMTP_FROM"),
            smtp_tls: env_bool_or("SMTP_TLS", true),
        })
    }

    /// Fail fast on misconfiguration.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.max_upload_size_bytes == 0 {
            anyhow::bail!("MAX_UPLOAD_SIZE_MB must be greater than 0");
        }
        if self.upload_token_ttl_days <= 0 {
            anyhow::bail!("UPLOAD_TOKEN_TTL_DAYS must be greater than 0");
        }
        if self.email_enabled && (self.smtp_host.is_none() || self.smtp_from.is_none()) {
            anyhow::bail!("EMAIL_ENABLED=true requires SMTP_HOST and SMTP_FROM");
        }
        if self.upload_allowed_content_types.is_empty() {
            anyhow::bail!("UPLOAD_ALLOWED_CONTENT_TYPES must not be empty");
        }
        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn public_base_url(&self) -> &str {
        &self.public_base_url
    }

    pub fn upload_dir(&self) -> &str {
        &self.upload_dir
    }

    pub fn max_upload_size_bytes(&self) -> usize {
        self.max_upload_size_bytes
    }

    pub fn upload_allowed_extensions(&self) -> &[String] {
        &self.upload_allowed_extensions
    }

    pub fn upload_allowed_content_types(&self) -> &[String] {
        &self.upload_allowed_content_types
    }

    pub fn upload_token_ttl_days(&self) -> i64 {
        self.upload_token_ttl_days
    }

    pub fn business_api_url(&self) -> &str {
        &self.business_api_url
    }

    pub fn business_api_key(&self) -> Option<&str> {
        self.business_api_key.as_deref()
    }

    pub fn gemini_api_url(&self) -> &str {
        &self.gemini_api_url
    }

    pub fn gemini_api_key(&self) -> Option<&str> {
        self.gemini_api_key.as_deref()
    }

    pub fn gemini_model(&self) -> &str {
        &self.gemini_model
    }

    pub fn email_enabled(&self) -> bool {
        self.email_enabled
    }

    pub fn smtp_host(&self) -> Option<&str> {
        self.smtp_host.as_deref()
    }

    pub fn smtp_port(&self) -> Option<u16> {
        self.smtp_port
    }

    pub fn smtp_user(&self) -> Option<&str> {
        self.smtp_user.as_deref()
    }

    pub fn smtp_password(&self) -> Option<&str> {
        self.smtp_password.as_deref()
    }

    pub fn smtp_from(&self) -> Option<&str> {
        self.smtp_from.as_deref()
    }

    pub fn smtp_tls(&self) -> bool {
        self.smtp_tls
    }
}
