//! Business registration status lookup.
//!
//! Thin passthrough over the national tax service status API: the cleaned
//! 10-digit number goes out, the registry's status/tax-type/closure-date
//! fields come back unmodified. Validation runs before any external call.
//! Transport failures get a short bounded retry (the lookup is an idempotent
//! read); upstream 401/429 are forwarded as-is without retrying.

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

use docuweave_core::models::{normalize_business_number, BusinessStatusResponse};
use docuweave_core::{AppError, Config};

const SERVICE_NAME: &str = "business registry";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_RETRIES: u32 = 2;
const RETRY_BACKOFF_MS: u64 = 200;

/// Registry API client seam, mockable in tests.
#[async_trait]
pub trait RegistryClient: Send + Sync {
    /// Query the registry with an already-normalized 10-digit number.
    async fn status(&self, business_number: &str) -> Result<BusinessStatusResponse, AppError>;
}

pub struct HttpRegistryClient {
    http_client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
}

impl HttpRegistryClient {
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let http_client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self {
            http_client,
            api_url: config.business_api_url().to_string(),
            api_key: config.business_api_key().map(|s| s.to_string()),
        })
    }
}

#[async_trait]
impl RegistryClient for HttpRegistryClient {
    async fn status(&self, business_number: &str) -> Result<BusinessStatusResponse, AppError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            AppError::Internal("BUSINESS_API_KEY is not configured".to_string())
        })?;

        let response = self
            .http_client
            .post(&self.api_url)
            .query(&[("serviceKey", api_key)])
            .json(&json!({ "b_no": [business_number] }))
            .send()
            .await
            .map_err(|e| AppError::ExternalService {
                service: SERVICE_NAME.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "Registry API error");
            return Err(match status.as_u16() {
                401 => AppError::UpstreamStatus {
                    service: SERVICE_NAME.to_string(),
                    status: 401,
                    message: "API 인증 오류입니다. API 키를 확인해주세요.".to_string(),
                },
                429 => AppError::UpstreamStatus {
                    service: SERVICE_NAME.to_string(),
                    status: 429,
                    message: "API 호출 한도를 초과했습니다. 잠시 후 다시 시도해주세요."
                        .to_string(),
                },
                _ => AppError::ExternalService {
                    service: SERVICE_NAME.to_string(),
                    message: format!("registry answered {}", status),
                },
            });
        }

        let parsed: BusinessStatusResponse =
            response.json().await.map_err(|e| AppError::ExternalService {
                service: SERVICE_NAME.to_string(),
                message: format!("invalid registry response: {}", e),
            })?;

        if parsed.status_code != "OK" {
            return Err(AppError::Validation(format!(
                "조회에 실패했습니다. (status_code: {})",
                parsed.status_code
            )));
        }
        Ok(parsed)
    }
}

#[derive(Clone)]
pub struct BusinessLookupService {
    client: Arc<dyn RegistryClient>,
}

impl BusinessLookupService {
    pub fn new(client: Arc<dyn RegistryClient>) -> Self {
        Self { client }
    }

    /// Normalize, validate, then query the registry.
    ///
    /// A malformed number never reaches the external call. Transport errors
    /// are retried up to [`MAX_RETRIES`] times with a short backoff; anything
    /// else surfaces immediately.
    pub async fn lookup(&self, raw_number: &str) -> Result<BusinessStatusResponse, AppError> {
        let number = normalize_business_number(raw_number)?;

        let mut attempt = 0;
        loop {
            match self.client.status(&number).await {
                Ok(response) => return Ok(response),
                Err(err @ AppError::ExternalService { .. }) if attempt < MAX_RETRIES => {
                    attempt += 1;
                    tracing::warn!(
                        attempt,
                        error = %err,
                        "Registry lookup failed, retrying"
                    );
                    tokio::time::sleep(Duration::from_millis(RETRY_BACKOFF_MS * attempt as u64))
                        .await;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docuweave_core::models::BusinessStatusItem;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct MockRegistryClient {
        calls: AtomicU32,
        failures_before_success: u32,
    }

    impl MockRegistryClient {
        fn new(failures_before_success: u32) -> Self {
            Self {
                calls: AtomicU32::new(0),
                failures_before_success,
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RegistryClient for MockRegistryClient {
        async fn status(&self, business_number: &str) -> Result<BusinessStatusResponse, AppError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures_before_success {
                return Err(AppError::ExternalService {
                    service: "business registry".to_string(),
                    message: "connection reset".to_string(),
                });
            }
            Ok(BusinessStatusResponse {
                status_code: "OK".to_string(),
                match_cnt: Some(1),
                request_cnt: Some(1),
                data: vec![BusinessStatusItem {
                    b_no: business_number.to_string(),
                    b_stt: Some("계속사업자".to_string()),
                    b_stt_cd: Some("01".to_string()),
                    tax_type: Some("부가가치세 일반과세자".to_string()),
                    tax_type_cd: Some("01".to_string()),
                    end_dt: Some(String::new()),
                    utcc_yn: None,
                    tax_type_change_dt: None,
                    invoice_apply_dt: None,
                }],
            })
        }
    }

    #[tokio::test]
    async fn test_hyphenated_and_plain_numbers_reach_the_same_query() {
        let client = Arc::new(MockRegistryClient::new(0));
        let service = BusinessLookupService::new(client.clone());

        let with_hyphens = service.lookup("123-45-67890").await.unwrap();
        let plain = service.lookup("1234567890").await.unwrap();
        assert_eq!(with_hyphens.data[0].b_no, plain.data[0].b_no);
        assert_eq!(with_hyphens.data[0].b_no, "1234567890");
    }

    /// A malformed number must fail before the external client is touched.
    #[tokio::test]
    async fn test_malformed_number_never_reaches_the_client() {
        let client = Arc::new(MockRegistryClient::new(0));
        let service = BusinessLookupService::new(client.clone());

        let err = service.lookup("12345").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(client.calls(), 0);
    }

    #[tokio::test]
    async fn test_transport_errors_are_retried() {
        let client = Arc::new(MockRegistryClient::new(2));
        let service = BusinessLookupService::new(client.clone());

        let response = service.lookup("1234567890").await.unwrap();
        assert_eq!(response.status_code, "OK");
        assert_eq!(client.calls(), 3);
    }

    struct RateLimitedClient {
        calls: AtomicU32,
    }

    #[async_trait]
    impl RegistryClient for RateLimitedClient {
        async fn status(&self, _: &str) -> Result<BusinessStatusResponse, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(AppError::UpstreamStatus {
                service: "business registry".to_string(),
                status: 429,
                message: "rate limited".to_string(),
            })
        }
    }

    /// Upstream 429 is forwarded without retries.
    #[tokio::test]
    async fn test_upstream_status_is_not_retried() {
        let client = Arc::new(RateLimitedClient {
            calls: AtomicU32::new(0),
        });
        let service = BusinessLookupService::new(client.clone());

        let err = service.lookup("1234567890").await.unwrap_err();
        assert!(matches!(err, AppError::UpstreamStatus { status: 429, .. }));
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
    }
}
