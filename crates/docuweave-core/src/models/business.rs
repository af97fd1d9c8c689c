use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;

/// Payload for a business registration lookup.
#[derive(Debug, Deserialize, ToSchema)]
pub struct BusinessLookupRequest {
    pub business_number: String,
}

/// One registry entry, passed through from the national tax service API
/// unmodified (field names follow the upstream wire format).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BusinessStatusItem {
    /// Registration number (10 digits)
    pub b_no: String,
    /// Status text, e.g. "계속사업자"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub b_stt: Option<String>,
    /// Status code: 01 active, 02 suspended, 03 closed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub b_stt_cd: Option<String>,
    /// Tax type text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_type_cd: Option<String>,
    /// Closure date (YYYYMMDD), empty unless closed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_dt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utcc_yn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_type_change_dt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_apply_dt: Option<String>,
}

/// Registry answer for a status lookup.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BusinessStatusResponse {
    pub status_code: String,
    #[serde(default)]
    pub match_cnt: Option<u32>,
    #[serde(default)]
    pub request_cnt: Option<u32>,
    #[serde(default)]
    pub data: Vec<BusinessStatusItem>,
}

/// Strip hyphens and validate that exactly 10 digits remain.
///
/// Runs before any external call; a malformed number never reaches the
/// registry API.
pub fn normalize_business_number(raw: &str) -> Result<String, AppError> {
    let cleaned: String = raw.chars().filter(|c| *c != '-').collect();
    if cleaned.len() != 10 || !cleaned.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::Validation(
            "Business registration number must be exactly 10 digits".to_string(),
        ));
    }
    Ok(cleaned)
}
