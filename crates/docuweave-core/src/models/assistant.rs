use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use utoipa::ToSchema;

/// Kind of business document the assistant works with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Quote,
    Contract,
    Invoice,
}

impl Display for DocumentKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DocumentKind::Quote => write!(f, "quote"),
            DocumentKind::Contract => write!(f, "contract"),
            DocumentKind::Invoice => write!(f, "invoice"),
        }
    }
}

impl FromStr for DocumentKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quote" => Ok(DocumentKind::Quote),
            "contract" => Ok(DocumentKind::Contract),
            "invoice" => Ok(DocumentKind::Invoice),
            _ => Err(anyhow::anyhow!("Invalid document kind: {}", s)),
        }
    }
}

/// One line item extracted from a receipt or invoice.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedItem {
    pub name: Option<String>,
    pub quantity: Option<f64>,
    pub price: Option<f64>,
}

/// Structured data extracted from an uploaded document by the model.
///
/// Fields the model could not find are `None`. When the model answer cannot
/// be parsed as JSON, [`ExtractedDocument::fallback`] is returned instead of
/// an error: `document_type` becomes "other", the raw answer is preserved,
/// and confidence drops to 0.5.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedDocument {
    pub document_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<ExtractedItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl ExtractedDocument {
    /// Best-effort result when the model answer is not valid JSON.
    pub fn fallback(raw_text: String) -> Self {
        Self {
            document_type: "other".to_string(),
            date: None,
            vendor: None,
            items: Vec::new(),
            tax_amount: None,
            total_amount: None,
            additional_info: None,
            raw_text: Some(raw_text),
            confidence: Some(0.5),
        }
    }
}

/// A generated business document plus its provenance.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GeneratedDocument {
    pub kind: DocumentKind,
    pub title: String,
    pub content: String,
    pub template_id: String,
    pub model: String,
    pub created_at: DateTime<Utc>,
}

/// Estimated token consumption and cost of one model call.
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub total_tokens: u64,
    pub cost_usd: f64,
}
