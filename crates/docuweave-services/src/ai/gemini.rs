//! Gemini client for multimodal extraction and document generation.

use async_trait::async_trait;
use base64::Engine;
use chrono::Utc;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::LazyLock;
use std::time::Duration;

use docuweave_core::models::{DocumentKind, ExtractedDocument, GeneratedDocument};
use docuweave_core::{templates, AppError, Config};

use super::usage;
use super::{AssistantClient, ExtractionResult, GenerateRequest, GenerationResult};

const SERVICE_NAME: &str = "generative model";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

static JSON_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```json\s*(.*?)\s*```").expect("fence pattern is valid"));
static JSON_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("object pattern is valid"));

pub struct GeminiClient {
    http_client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
    model: String,
}

// generateContent request/response structures

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(rename = "inlineData", skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(rename = "usageMetadata")]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    prompt_token_count: Option<u64>,
    candidates_token_count: Option<u64>,
}

impl GeminiClient {
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let http_client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self {
            http_client,
            api_url: config.gemini_api_url().to_string(),
            api_key: config.gemini_api_key().map(|s| s.to_string()),
            model: config.gemini_model().to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn extraction_prompt() -> String {
        r#"당신은 문서에서 정보를 추출하는 전문가입니다.
이 문서(영수증, 청구서, 계약서 등)에서 중요한 정보를 정확하게 추출해주세요.

추출한 데이터는 반드시 다음과 같은 JSON 형식으로 반환해주세요:
{
  "documentType": "receipt|invoice|contract|other",
  "date": "날짜 (YYYY-MM-DD 형식)",
  "vendor": "업체명",
  "items": [
    {
      "name": "항목명",
      "quantity": 수량,
      "price": 가격
    }
  ],
  "taxAmount": 세금액,
  "totalAmount": 총액,
  "additionalInfo": "기타 중요 정보"
}

문서에서 찾을 수 없는 필드는 null로 표시하세요.
반드시 유효한 JSON 형식으로만 응답하세요."#
            .to_string()
    }

    fn generation_prompt(
        kind: DocumentKind,
        base_document: &str,
        request: &GenerateRequest,
    ) -> String {
        let kind_korean = match kind {
            DocumentKind::Quote => "견적서",
            DocumentKind::Contract => "계약서",
            DocumentKind::Invoice => "청구서",
        };
        format!(
            r#"당신은 전문적인 {kind} 작성 전문가입니다.
아래 템플릿과 프로젝트 정보를 바탕으로 빈 칸([...])을 채워서 완성된 {kind}를 작성해주세요.

중요 사항:
1. 기존 템플릿 구조를 유지하면서 빈 칸만 채워주세요
2. 프로젝트 정보를 바탕으로 적절한 항목과 금액을 계산해주세요
3. 한국어로 전문적이고 명확하게 작성해주세요
4. 금액은 원화(₩)로 표시하고 천 단위 구분 쉼표를 사용하세요
5. VAT는 10%로 계산해주세요

템플릿:
{template}

프로젝트 정보:
{prompt}"#,
            kind = kind_korean,
            template = base_document,
            prompt = request.prompt,
        )
    }

    /// Pull a JSON object out of the model answer, tolerating ```json fences
    /// and surrounding prose.
    fn parse_extraction(text: &str) -> Option<ExtractedDocument> {
        let candidate = JSON_FENCE
            .captures(text)
            .map(|caps| caps[1].to_string())
            .or_else(|| JSON_OBJECT.find(text).map(|m| m.as_str().to_string()))
            .unwrap_or_else(|| text.to_string());
        serde_json::from_str(&candidate).ok()
    }

    async fn generate_content(&self, parts: Vec<Part>) -> Result<(String, u64, u64), AppError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::Internal("GEMINI_API_KEY is not configured".to_string()))?;

        let url = format!(
            "{}/models/{}:generateContent",
            self.api_url, self.model
        );
        let body = GenerateContentRequest {
            contents: vec![Content { parts }],
        };

        let response = self
            .http_client
            .post(&url)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::ExternalService {
                service: SERVICE_NAME.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, detail = %detail, "Model API error");
            return Err(AppError::ExternalService {
                service: SERVICE_NAME.to_string(),
                message: format!("model API answered {}", status),
            });
        }

        let parsed: GenerateContentResponse =
            response.json().await.map_err(|e| AppError::ExternalService {
                service: SERVICE_NAME.to_string(),
                message: format!("invalid model response: {}", e),
            })?;

        let text: String = parsed
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();
        if text.is_empty() {
            return Err(AppError::ExternalService {
                service: SERVICE_NAME.to_string(),
                message: "model returned no content".to_string(),
            });
        }

        let (input_tokens, output_tokens) = match parsed.usage_metadata {
            Some(meta) => (
                meta.prompt_token_count.unwrap_or(0),
                meta.candidates_token_count
                    .unwrap_or_else(|| usage::estimate_tokens(&text)),
            ),
            None => (0, usage::estimate_tokens(&text)),
        };
        Ok((text, input_tokens, output_tokens))
    }
}

#[async_trait]
impl AssistantClient for GeminiClient {
    async fn extract_document(
        &self,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<ExtractionResult, AppError> {
        let mime_type = if content_type.trim().is_empty() {
            "image/jpeg".to_string()
        } else {
            content_type.to_string()
        };
        let prompt = Self::extraction_prompt();
        let encoded = base64::engine::general_purpose::STANDARD.encode(&data);
        let estimated_input =
            usage::estimate_tokens(&prompt) + (encoded.len() as f64 * 0.75).ceil() as u64;

        let parts = vec![
            Part {
                text: None,
                inline_data: Some(InlineData {
                    mime_type,
                    data: encoded,
                }),
            },
            Part {
                text: Some(prompt),
                inline_data: None,
            },
        ];

        let (answer, input_tokens, output_tokens) = self.generate_content(parts).await?;
        let input_tokens = if input_tokens == 0 {
            estimated_input
        } else {
            input_tokens
        };

        // Graceful degrade: an unparseable answer is not a failure.
        let extracted = Self::parse_extraction(&answer).unwrap_or_else(|| {
            tracing::warn!("Model answer was not valid JSON, returning fallback extraction");
            ExtractedDocument::fallback(answer)
        });

        Ok(ExtractionResult {
            data: extracted,
            model: self.model.clone(),
            token_usage: usage::usage_for(input_tokens, output_tokens, &self.model),
        })
    }

    async fn generate_document(
        &self,
        request: GenerateRequest,
    ) -> Result<GenerationResult, AppError> {
        let template = request
            .template_id
            .as_deref()
            .and_then(templates::by_id)
            .unwrap_or_else(|| templates::default_for(request.document_type));

        let base_document = templates::apply_data(
            template.template,
            &request.client_data,
            &request.project_data,
            &BTreeMap::new(),
            Utc::now().date_naive(),
        );
        let prompt = Self::generation_prompt(request.document_type, &base_document, &request);
        let estimated_input = usage::estimate_tokens(&prompt);

        let parts = vec![Part {
            text: Some(prompt),
            inline_data: None,
        }];
        let (content, input_tokens, output_tokens) = self.generate_content(parts).await?;
        let input_tokens = if input_tokens == 0 {
            estimated_input
        } else {
            input_tokens
        };

        Ok(GenerationResult {
            data: GeneratedDocument {
                kind: request.document_type,
                title: template.name.to_string(),
                content,
                template_id: template.id.to_string(),
                model: self.model.clone(),
                created_at: Utc::now(),
            },
            token_usage: usage::usage_for(input_tokens, output_tokens, &self.model),
        })
    }
}
