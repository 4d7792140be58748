//! Gemini Backend
//!
//! Implementation of the GenerationBackend trait for Google's Gemini
//! `generateContent` API. The requested output shape is forwarded as a
//! `responseSchema` with `responseMimeType: application/json`; Gemini usually
//! honors it, but the reply is still treated as untrusted text.

use async_trait::async_trait;
use serde::Deserialize;

use super::provider::{missing_api_key_error, parse_http_error, GenerationBackend};
use super::types::{
    BackendConfig, GenerationRequest, GenerationResponse, LlmError, LlmResult, UsageStats,
};
use crate::http_client::build_http_client;

/// Default Gemini API base
const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini backend
pub struct GeminiBackend {
    config: BackendConfig,
    client: reqwest::Client,
}

impl GeminiBackend {
    /// Create a new Gemini backend with the given configuration
    pub fn new(config: BackendConfig) -> LlmResult<Self> {
        let client = build_http_client(config.proxy.as_ref())?;
        Ok(Self { config, client })
    }

    fn endpoint(&self) -> String {
        let base = self
            .config
            .base_url
            .as_deref()
            .unwrap_or(GEMINI_API_BASE)
            .trim_end_matches('/');
        format!("{}/models/{}:generateContent", base, self.config.model)
    }

    /// Build the request body for the API
    fn build_request_body(&self, request: &GenerationRequest) -> serde_json::Value {
        let mut generation_config = serde_json::json!({
            "responseMimeType": "application/json",
            "responseSchema": request.schema,
            "temperature": self.config.temperature,
        });
        if let Some(max) = self.config.max_output_tokens {
            generation_config["maxOutputTokens"] = serde_json::json!(max);
        }

        serde_json::json!({
            "systemInstruction": { "parts": [{ "text": request.system_instruction }] },
            "contents": [{ "role": "user", "parts": [{ "text": request.prompt }] }],
            "generationConfig": generation_config,
        })
    }

    /// Parse a response from the Gemini API
    fn parse_response(&self, response: GeminiResponse) -> LlmResult<GenerationResponse> {
        if let Some(reason) = response
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_ref())
        {
            return Err(LlmError::InvalidRequest {
                message: format!("prompt blocked: {}", reason),
            });
        }

        let text: String = response
            .candidates
            .iter()
            .take(1)
            .filter_map(|c| c.content.as_ref())
            .flat_map(|content| content.parts.iter())
            .filter(|part| !part.thought)
            .filter_map(|part| part.text.as_deref())
            .collect();

        if text.trim().is_empty() {
            return Err(LlmError::EmptyResponse);
        }

        let usage = response
            .usage_metadata
            .map(|u| UsageStats {
                input_tokens: u.prompt_token_count,
                output_tokens: u.candidates_token_count,
            })
            .unwrap_or_default();

        Ok(GenerationResponse {
            text,
            model: response
                .model_version
                .unwrap_or_else(|| self.config.model.clone()),
            usage,
        })
    }
}

#[async_trait]
impl GenerationBackend for GeminiBackend {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn generate(&self, request: GenerationRequest) -> LlmResult<GenerationResponse> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or_else(|| missing_api_key_error("gemini"))?;

        let body = self.build_request_body(&request);

        tracing::debug!(agent = %request.agent, model = %self.config.model, "[GeminiBackend] generateContent");

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::NetworkError {
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        let body_text = response.text().await.map_err(|e| LlmError::NetworkError {
            message: e.to_string(),
        })?;

        if status != 200 {
            return Err(parse_http_error(status, &body_text, "gemini"));
        }

        let gemini_response: GeminiResponse =
            serde_json::from_str(&body_text).map_err(|e| LlmError::ParseError {
                message: format!("Failed to parse response: {}", e),
            })?;

        self.parse_response(gemini_response)
    }

    fn config(&self) -> &BackendConfig {
        &self.config
    }
}

/// Gemini API response format
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
    prompt_feedback: Option<PromptFeedback>,
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}
