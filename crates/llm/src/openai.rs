//! OpenAI Backend
//!
//! Implementation of the GenerationBackend trait for OpenAI-compatible chat
//! completion endpoints. The output shape travels as a strict-off
//! `json_schema` response format. That format only takes an object at the
//! root, so list shapes are wrapped under [`WRAPPED_KEY`] on the way out and
//! unwrapped from the reply.

use async_trait::async_trait;
use career_copilot_core::schema::{OutputSchema, SchemaType};
use serde::Deserialize;

use super::provider::{missing_api_key_error, parse_http_error, GenerationBackend};
use super::types::{
    BackendConfig, GenerationRequest, GenerationResponse, LlmError, LlmResult, UsageStats,
};
use crate::http_client::build_http_client;

/// Default OpenAI API endpoint
const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Property holding a non-object output inside the wrapper object
pub const WRAPPED_KEY: &str = "items";

/// OpenAI backend
pub struct OpenAIBackend {
    config: BackendConfig,
    client: reqwest::Client,
}

impl OpenAIBackend {
    /// Create a new OpenAI backend with the given configuration
    pub fn new(config: BackendConfig) -> LlmResult<Self> {
        let client = build_http_client(config.proxy.as_ref())?;
        Ok(Self { config, client })
    }

    /// Get the API base URL
    fn base_url(&self) -> &str {
        self.config.base_url.as_deref().unwrap_or(OPENAI_API_URL)
    }

    /// Schema names are restricted to `[a-zA-Z0-9_-]`.
    fn schema_name(agent: &str) -> String {
        let name: String = agent
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        if name.is_empty() {
            "agent_output".to_string()
        } else {
            name
        }
    }

    /// Root schema for `response_format`, and whether it wraps the real shape.
    fn response_schema(schema: &OutputSchema) -> (serde_json::Value, bool) {
        if schema.schema_type == SchemaType::Object {
            return (schema.to_json_schema(), false);
        }
        let wrapped = serde_json::json!({
            "type": "object",
            "properties": { WRAPPED_KEY: schema.to_json_schema() },
            "required": [WRAPPED_KEY],
        });
        (wrapped, true)
    }

    /// Pull the wrapped value back out. Replies that are not the wrapper
    /// object pass through untouched.
    fn unwrap_reply(text: String) -> String {
        match serde_json::from_str::<serde_json::Value>(&text) {
            Ok(serde_json::Value::Object(mut map)) if map.len() == 1 => {
                match map.remove(WRAPPED_KEY) {
                    Some(inner) => inner.to_string(),
                    None => text,
                }
            }
            _ => text,
        }
    }

    /// Build the request body for the API
    fn build_request_body(&self, request: &GenerationRequest) -> serde_json::Value {
        let mut body = serde_json::json!({
            "model": self.config.model,
            "temperature": self.config.temperature,
            "messages": [
                { "role": "system", "content": request.system_instruction },
                { "role": "user", "content": request.prompt },
            ],
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": Self::schema_name(&request.agent),
                    "schema": Self::response_schema(&request.schema).0,
                    "strict": false,
                },
            },
        });

        if let Some(max) = self.config.max_output_tokens {
            body["max_tokens"] = serde_json::json!(max);
        }

        body
    }

    /// Parse a response from the OpenAI API
    fn parse_response(
        &self,
        response: OpenAIResponse,
        wrapped: bool,
    ) -> LlmResult<GenerationResponse> {
        let choice = response.choices.into_iter().next();

        if let Some(refusal) = choice
            .as_ref()
            .and_then(|c| c.message.refusal.as_ref())
            .filter(|r| !r.is_empty())
        {
            return Err(LlmError::InvalidRequest {
                message: format!("model refused: {}", refusal),
            });
        }

        let text = choice
            .and_then(|c| c.message.content)
            .filter(|t| !t.trim().is_empty())
            .ok_or(LlmError::EmptyResponse)?;
        let text = if wrapped { Self::unwrap_reply(text) } else { text };

        let usage = response
            .usage
            .map(|u| UsageStats {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
            })
            .unwrap_or_default();

        Ok(GenerationResponse {
            text,
            model: response.model.unwrap_or_else(|| self.config.model.clone()),
            usage,
        })
    }
}

#[async_trait]
impl GenerationBackend for OpenAIBackend {
    fn name(&self) -> &'static str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn generate(&self, request: GenerationRequest) -> LlmResult<GenerationResponse> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or_else(|| missing_api_key_error("openai"))?;

        let body = self.build_request_body(&request);

        tracing::debug!(agent = %request.agent, model = %self.config.model, "[OpenAIBackend] chat completion");

        let response = self
            .client
            .post(self.base_url())
            .header("Authorization", format!("Bearer {}", api_key))
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
            return Err(parse_http_error(status, &body_text, "openai"));
        }

        let openai_response: OpenAIResponse =
            serde_json::from_str(&body_text).map_err(|e| LlmError::ParseError {
                message: format!("Failed to parse response: {}", e),
            })?;

        let (_, wrapped) = Self::response_schema(&request.schema);
        self.parse_response(openai_response, wrapped)
    }

    fn config(&self) -> &BackendConfig {
        &self.config
    }
}

/// OpenAI API response format
#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    model: Option<String>,
    usage: Option<OpenAIUsage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
    refusal: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}
