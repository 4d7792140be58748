//! Agent Proxy Backend
//!
//! Talks to a server-side proxy that holds the model credential. The proxy
//! accepts `{role, contents, schema, systemInstruction}` and answers with
//! `{text}` on success or `{error}` otherwise.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::provider::{parse_http_error, GenerationBackend};
use super::types::{BackendConfig, GenerationRequest, GenerationResponse, LlmError, LlmResult};
use crate::http_client::build_http_client;
use career_copilot_core::schema::OutputSchema;

/// Agent proxy backend
pub struct AgentProxyBackend {
    config: BackendConfig,
    endpoint: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProxyRequest<'a> {
    role: &'a str,
    contents: &'a str,
    schema: &'a OutputSchema,
    system_instruction: &'a str,
}

#[derive(Debug, Deserialize)]
struct ProxyReply {
    text: Option<String>,
}

impl AgentProxyBackend {
    /// Create a new proxy backend. `config.base_url` is the full endpoint URL.
    pub fn new(config: BackendConfig) -> LlmResult<Self> {
        let endpoint = config
            .base_url
            .clone()
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| LlmError::InvalidRequest {
                message: "agent_proxy backend requires base_url".to_string(),
            })?;
        let client = build_http_client(config.proxy.as_ref())?;
        Ok(Self {
            config,
            endpoint,
            client,
        })
    }

    fn parse_reply(&self, body: &str) -> LlmResult<GenerationResponse> {
        let reply: ProxyReply = serde_json::from_str(body).map_err(|e| LlmError::ParseError {
            message: format!("Failed to parse proxy reply: {}", e),
        })?;
        let text = reply
            .text
            .filter(|t| !t.trim().is_empty())
            .ok_or(LlmError::EmptyResponse)?;
        Ok(GenerationResponse {
            text,
            model: self.config.model.clone(),
            usage: Default::default(),
        })
    }
}

#[async_trait]
impl GenerationBackend for AgentProxyBackend {
    fn name(&self) -> &'static str {
        "agent_proxy"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn generate(&self, request: GenerationRequest) -> LlmResult<GenerationResponse> {
        let payload = ProxyRequest {
            role: &request.agent,
            contents: &request.prompt,
            schema: &request.schema,
            system_instruction: &request.system_instruction,
        };

        tracing::debug!(agent = %request.agent, endpoint = %self.endpoint, "[AgentProxyBackend] POST");

        let mut builder = self.client.post(&self.endpoint).json(&payload);
        if let Some(key) = &self.config.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await.map_err(|e| LlmError::NetworkError {
            message: e.to_string(),
        })?;

        let status = response.status();
        let body_text = response.text().await.map_err(|e| LlmError::NetworkError {
            message: e.to_string(),
        })?;

        if !status.is_success() {
            return Err(parse_http_error(status.as_u16(), &body_text, "agent_proxy"));
        }

        self.parse_reply(&body_text)
    }

    fn config(&self) -> &BackendConfig {
        &self.config
    }
}
