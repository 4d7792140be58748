//! LLM Types
//!
//! Core types for generation backend interactions.

use serde::{Deserialize, Serialize};

use career_copilot_core::proxy::ProxyConfig;
use career_copilot_core::schema::OutputSchema;

/// Supported generation backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendType {
    /// Google Gemini REST API, called directly with the configured key
    Gemini,
    /// Server-side proxy exposing the `{role, contents, schema, systemInstruction}` contract
    AgentProxy,
    /// Any OpenAI-compatible chat completions endpoint
    #[serde(rename = "openai")]
    OpenAI,
}

impl std::fmt::Display for BackendType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendType::Gemini => write!(f, "gemini"),
            BackendType::AgentProxy => write!(f, "agent_proxy"),
            BackendType::OpenAI => write!(f, "openai"),
        }
    }
}

/// Configuration for a generation backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// The backend type
    pub backend: BackendType,
    /// API key (not needed for the agent proxy). Read from a hand-written
    /// config file or the environment; never written back to disk.
    #[serde(skip_serializing, default)]
    pub api_key: Option<String>,
    /// Endpoint override (required for the agent proxy)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Model name to use
    pub model: String,
    /// Default sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Optional cap on generated tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    /// Outbound proxy for backend calls
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub proxy: Option<ProxyConfig>,
}

fn default_temperature() -> f32 {
    0.1
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            backend: BackendType::Gemini,
            api_key: None,
            base_url: None,
            model: "gemini-3-flash-preview".to_string(),
            temperature: default_temperature(),
            max_output_tokens: None,
            proxy: None,
        }
    }
}

/// One agent's generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Display label of the requesting agent (routing/logging only)
    pub agent: String,
    /// Role-specific system instruction
    pub system_instruction: String,
    /// User-turn prompt text
    pub prompt: String,
    /// Requested output shape
    pub schema: OutputSchema,
}

/// Token usage statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageStats {
    /// Number of input/prompt tokens
    pub input_tokens: u32,
    /// Number of output/completion tokens
    pub output_tokens: u32,
}

impl UsageStats {
    /// Total tokens used
    pub fn total_tokens(&self) -> u32 {
        self.input_tokens.saturating_add(self.output_tokens)
    }
}

/// Successful reply from a backend: the raw text, not yet normalized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub text: String,
    /// The model that generated the response
    pub model: String,
    #[serde(default)]
    pub usage: UsageStats,
}

/// Error types for backend operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LlmError {
    /// Authentication failed (invalid or missing API key)
    AuthenticationFailed { message: String },
    /// Rate limit exceeded
    RateLimited { message: String },
    /// Model not found or not available
    ModelNotFound { model: String },
    /// Invalid request (bad parameters)
    InvalidRequest { message: String },
    /// Server error reported by the backend
    ServerError {
        message: String,
        status: Option<u16>,
    },
    /// Network/connection error
    NetworkError { message: String },
    /// Response envelope could not be parsed
    ParseError { message: String },
    /// Backend answered successfully but produced no text
    EmptyResponse,
    /// Other error
    Other { message: String },
}

impl std::fmt::Display for LlmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LlmError::AuthenticationFailed { message } => {
                write!(f, "Authentication failed: {}", message)
            }
            LlmError::RateLimited { message } => write!(f, "Rate limited: {}", message),
            LlmError::ModelNotFound { model } => write!(f, "Model not found: {}", model),
            LlmError::InvalidRequest { message } => write!(f, "Invalid request: {}", message),
            LlmError::ServerError { message, status } => {
                if let Some(s) = status {
                    write!(f, "Server error ({}): {}", s, message)
                } else {
                    write!(f, "Server error: {}", message)
                }
            }
            LlmError::NetworkError { message } => write!(f, "Network error: {}", message),
            LlmError::ParseError { message } => write!(f, "Parse error: {}", message),
            LlmError::EmptyResponse => write!(f, "Model returned no text output."),
            LlmError::Other { message } => write!(f, "Error: {}", message),
        }
    }
}

impl std::error::Error for LlmError {}

/// Result type for backend operations
pub type LlmResult<T> = Result<T, LlmError>;
