//! Generation Backend Trait
//!
//! Defines the common interface for all text-generation backends.

use async_trait::async_trait;

use super::types::{BackendConfig, GenerationRequest, GenerationResponse, LlmError, LlmResult};

/// Trait that all generation backends must implement.
///
/// A backend performs exactly one remote call per `generate` invocation. It
/// never retries and never inspects the returned text beyond unwrapping the
/// transport envelope; retries and JSON extraction belong to the caller.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Returns the backend name for identification.
    fn name(&self) -> &'static str;

    /// Returns the current model being used.
    fn model(&self) -> &str;

    /// Submit one request and return the raw reply text.
    async fn generate(&self, request: GenerationRequest) -> LlmResult<GenerationResponse>;

    /// Get the configuration for this backend.
    fn config(&self) -> &BackendConfig;
}

/// Helper function to create an error for missing API key
pub fn missing_api_key_error(backend: &str) -> LlmError {
    LlmError::AuthenticationFailed {
        message: format!("API key not configured for {}", backend),
    }
}

/// Pull a human-readable message out of an error body.
///
/// Understands `{"error": "..."}` (agent proxy), `{"error": {"message": "..."}}`
/// (Gemini, OpenAI) and falls back to the raw body.
pub fn extract_error_message(body: &str) -> String {
    let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();
    let message = parsed.as_ref().and_then(|v| match v.get("error") {
        Some(serde_json::Value::String(s)) => Some(s.clone()),
        Some(obj) => obj
            .get("message")
            .and_then(|m| m.as_str())
            .map(|s| s.to_string()),
        None => None,
    });
    message.unwrap_or_else(|| body.trim().to_string())
}

/// Helper function to parse HTTP error status codes
pub fn parse_http_error(status: u16, body: &str, backend: &str) -> LlmError {
    let message = extract_error_message(body);
    match status {
        401 => LlmError::AuthenticationFailed {
            message: format!("{}: Invalid API key", backend),
        },
        403 => LlmError::AuthenticationFailed {
            message: format!("{}: Access denied", backend),
        },
        404 => LlmError::ModelNotFound { model: message },
        429 => LlmError::RateLimited { message },
        400 => LlmError::InvalidRequest { message },
        500..=599 => LlmError::ServerError {
            message: if message.is_empty() {
                format!("Server Error {}", status)
            } else {
                message
            },
            status: Some(status),
        },
        _ => LlmError::Other {
            message: format!("HTTP {}: {}", status, message),
        },
    }
}
