//! Agent Invoker
//!
//! Runs one agent's request against the generation backend with a retry
//! budget, a per-attempt timeout and cooperative cancellation. Every reply is
//! normalized and decoded before it counts as a success.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio_util::sync::CancellationToken;

use career_copilot_core::schema::OutputSchema;
use career_copilot_llm::{create_backend, GenerationBackend, GenerationRequest};

use crate::models::{AgentRole, CopilotConfig, RetryConfig};
use crate::utils::error::{AppError, AppResult};

use super::agents::{output_schema, system_instruction, AgentOutput};
use super::normalizer::normalize;

/// Default ceiling for a single backend call
pub const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(90);

/// Executes agent requests. Cheap to clone; clones share the backend and
/// the cancellation token.
#[derive(Clone)]
pub struct AgentInvoker {
    backend: Arc<dyn GenerationBackend>,
    retry: RetryConfig,
    attempt_timeout: Duration,
    cancel: CancellationToken,
}

impl AgentInvoker {
    /// Create an invoker with the default retry policy (2 attempts, 1500 ms apart)
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Self {
        Self {
            backend,
            retry: RetryConfig::default(),
            attempt_timeout: DEFAULT_ATTEMPT_TIMEOUT,
            cancel: CancellationToken::new(),
        }
    }

    /// Build the backend and policy from a validated configuration
    pub fn from_config(config: &CopilotConfig) -> AppResult<Self> {
        config.validate().map_err(AppError::config)?;
        let backend = create_backend(&config.backend)?;
        Ok(Self::new(backend)
            .with_retry(config.retry.clone())
            .with_attempt_timeout(Duration::from_secs(config.attempt_timeout_secs)))
    }

    /// Builder pattern: set retry policy
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Builder pattern: set per-attempt timeout
    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout = timeout;
        self
    }

    /// Builder pattern: share a caller-owned cancellation token
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn retry(&self) -> &RetryConfig {
        &self.retry
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Run `role` with the given prompt and shape; returns the normalized value.
    pub async fn invoke(
        &self,
        role: AgentRole,
        prompt: &str,
        schema: &OutputSchema,
    ) -> AppResult<Value> {
        self.invoke_with(role, prompt, schema, Ok).await
    }

    /// Run `role` with its declared shape and decode into the typed output.
    /// A reply that does not decode is a failed attempt.
    pub async fn invoke_typed<T: AgentOutput>(&self, role: AgentRole, prompt: &str) -> AppResult<T> {
        let schema = output_schema(role);
        self.invoke_with(role, prompt, &schema, |value| {
            serde_json::from_value::<T>(value)
                .map(T::clamped)
                .map_err(|e| e.to_string())
        })
        .await
    }

    async fn invoke_with<T, F>(
        &self,
        role: AgentRole,
        prompt: &str,
        schema: &OutputSchema,
        decode: F,
    ) -> AppResult<T>
    where
        F: Fn(Value) -> Result<T, String>,
    {
        let attempts = self.retry.max_attempts.max(1);
        let mut last_error = String::new();

        for attempt in 1..=attempts {
            if self.cancel.is_cancelled() {
                return Err(AppError::Cancelled);
            }

            let request = GenerationRequest {
                agent: role.label().to_string(),
                system_instruction: system_instruction(role).to_string(),
                prompt: prompt.to_string(),
                schema: schema.clone(),
            };

            tracing::debug!(agent = %role, attempt, attempts, backend = self.backend.name(), "[AgentInvoker] sending request");

            let outcome = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return Err(AppError::Cancelled),
                result = tokio::time::timeout(self.attempt_timeout, self.backend.generate(request)) => result,
            };

            let failure = match outcome {
                Err(_) => format!(
                    "attempt timed out after {} ms",
                    self.attempt_timeout.as_millis()
                ),
                Ok(Err(e)) => e.to_string(),
                Ok(Ok(response)) => match normalize(&response.text) {
                    None => "reply contained no usable JSON".to_string(),
                    Some(value) => match decode(value) {
                        Ok(output) => {
                            tracing::info!(
                                agent = %role,
                                attempt,
                                tokens = response.usage.total_tokens(),
                                "[AgentInvoker] agent succeeded"
                            );
                            return Ok(output);
                        }
                        Err(e) => format!("reply did not match the expected shape: {}", e),
                    },
                },
            };

            tracing::warn!(agent = %role, attempt, attempts, error = %failure, "[AgentInvoker] attempt failed");
            last_error = failure;

            if attempt < attempts {
                let delay = Duration::from_millis(self.retry.delay_for_attempt(attempt));
                tokio::select! {
                    biased;
                    _ = self.cancel.cancelled() => return Err(AppError::Cancelled),
                    _ = tokio::time::sleep(delay) => {}
                }
            }
        }

        tracing::error!(agent = %role, attempts, error = %last_error, "[AgentInvoker] retries exhausted");
        Err(AppError::exhausted(role.label(), attempts, last_error))
    }
}
