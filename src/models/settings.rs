//! Settings Models
//!
//! Workflow configuration stored in config.json.

use serde::{Deserialize, Serialize};

use career_copilot_core::proxy::ProxyConfig;
use career_copilot_llm::BackendConfig;

/// Environment variable carrying the backend credential
pub const ENV_API_KEY: &str = "CAREER_COPILOT_API_KEY";
/// Fallback credential variable
pub const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_MODEL: &str = "CAREER_COPILOT_MODEL";
pub const ENV_BASE_URL: &str = "CAREER_COPILOT_BASE_URL";
/// Proxy URL such as `socks5://127.0.0.1:1080`
pub const ENV_PROXY: &str = "CAREER_COPILOT_PROXY";

/// How the pause between attempts grows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffStrategy {
    /// Same pause after every failed attempt
    #[default]
    Fixed,
    /// `delay_ms * attempt`
    Linear,
    /// `delay_ms * 2^(attempt - 1)`
    Exponential,
}

/// Retry budget and pacing for one agent invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Attempts including the first (default: 2)
    pub max_attempts: u32,
    /// Base pause in milliseconds (default: 1500)
    pub delay_ms: u64,
    pub strategy: BackoffStrategy,
    /// Upper bound for any single pause (default: 30000)
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            delay_ms: 1500,
            strategy: BackoffStrategy::Fixed,
            max_delay_ms: 30_000,
        }
    }
}

impl RetryConfig {
    /// Pause after the given failed attempt (1-based).
    pub fn delay_for_attempt(&self, attempt: u32) -> u64 {
        let attempt = attempt.max(1);
        let delay = match self.strategy {
            BackoffStrategy::Fixed => self.delay_ms,
            BackoffStrategy::Linear => self.delay_ms.saturating_mul(u64::from(attempt)),
            BackoffStrategy::Exponential => self
                .delay_ms
                .saturating_mul(2u64.saturating_pow(attempt - 1)),
        };
        delay.min(self.max_delay_ms)
    }
}

/// Library configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopilotConfig {
    pub backend: BackendConfig,
    #[serde(default)]
    pub retry: RetryConfig,
    /// Ceiling for a single backend call
    #[serde(default = "default_attempt_timeout_secs")]
    pub attempt_timeout_secs: u64,
}

fn default_attempt_timeout_secs() -> u64 {
    90
}

impl Default for CopilotConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            retry: RetryConfig::default(),
            attempt_timeout_secs: default_attempt_timeout_secs(),
        }
    }
}

/// Settings update request (partial update)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigUpdate {
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub temperature: Option<f32>,
    pub max_attempts: Option<u32>,
    pub delay_ms: Option<u64>,
    pub strategy: Option<BackoffStrategy>,
    pub attempt_timeout_secs: Option<u64>,
}

impl CopilotConfig {
    /// Apply a partial update to the configuration
    pub fn apply_update(&mut self, update: ConfigUpdate) {
        if let Some(model) = update.model {
            self.backend.model = model;
        }
        if let Some(base_url) = update.base_url {
            self.backend.base_url = Some(base_url);
        }
        if let Some(temperature) = update.temperature {
            self.backend.temperature = temperature;
        }
        if let Some(max_attempts) = update.max_attempts {
            self.retry.max_attempts = max_attempts;
        }
        if let Some(delay_ms) = update.delay_ms {
            self.retry.delay_ms = delay_ms;
        }
        if let Some(strategy) = update.strategy {
            self.retry.strategy = strategy;
        }
        if let Some(secs) = update.attempt_timeout_secs {
            self.attempt_timeout_secs = secs;
        }
    }

    /// Overlay values from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Overlay values from an arbitrary lookup. Empty values are ignored.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = get(ENV_API_KEY).or_else(|| get(ENV_GEMINI_API_KEY)) {
            self.backend.api_key = Some(key);
        }
        if let Some(model) = get(ENV_MODEL) {
            self.backend.model = model;
        }
        if let Some(url) = get(ENV_BASE_URL) {
            self.backend.base_url = Some(url);
        }
        if let Some(raw) = get(ENV_PROXY) {
            match ProxyConfig::parse(&raw) {
                Ok(proxy) => self.backend.proxy = Some(proxy),
                Err(e) => tracing::warn!(error = %e, "[Config] ignoring {}", ENV_PROXY),
            }
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.retry.max_attempts < 1 {
            return Err("retry.max_attempts must be at least 1".to_string());
        }
        if self.attempt_timeout_secs < 1 {
            return Err("attempt_timeout_secs must be at least 1 second".to_string());
        }
        if !(0.0..=2.0).contains(&self.backend.temperature) {
            return Err(format!(
                "Invalid temperature: {}. Must be between 0 and 2",
                self.backend.temperature
            ));
        }
        if self.backend.model.trim().is_empty() {
            return Err("backend.model must not be empty".to_string());
        }
        Ok(())
    }
}
