//! Error Handling
//!
//! Unified error types for the workflow library.
//! Uses thiserror for ergonomic error definitions.

use thiserror::Error;

use career_copilot_llm::LlmError;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// An agent used its whole retry budget without producing usable output
    #[error("Agent {agent} exhausted {attempts} attempt(s): {last_error}")]
    AgentExhausted {
        agent: String,
        attempts: u32,
        last_error: String,
    },

    /// The run was cancelled by the caller
    #[error("Workflow cancelled")]
    Cancelled,

    /// Backend construction errors
    #[error("Backend error: {0}")]
    Backend(#[from] LlmError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create an exhaustion error for an agent
    pub fn exhausted(agent: impl Into<String>, attempts: u32, last_error: impl Into<String>) -> Self {
        Self::AgentExhausted {
            agent: agent.into(),
            attempts,
            last_error: last_error.into(),
        }
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Name of the agent this error is attributed to, if any
    pub fn agent(&self) -> Option<&str> {
        match self {
            Self::AgentExhausted { agent, .. } => Some(agent),
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Convert AppError to a string for callers that only surface messages
impl From<AppError> for String {
    fn from(err: AppError) -> String {
        err.to_string()
    }
}
