//! Career Copilot LLM
//!
//! Provides a unified interface for the text-generation backends the agent
//! workflow talks to:
//! - Google Gemini (`generateContent` with a response schema)
//! - A server-side agent proxy that holds the credential
//! - OpenAI-compatible chat completions
//!
//! Also includes the HTTP client factory and the backend factory.

pub mod agent_proxy;
pub mod factory;
pub mod gemini;
pub mod http_client;
pub mod openai;
pub mod provider;
pub mod types;

// Re-export main types
pub use agent_proxy::AgentProxyBackend;
pub use factory::create_backend;
pub use gemini::GeminiBackend;
pub use http_client::build_http_client;
pub use openai::OpenAIBackend;
pub use provider::GenerationBackend;
pub use types::*;
