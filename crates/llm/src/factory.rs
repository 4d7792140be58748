//! Backend Factory

use std::sync::Arc;

use crate::agent_proxy::AgentProxyBackend;
use crate::gemini::GeminiBackend;
use crate::openai::OpenAIBackend;
use crate::provider::GenerationBackend;
use crate::types::{BackendConfig, BackendType, LlmResult};

/// Create a generation backend from a BackendConfig.
///
/// Maps BackendType to the concrete backend implementation.
pub fn create_backend(config: &BackendConfig) -> LlmResult<Arc<dyn GenerationBackend>> {
    let config = config.clone();
    let backend: Arc<dyn GenerationBackend> = match config.backend {
        BackendType::Gemini => Arc::new(GeminiBackend::new(config)?),
        BackendType::AgentProxy => Arc::new(AgentProxyBackend::new(config)?),
        BackendType::OpenAI => Arc::new(OpenAIBackend::new(config)?),
    };
    tracing::debug!(backend = backend.name(), model = backend.model(), "[BackendFactory] created");
    Ok(backend)
}
