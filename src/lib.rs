//! Career Copilot - Agent Workflow Library
//!
//! Turns a user profile into a structured career-strategy report by
//! coordinating five text-generation agents.
//! It includes:
//! - Data models (profile, report sections, agent status log)
//! - The agent workflow service (normalizer, invoker, coordinator, status)
//! - Storage layer (JSON config)
//! - Error types and path utilities
//!
//! Generation backends live in `career-copilot-llm`; shared foundations
//! (output shapes, proxy config) in `career-copilot-core`.

pub mod models;
pub mod services;
pub mod storage;
pub mod utils;

pub use models::{
    AIAnalysisResult, AgentLogEntry, AgentRole, AgentStatus, BackoffStrategy, CopilotConfig,
    ExperienceLevel, RetryConfig, UserProfile,
};
pub use services::workflow::{
    AgentActivityLog, AgentInvoker, NoopObserver, StatusObserver, WorkflowCoordinator,
};
pub use storage::ConfigService;
pub use utils::error::{AppError, AppResult};
