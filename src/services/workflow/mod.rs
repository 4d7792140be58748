//! Agent Workflow Service
//!
//! Coordinates the career-analysis agents:
//! - Agent definitions (system instructions, prompts, output shapes)
//! - Response normalization (JSON extraction and numeric repair)
//! - Retrying, cancellable agent invocation
//! - Two-wave orchestration with per-agent status reporting

pub mod agents;
pub mod coordinator;
pub mod invoker;
pub mod normalizer;
pub mod status;

pub use agents::{
    AgentOutput, AnalystReport, CareerPlan, SkillGapList, StrategyDraft,
};
pub use coordinator::WorkflowCoordinator;
pub use invoker::{AgentInvoker, DEFAULT_ATTEMPT_TIMEOUT};
pub use normalizer::{coerce_numeric_fields, extract_json, normalize, NUMERIC_KEYS};
pub use status::{AgentActivityLog, NoopObserver, StatusObserver, StatusReporter};
