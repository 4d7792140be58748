//! Agent Models
//!
//! Agent identities, lifecycle states and status-log entries.

use serde::{Deserialize, Serialize};

/// The five specialized agents of a workflow run.
///
/// Serialized as the display label, which is also the identity used in
/// status events and on the wire to the agent proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AgentRole {
    #[serde(rename = "Career Analyst")]
    CareerAnalyst,
    #[serde(rename = "Skill Gap Diagnoser")]
    SkillGapDiagnoser,
    #[serde(rename = "Resume Optimizer")]
    ResumeOptimizer,
    #[serde(rename = "Career Path Planner")]
    CareerPlanner,
    #[serde(rename = "Strategy Consultant")]
    StrategyConsultant,
}

impl AgentRole {
    /// All agents in declaration order
    pub const ALL: [AgentRole; 5] = [
        AgentRole::CareerAnalyst,
        AgentRole::SkillGapDiagnoser,
        AgentRole::ResumeOptimizer,
        AgentRole::CareerPlanner,
        AgentRole::StrategyConsultant,
    ];

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            AgentRole::CareerAnalyst => "Career Analyst",
            AgentRole::SkillGapDiagnoser => "Skill Gap Diagnoser",
            AgentRole::ResumeOptimizer => "Resume Optimizer",
            AgentRole::CareerPlanner => "Career Path Planner",
            AgentRole::StrategyConsultant => "Strategy Consultant",
        }
    }
}

impl std::fmt::Display for AgentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Lifecycle state of one agent within a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    Pending,
    Working,
    Completed,
    Error,
}

impl AgentStatus {
    fn rank(&self) -> u8 {
        match self {
            AgentStatus::Pending => 0,
            AgentStatus::Working => 1,
            AgentStatus::Completed | AgentStatus::Error => 2,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, AgentStatus::Completed | AgentStatus::Error)
    }

    /// Transitions only move forward: pending -> working -> completed | error.
    /// A pending agent may go straight to error when the run is cancelled.
    pub fn can_transition_to(&self, next: AgentStatus) -> bool {
        next.rank() > self.rank()
    }
}

impl std::fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgentStatus::Pending => write!(f, "pending"),
            AgentStatus::Working => write!(f, "working"),
            AgentStatus::Completed => write!(f, "completed"),
            AgentStatus::Error => write!(f, "error"),
        }
    }
}

/// One agent's row in the activity log. Updated in place by agent identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentLogEntry {
    /// Unique identifier (UUID)
    pub id: String,
    pub agent: AgentRole,
    pub status: AgentStatus,
    /// Time of the last transition (RFC 3339)
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

impl AgentLogEntry {
    /// Create a new entry with a generated UUID, stamped now
    pub fn new(agent: AgentRole, status: AgentStatus, output: Option<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            agent,
            status,
            timestamp: chrono::Utc::now().to_rfc3339(),
            output,
        }
    }

    /// Apply a transition, keeping the entry's identity
    pub fn update(&mut self, status: AgentStatus, output: Option<String>) {
        self.status = status;
        self.output = output;
        self.timestamp = chrono::Utc::now().to_rfc3339();
    }
}
