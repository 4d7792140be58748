//! Agent Definitions
//!
//! System instructions, prompts, requested output shapes and typed outputs
//! for the five workflow agents.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use career_copilot_core::schema::OutputSchema;

use crate::models::{
    AgentRole, CareerMilestone, ConceptNote, LeanCanvas, ResumeFeedback, SalaryEstimate,
    SkillGapData, SuggestedJob, UserProfile,
};

/// Typed result of one agent. Decoded from the normalized reply, then clamped.
pub trait AgentOutput: DeserializeOwned + Send + 'static {
    /// Bring numeric fields into their declared ranges
    fn clamped(self) -> Self {
        self
    }
}

/// Career Analyst output: identity summary plus salary benchmarks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalystReport {
    pub summary: String,
    pub salary: SalaryEstimate,
}

impl AgentOutput for AnalystReport {
    fn clamped(self) -> Self {
        Self {
            salary: self.salary.clamped(),
            ..self
        }
    }
}

/// Skill Gap Diagnoser output, order as returned
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillGapList(pub Vec<SkillGapData>);

impl SkillGapList {
    /// Skill names in returned order
    pub fn skill_names(&self) -> Vec<String> {
        self.0.iter().map(|g| g.skill.clone()).collect()
    }
}

impl AgentOutput for SkillGapList {
    fn clamped(self) -> Self {
        Self(self.0.into_iter().map(SkillGapData::clamped).collect())
    }
}

impl AgentOutput for ResumeFeedback {
    fn clamped(self) -> Self {
        ResumeFeedback::clamped(self)
    }
}

/// Strategy Consultant output
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StrategyDraft {
    pub concept_note: ConceptNote,
    pub lean_canvas: LeanCanvas,
}

impl AgentOutput for StrategyDraft {}

/// Career Path Planner output. Both lists default to empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CareerPlan {
    pub roadmap: Vec<CareerMilestone>,
    pub suggested_jobs: Vec<SuggestedJob>,
}

impl AgentOutput for CareerPlan {}

/// Role-specific system instruction
pub fn system_instruction(role: AgentRole) -> &'static str {
    match role {
        AgentRole::CareerAnalyst => "Senior Career Strategist. Task: Define professional identity and provide Indian market salary benchmarks (INR). Output JSON.",
        AgentRole::SkillGapDiagnoser => "Technical Skill Auditor. Task: Map current stack vs industry requirements. Provide scores 0-10. Output JSON array.",
        AgentRole::ResumeOptimizer => "ATS Compliance Expert. Task: Score resume (0-100) and provide actionable fixes. Output JSON.",
        AgentRole::CareerPlanner => "Strategic Roadmapper. Task: 6-month career advancement plan and job titles. Output JSON.",
        AgentRole::StrategyConsultant => "Business Strategy Consultant. Task: Draft a formal Career Concept Note and Lean Canvas. Output JSON.",
    }
}

/// Short note attached to the `completed` status event
pub fn completion_note(role: AgentRole) -> &'static str {
    match role {
        AgentRole::CareerAnalyst => "Analysis finalized.",
        AgentRole::SkillGapDiagnoser => "Skill gaps identified.",
        AgentRole::ResumeOptimizer => "ATS scoring finished.",
        AgentRole::StrategyConsultant => "Career strategy drafted.",
        AgentRole::CareerPlanner => "Career roadmap generated.",
    }
}

pub fn analyst_prompt(profile: &UserProfile) -> String {
    format!(
        "User Profile: Name: {}, Role: {}, Skills: {}",
        profile.full_name,
        profile.target_role,
        profile.skills.join(", ")
    )
}

pub fn skill_gap_prompt(profile: &UserProfile) -> String {
    format!(
        "Mapping: [{}] to Target [{}]",
        profile.skills.join(", "),
        profile.target_role
    )
}

pub fn resume_prompt(profile: &UserProfile) -> String {
    let resume = if profile.has_resume() {
        profile.resume_text.as_str()
    } else {
        "No text provided"
    };
    format!("Reviewing Resume: {}. Context: {}", resume, profile.bio)
}

pub fn strategy_prompt(summary: &str) -> String {
    format!("Synthesizing strategy for: {}", summary)
}

pub fn planner_prompt(gap_skills: &[String]) -> String {
    format!("Planning for gaps: {}", gap_skills.join(", "))
}

fn salary_tier_schema() -> OutputSchema {
    OutputSchema::object([
        ("min", OutputSchema::number()),
        ("max", OutputSchema::number()),
        ("avg", OutputSchema::number()),
    ])
}

/// Requested output shape per role
pub fn output_schema(role: AgentRole) -> OutputSchema {
    match role {
        AgentRole::CareerAnalyst => OutputSchema::object([
            ("summary", OutputSchema::string()),
            (
                "salary",
                OutputSchema::object([
                    ("currency", OutputSchema::string()),
                    ("entry", salary_tier_schema()),
                    ("mid", salary_tier_schema()),
                    ("senior", salary_tier_schema()),
                    ("insight", OutputSchema::string()),
                ])
                .with_required(&["currency", "entry", "mid", "senior"]),
            ),
        ])
        .with_required(&["summary", "salary"]),

        AgentRole::SkillGapDiagnoser => OutputSchema::array(
            OutputSchema::object([
                ("skill", OutputSchema::string()),
                ("current", OutputSchema::number()),
                ("target", OutputSchema::number()),
            ])
            .with_required(&["skill", "current", "target"]),
        ),

        AgentRole::ResumeOptimizer => OutputSchema::object([
            ("score", OutputSchema::number()),
            ("positives", OutputSchema::string_list()),
            ("improvements", OutputSchema::string_list()),
            ("suggestedKeywords", OutputSchema::string_list()),
            ("redFlags", OutputSchema::string_list()),
        ])
        .with_required(&["score", "positives", "improvements"]),

        AgentRole::StrategyConsultant => OutputSchema::object([
            (
                "conceptNote",
                OutputSchema::object(
                    [
                        "projectTitle",
                        "missionStatement",
                        "targetMarket",
                        "strategicObjective",
                        "expectedImpact",
                    ]
                    .map(|k| (k, OutputSchema::string())),
                ),
            ),
            (
                "leanCanvas",
                OutputSchema::object(
                    [
                        "problem",
                        "solution",
                        "keyMetrics",
                        "uniqueValueProp",
                        "unfairAdvantage",
                        "channels",
                        "customerSegments",
                        "costStructure",
                        "revenueStreams",
                    ]
                    .map(|k| (k, OutputSchema::string())),
                ),
            ),
        ]),

        AgentRole::CareerPlanner => OutputSchema::object([
            (
                "roadmap",
                OutputSchema::array(OutputSchema::object([
                    ("month", OutputSchema::number()),
                    ("title", OutputSchema::string()),
                    ("description", OutputSchema::string()),
                    ("actionItems", OutputSchema::string_list()),
                ])),
            ),
            (
                "suggestedJobs",
                OutputSchema::array(OutputSchema::object([
                    ("title", OutputSchema::string()),
                    ("company", OutputSchema::string()),
                    ("matchReason", OutputSchema::string()),
                ])),
            ),
        ]),
    }
}
