//! Workflow Coordinator
//!
//! Runs the five agents as two waves and assembles the report.
//!
//! Wave 1 (Career Analyst, Skill Gap Diagnoser, Resume Optimizer) depends
//! only on the profile. Wave 2 (Strategy Consultant, Career Path Planner)
//! consumes the analyst summary and the diagnosed skill names, and starts only
//! after every wave-1 agent has settled. Any agent exhausting its retries
//! fails the whole run; no partial report is produced.
//!
//! Agent tasks are owned by the run: dropping the run future aborts them.

use std::sync::Arc;
use std::time::Instant;

use tokio_util::sync::CancellationToken;
use tokio_util::task::AbortOnDropHandle;

use crate::models::{AIAnalysisResult, AgentRole, AgentStatus, CopilotConfig, ResumeFeedback, UserProfile};
use crate::utils::error::{AppError, AppResult};

use super::agents::{
    analyst_prompt, completion_note, planner_prompt, resume_prompt, skill_gap_prompt,
    strategy_prompt, AgentOutput, AnalystReport, CareerPlan, SkillGapList, StrategyDraft,
};
use super::invoker::AgentInvoker;
use super::status::{StatusObserver, StatusReporter};

const WAVE_ONE: [AgentRole; 3] = [
    AgentRole::CareerAnalyst,
    AgentRole::SkillGapDiagnoser,
    AgentRole::ResumeOptimizer,
];

const WAVE_TWO: [AgentRole; 2] = [AgentRole::StrategyConsultant, AgentRole::CareerPlanner];

/// Drives a workflow run over a shared invoker.
#[derive(Clone)]
pub struct WorkflowCoordinator {
    invoker: AgentInvoker,
}

impl WorkflowCoordinator {
    pub fn new(invoker: AgentInvoker) -> Self {
        Self { invoker }
    }

    /// Build the invoker from configuration
    pub fn from_config(config: &CopilotConfig) -> AppResult<Self> {
        Ok(Self::new(AgentInvoker::from_config(config)?))
    }

    pub fn invoker(&self) -> &AgentInvoker {
        &self.invoker
    }

    /// Run both waves and return the assembled report.
    pub async fn run_workflow(
        &self,
        profile: &UserProfile,
        observer: Arc<dyn StatusObserver>,
    ) -> AppResult<AIAnalysisResult> {
        self.run(&self.invoker, profile, observer).await
    }

    /// Same as [`run_workflow`](Self::run_workflow), abandoning in-flight calls
    /// and retry delays once `cancel` fires.
    pub async fn run_workflow_with_cancellation(
        &self,
        profile: &UserProfile,
        observer: Arc<dyn StatusObserver>,
        cancel: CancellationToken,
    ) -> AppResult<AIAnalysisResult> {
        let invoker = self.invoker.clone().with_cancellation(cancel);
        self.run(&invoker, profile, observer).await
    }

    async fn run(
        &self,
        invoker: &AgentInvoker,
        profile: &UserProfile,
        observer: Arc<dyn StatusObserver>,
    ) -> AppResult<AIAnalysisResult> {
        profile.validate()?;

        let started = Instant::now();
        let reporter = Arc::new(StatusReporter::new(observer));
        for role in AgentRole::ALL {
            reporter.report(role, AgentStatus::Pending, None);
        }

        tracing::info!(
            target_role = %profile.target_role,
            skills = profile.skills.len(),
            backend = invoker.backend_name(),
            "[Workflow] starting run"
        );

        // Wave 1
        mark_working(&reporter, &WAVE_ONE);
        let analyst = spawn_agent::<AnalystReport>(
            invoker,
            &reporter,
            AgentRole::CareerAnalyst,
            analyst_prompt(profile),
        );
        let gaps = spawn_agent::<SkillGapList>(
            invoker,
            &reporter,
            AgentRole::SkillGapDiagnoser,
            skill_gap_prompt(profile),
        );
        let resume = spawn_agent::<ResumeFeedback>(
            invoker,
            &reporter,
            AgentRole::ResumeOptimizer,
            resume_prompt(profile),
        );

        // settle every agent before surfacing the first failure
        let analyst = join_agent(&reporter, AgentRole::CareerAnalyst, analyst).await;
        let gaps = join_agent(&reporter, AgentRole::SkillGapDiagnoser, gaps).await;
        let resume = join_agent(&reporter, AgentRole::ResumeOptimizer, resume).await;
        let (analyst, gaps, resume) = (analyst?, gaps?, resume?);

        tracing::info!(
            gaps = gaps.0.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "[Workflow] wave 1 settled"
        );

        if invoker.cancellation_token().is_cancelled() {
            for role in WAVE_TWO {
                reporter.report(role, AgentStatus::Error, Some("Cancelled"));
            }
            return Err(AppError::Cancelled);
        }

        // Wave 2
        mark_working(&reporter, &WAVE_TWO);
        let strategy = spawn_agent::<StrategyDraft>(
            invoker,
            &reporter,
            AgentRole::StrategyConsultant,
            strategy_prompt(&analyst.summary),
        );
        let plan = spawn_agent::<CareerPlan>(
            invoker,
            &reporter,
            AgentRole::CareerPlanner,
            planner_prompt(&gaps.skill_names()),
        );

        let strategy = join_agent(&reporter, AgentRole::StrategyConsultant, strategy).await;
        let plan = join_agent(&reporter, AgentRole::CareerPlanner, plan).await;
        let (strategy, plan) = (strategy?, plan?);

        tracing::info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            "[Workflow] run completed"
        );

        Ok(AIAnalysisResult {
            profile_summary: analyst.summary,
            strengths: profile.strengths(),
            skill_gaps: gaps.0,
            salary_estimate: analyst.salary,
            resume_feedback: resume,
            roadmap: plan.roadmap,
            suggested_jobs: plan.suggested_jobs,
            concept_note: strategy.concept_note,
            lean_canvas: strategy.lean_canvas,
        })
    }
}

fn mark_working(reporter: &StatusReporter, roles: &[AgentRole]) {
    for role in roles {
        reporter.report(*role, AgentStatus::Working, None);
    }
}

/// Spawn one agent; its terminal status is reported from inside the task.
fn spawn_agent<T: AgentOutput>(
    invoker: &AgentInvoker,
    reporter: &Arc<StatusReporter>,
    role: AgentRole,
    prompt: String,
) -> AbortOnDropHandle<AppResult<T>> {
    let invoker = invoker.clone();
    let reporter = reporter.clone();
    AbortOnDropHandle::new(tokio::spawn(async move {
        let result = invoker.invoke_typed::<T>(role, &prompt).await;
        match &result {
            Ok(_) => {
                reporter.report(role, AgentStatus::Completed, Some(completion_note(role)));
            }
            Err(AppError::Cancelled) => {
                reporter.report(role, AgentStatus::Error, Some("Cancelled"));
            }
            Err(e) => {
                tracing::error!(agent = %role, error = %e, "[Workflow] agent failed");
                reporter.report(role, AgentStatus::Error, Some(&e.to_string()));
            }
        }
        result
    }))
}

async fn join_agent<T>(
    reporter: &StatusReporter,
    role: AgentRole,
    handle: AbortOnDropHandle<AppResult<T>>,
) -> AppResult<T> {
    match handle.await {
        Ok(result) => result,
        Err(e) => {
            let message = format!("agent task aborted: {}", e);
            reporter.report(role, AgentStatus::Error, Some(&message));
            Err(AppError::internal(message))
        }
    }
}
