//! Workflow Coordinator Integration Tests
//!
//! Two-wave orchestration, report assembly, failure policy, status events
//! and the activity log.

use std::sync::Arc;
use std::time::Duration;

use career_copilot::models::{AgentRole, AgentStatus, RetryConfig, UserProfile};
use career_copilot::{
    AgentActivityLog, AgentInvoker, AppError, NoopObserver, StatusObserver, WorkflowCoordinator,
};
use tokio_util::sync::CancellationToken;

use super::support::{canned_reply, data_analyst_profile, EventRecorder, Reply, ScriptedBackend};

const WAVE_ONE: [AgentRole; 3] = [
    AgentRole::CareerAnalyst,
    AgentRole::SkillGapDiagnoser,
    AgentRole::ResumeOptimizer,
];
const WAVE_TWO: [AgentRole; 2] = [AgentRole::StrategyConsultant, AgentRole::CareerPlanner];

fn coordinator(backend: &Arc<ScriptedBackend>) -> WorkflowCoordinator {
    WorkflowCoordinator::new(AgentInvoker::new(backend.clone()).with_retry(RetryConfig {
        delay_ms: 5,
        ..Default::default()
    }))
}

// ============================================================================
// Happy path
// ============================================================================

#[tokio::test]
async fn test_end_to_end_report() {
    let backend = Arc::new(ScriptedBackend::happy_path());
    let log = Arc::new(AgentActivityLog::new());

    let report = coordinator(&backend)
        .run_workflow(&data_analyst_profile(), log.clone())
        .await
        .unwrap();

    assert_eq!(report.strengths, vec!["Python", "SQL", "Excel"]);
    assert_eq!(report.skill_gaps.len(), 4);
    assert_eq!(report.skill_gaps[0].skill, "SQL");
    assert_eq!(report.salary_estimate.entry.min, 350000.0);
    assert_eq!(report.resume_feedback.score, 82.0);
    assert_eq!(report.roadmap.len(), 2);
    assert_eq!(report.roadmap[0].month, 1);
    assert_eq!(report.concept_note.project_title, "Analyst Launchpad");
    assert_eq!(report.lean_canvas.channels, "LinkedIn; Referrals");
    assert!(report
        .profile_summary
        .starts_with("Detail-oriented operations professional"));

    // one call per agent
    assert_eq!(backend.calls().len(), 5);

    let entries = log.entries();
    assert_eq!(entries.len(), 5);
    assert!(entries.iter().all(|e| e.status == AgentStatus::Completed));
    assert_eq!(
        log.get(AgentRole::CareerPlanner).unwrap().output.as_deref(),
        Some("Career roadmap generated.")
    );
}

#[tokio::test]
async fn test_wave_two_prompts_use_wave_one_results() {
    let backend = Arc::new(ScriptedBackend::happy_path());

    coordinator(&backend)
        .run_workflow(&data_analyst_profile(), Arc::new(NoopObserver))
        .await
        .unwrap();

    let strategy = &backend.calls_for(AgentRole::StrategyConsultant)[0];
    assert_eq!(
        strategy.prompt,
        "Synthesizing strategy for: Detail-oriented operations professional pivoting into data analysis."
    );
    let planner = &backend.calls_for(AgentRole::CareerPlanner)[0];
    assert_eq!(
        planner.prompt,
        "Planning for gaps: SQL, Tableau, Statistics, Python"
    );
    let resume = &backend.calls_for(AgentRole::ResumeOptimizer)[0];
    assert!(resume.prompt.starts_with("Reviewing Resume: No text provided."));
}

#[tokio::test]
async fn test_report_serializes_with_camel_case_keys() {
    let backend = Arc::new(ScriptedBackend::happy_path());
    let report = coordinator(&backend)
        .run_workflow(&data_analyst_profile(), Arc::new(NoopObserver))
        .await
        .unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["strengths"][2], "Excel");
    assert_eq!(json["salaryEstimate"]["currency"], "INR");
    assert_eq!(json["suggestedJobs"][0]["matchReason"], "SQL and ops background");
}

// ============================================================================
// Ordering
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_wave_two_starts_after_wave_one_settles() {
    let backend = Arc::new(
        ScriptedBackend::new()
            .always(
                AgentRole::CareerAnalyst,
                Reply::text(canned_reply(AgentRole::CareerAnalyst)).after(300),
            )
            .always(
                AgentRole::SkillGapDiagnoser,
                Reply::text(canned_reply(AgentRole::SkillGapDiagnoser)).after(50),
            )
            .always(
                AgentRole::ResumeOptimizer,
                Reply::text(canned_reply(AgentRole::ResumeOptimizer)).after(150),
            )
            .always(
                AgentRole::StrategyConsultant,
                Reply::text(canned_reply(AgentRole::StrategyConsultant)).after(20),
            )
            .always(
                AgentRole::CareerPlanner,
                Reply::text(canned_reply(AgentRole::CareerPlanner)).after(10),
            ),
    );
    let recorder = EventRecorder::new();

    coordinator(&backend)
        .run_workflow(&data_analyst_profile(), recorder.clone())
        .await
        .unwrap();

    let last_wave_one_terminal = WAVE_ONE
        .iter()
        .map(|r| recorder.position(*r, AgentStatus::Completed).unwrap())
        .max()
        .unwrap();
    let first_wave_two_working = WAVE_TWO
        .iter()
        .map(|r| recorder.position(*r, AgentStatus::Working).unwrap())
        .min()
        .unwrap();
    assert!(last_wave_one_terminal < first_wave_two_working);

    // wave 1 completes in latency order, not declaration order
    assert!(
        recorder.position(AgentRole::SkillGapDiagnoser, AgentStatus::Completed)
            < recorder.position(AgentRole::CareerAnalyst, AgentStatus::Completed)
    );

    for role in AgentRole::ALL {
        assert_eq!(
            recorder.statuses_for(role),
            vec![AgentStatus::Pending, AgentStatus::Working, AgentStatus::Completed]
        );
    }
}

// ============================================================================
// Failure policy
// ============================================================================

#[tokio::test]
async fn test_wave_one_exhaustion_fails_the_run() {
    let backend = Arc::new(
        ScriptedBackend::happy_path().always(AgentRole::ResumeOptimizer, Reply::server_error()),
    );
    let log = Arc::new(AgentActivityLog::new());

    let err = coordinator(&backend)
        .run_workflow(&data_analyst_profile(), log.clone())
        .await
        .unwrap_err();

    assert_eq!(err.agent(), Some("Resume Optimizer"));
    assert_eq!(backend.calls_for(AgentRole::ResumeOptimizer).len(), 2);

    let failed = log.get(AgentRole::ResumeOptimizer).unwrap();
    assert_eq!(failed.status, AgentStatus::Error);
    assert!(failed.output.unwrap().contains("Server Error 503"));

    // the other wave-1 agents settle; wave 2 never fires
    assert_eq!(
        log.get(AgentRole::CareerAnalyst).unwrap().status,
        AgentStatus::Completed
    );
    for role in WAVE_TWO {
        assert_eq!(log.get(role).unwrap().status, AgentStatus::Pending);
        assert!(backend.calls_for(role).is_empty());
    }
}

#[tokio::test]
async fn test_wave_two_exhaustion_fails_the_run() {
    let backend = Arc::new(
        ScriptedBackend::happy_path()
            .always(AgentRole::CareerPlanner, Reply::text("Roadmap coming soon!")),
    );
    let log = Arc::new(AgentActivityLog::new());

    let err = coordinator(&backend)
        .run_workflow(&data_analyst_profile(), log.clone())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::AgentExhausted { .. }));
    assert_eq!(err.agent(), Some("Career Path Planner"));
    assert_eq!(
        log.get(AgentRole::CareerPlanner).unwrap().status,
        AgentStatus::Error
    );
    assert_eq!(
        log.get(AgentRole::StrategyConsultant).unwrap().status,
        AgentStatus::Completed
    );
}

#[tokio::test]
async fn test_retry_inside_workflow_recovers() {
    let backend = Arc::new(ScriptedBackend::happy_path().script(
        AgentRole::CareerAnalyst,
        vec![Reply::text("Let me think about that...")],
    ));

    let report = coordinator(&backend)
        .run_workflow(&data_analyst_profile(), Arc::new(NoopObserver))
        .await
        .unwrap();

    assert_eq!(report.salary_estimate.currency, "INR");
    assert_eq!(backend.calls_for(AgentRole::CareerAnalyst).len(), 2);
}

#[tokio::test]
async fn test_invalid_profile_is_rejected_before_any_call() {
    let backend = Arc::new(ScriptedBackend::happy_path());
    let recorder = EventRecorder::new();
    let profile = UserProfile::new("Data Analyst", vec![]);

    let err = coordinator(&backend)
        .run_workflow(&profile, recorder.clone())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert!(backend.calls().is_empty());
    assert!(recorder.events().is_empty());
}

// ============================================================================
// Cancellation
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_cancellation_during_wave_one() {
    let backend = Arc::new(
        AgentRole::ALL
            .into_iter()
            .fold(ScriptedBackend::new(), |b, role| {
                b.always(role, Reply::text(canned_reply(role)).after(5_000))
            }),
    );
    let log = Arc::new(AgentActivityLog::new());
    let cancel = CancellationToken::new();

    let run = {
        let coordinator = coordinator(&backend);
        let log = log.clone();
        let cancel = cancel.clone();
        tokio::spawn(async move {
            coordinator
                .run_workflow_with_cancellation(&data_analyst_profile(), log, cancel)
                .await
        })
    };
    tokio::time::sleep(Duration::from_millis(100)).await;
    cancel.cancel();

    let err = run.await.unwrap().unwrap_err();
    assert!(err.is_cancelled());

    for role in WAVE_ONE {
        let entry = log.get(role).unwrap();
        assert_eq!(entry.status, AgentStatus::Error);
        assert_eq!(entry.output.as_deref(), Some("Cancelled"));
    }
    for role in WAVE_TWO {
        assert_eq!(log.get(role).unwrap().status, AgentStatus::Pending);
    }
    assert_eq!(backend.calls().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_cancellation_between_waves() {
    let backend = Arc::new(
        ScriptedBackend::happy_path()
            .always(
                AgentRole::CareerAnalyst,
                Reply::text(canned_reply(AgentRole::CareerAnalyst)).after(10),
            )
            .always(
                AgentRole::SkillGapDiagnoser,
                Reply::text(canned_reply(AgentRole::SkillGapDiagnoser)).after(20),
            )
            .always(
                AgentRole::ResumeOptimizer,
                Reply::text(canned_reply(AgentRole::ResumeOptimizer)).after(30),
            ),
    );
    let log = Arc::new(AgentActivityLog::new());
    let cancel = CancellationToken::new();

    // cancel as soon as the last wave-1 agent completes
    let observer = {
        let log = log.clone();
        let cancel = cancel.clone();
        move |role: AgentRole, status: AgentStatus, output: Option<&str>| {
            log.on_status(role, status, output);
            if role == AgentRole::ResumeOptimizer && status == AgentStatus::Completed {
                cancel.cancel();
            }
        }
    };

    let err = coordinator(&backend)
        .run_workflow_with_cancellation(&data_analyst_profile(), Arc::new(observer), cancel)
        .await
        .unwrap_err();

    assert!(err.is_cancelled());
    for role in WAVE_ONE {
        assert_eq!(log.get(role).unwrap().status, AgentStatus::Completed);
    }
    for role in WAVE_TWO {
        let entry = log.get(role).unwrap();
        assert_eq!(entry.status, AgentStatus::Error);
        assert_eq!(entry.output.as_deref(), Some("Cancelled"));
        assert!(backend.calls_for(role).is_empty());
    }
    assert_eq!(backend.calls().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_dropping_the_run_stops_its_agents() {
    let backend = Arc::new(
        AgentRole::ALL
            .into_iter()
            .fold(ScriptedBackend::new(), |b, role| {
                b.always(role, Reply::server_error().after(1_000))
            }),
    );
    let coordinator = WorkflowCoordinator::new(AgentInvoker::new(backend.clone()).with_retry(
        RetryConfig {
            max_attempts: 5,
            delay_ms: 5,
            ..Default::default()
        },
    ));
    let recorder = EventRecorder::new();

    let outcome = tokio::time::timeout(
        Duration::from_millis(100),
        coordinator.run_workflow(&data_analyst_profile(), recorder.clone()),
    )
    .await;
    assert!(outcome.is_err());

    let events_at_drop = recorder.events().len();
    let calls_at_drop = backend.calls().len();
    assert_eq!(events_at_drop, 8);
    assert_eq!(calls_at_drop, 3);

    tokio::time::sleep(Duration::from_secs(60)).await;

    assert_eq!(recorder.events().len(), events_at_drop);
    assert_eq!(backend.calls().len(), calls_at_drop);
}
