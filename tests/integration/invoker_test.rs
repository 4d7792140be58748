//! Agent Invoker Integration Tests
//!
//! Retry budget, pacing between attempts, per-attempt timeout and
//! cancellation, observed through the scripted backend. Timing tests run on
//! a paused tokio clock.

use std::sync::Arc;
use std::time::Duration;

use career_copilot::models::{AgentRole, BackoffStrategy, ResumeFeedback, RetryConfig};
use career_copilot::services::workflow::agents::output_schema;
use career_copilot::{AgentInvoker, AppError};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use super::support::{canned_reply, Reply, ScriptedBackend};

fn resume_backend(replies: Vec<Reply>) -> Arc<ScriptedBackend> {
    Arc::new(ScriptedBackend::new().script(AgentRole::ResumeOptimizer, replies))
}

// ============================================================================
// Retry budget
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_success_on_second_attempt_makes_no_further_calls() {
    let backend = resume_backend(vec![
        Reply::server_error(),
        Reply::text(canned_reply(AgentRole::ResumeOptimizer)),
        Reply::text(r#"{"score": 1}"#),
    ]);
    let invoker = AgentInvoker::new(backend.clone());

    let feedback: ResumeFeedback = invoker
        .invoke_typed(AgentRole::ResumeOptimizer, "Reviewing Resume")
        .await
        .unwrap();

    assert_eq!(feedback.score, 82.0);
    assert_eq!(backend.calls_for(AgentRole::ResumeOptimizer).len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_exhaustion_carries_last_cause() {
    let backend = resume_backend(vec![
        Reply::text("no json at all"),
        Reply::server_error(),
    ]);
    let invoker = AgentInvoker::new(backend.clone());

    let err = invoker
        .invoke_typed::<ResumeFeedback>(AgentRole::ResumeOptimizer, "Reviewing Resume")
        .await
        .unwrap_err();

    match &err {
        AppError::AgentExhausted {
            agent,
            attempts,
            last_error,
        } => {
            assert_eq!(agent, "Resume Optimizer");
            assert_eq!(*attempts, 2);
            assert!(last_error.contains("Server Error 503"));
        }
        other => panic!("Expected AgentExhausted, got {other:?}"),
    }
    assert_eq!(backend.calls().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_request_carries_role_instruction() {
    let backend = resume_backend(vec![Reply::text(r#"{"score": 50}"#)]);
    let invoker = AgentInvoker::new(backend.clone());
    let schema = output_schema(AgentRole::ResumeOptimizer);

    invoker
        .invoke(AgentRole::ResumeOptimizer, "Reviewing Resume: x", &schema)
        .await
        .unwrap();

    let call = &backend.calls()[0];
    assert_eq!(call.agent, "Resume Optimizer");
    assert_eq!(call.prompt, "Reviewing Resume: x");
    assert!(call.system_instruction.starts_with("ATS Compliance Expert"));
}

// ============================================================================
// Pacing
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_fixed_delay_between_attempts_and_none_after_last() {
    let backend = resume_backend(vec![Reply::server_error(), Reply::server_error()]);
    let invoker = AgentInvoker::new(backend.clone());
    let schema = output_schema(AgentRole::ResumeOptimizer);

    let started = Instant::now();
    let result = invoker
        .invoke(AgentRole::ResumeOptimizer, "prompt", &schema)
        .await;
    let elapsed = started.elapsed();

    assert!(result.is_err());
    assert!(elapsed >= Duration::from_millis(1500));
    assert!(elapsed < Duration::from_millis(1600));
}

#[tokio::test(start_paused = true)]
async fn test_exponential_backoff() {
    let backend = resume_backend(vec![
        Reply::server_error(),
        Reply::server_error(),
        Reply::text(r#"{"score": 70}"#),
    ]);
    let invoker = AgentInvoker::new(backend.clone()).with_retry(RetryConfig {
        max_attempts: 3,
        delay_ms: 100,
        strategy: BackoffStrategy::Exponential,
        ..Default::default()
    });
    let schema = output_schema(AgentRole::ResumeOptimizer);

    let started = Instant::now();
    let value = invoker
        .invoke(AgentRole::ResumeOptimizer, "prompt", &schema)
        .await
        .unwrap();

    assert_eq!(value["score"], 70);
    // 100 ms then 200 ms
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(300));
    assert!(elapsed < Duration::from_millis(400));
}

// ============================================================================
// Timeout and cancellation
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_timed_out_attempt_is_retried() {
    let backend = resume_backend(vec![
        Reply::text(r#"{"score": 10}"#).after(10_000),
        Reply::text(r#"{"score": 60}"#),
    ]);
    let invoker = AgentInvoker::new(backend.clone())
        .with_attempt_timeout(Duration::from_secs(2))
        .with_retry(RetryConfig {
            delay_ms: 10,
            ..Default::default()
        });
    let schema = output_schema(AgentRole::ResumeOptimizer);

    let value = invoker
        .invoke(AgentRole::ResumeOptimizer, "prompt", &schema)
        .await
        .unwrap();

    assert_eq!(value["score"], 60);
    assert_eq!(backend.calls().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_abandons_in_flight_call() {
    let backend = resume_backend(vec![Reply::text(r#"{"score": 10}"#).after(30_000)]);
    let cancel = CancellationToken::new();
    let invoker = AgentInvoker::new(backend.clone()).with_cancellation(cancel.clone());
    let schema = output_schema(AgentRole::ResumeOptimizer);

    let task = tokio::spawn(async move {
        invoker
            .invoke(AgentRole::ResumeOptimizer, "prompt", &schema)
            .await
    });
    tokio::time::sleep(Duration::from_millis(500)).await;
    cancel.cancel();

    let err = task.await.unwrap().unwrap_err();
    assert!(matches!(err, AppError::Cancelled));
    assert_eq!(backend.calls().len(), 1);
}
