//! Normalizer Integration Tests
//!
//! Realistic backend replies through extraction, coercion and typed decoding.

use career_copilot::models::{AgentRole, ResumeFeedback};
use career_copilot::services::workflow::{normalize, AgentOutput, AnalystReport, CareerPlan, SkillGapList};
use serde_json::json;

use super::support::canned_reply;

// ============================================================================
// Extraction
// ============================================================================

#[test]
fn test_object_embedded_in_prose() {
    let value = normalize("Sure, here is the data: {\"score\": 80} Thanks!").unwrap();
    assert_eq!(value, json!({"score": 80}));
}

#[test]
fn test_reply_without_json_is_unusable() {
    assert!(normalize("I'm sorry, I can't help with that.").is_none());
    assert!(normalize("{\"score\": 80").is_none());
}

// ============================================================================
// Decorated numbers
// ============================================================================

#[test]
fn test_decorated_strings_become_numbers() {
    let value = normalize(
        r#"{"score": "72%", "salary": {"avg": "$45,000"}, "roadmap": [{"month": "Month 3"}], "band": {"min": "abc"}}"#,
    )
    .unwrap();
    assert_eq!(value["score"], 72);
    assert_eq!(value["salary"]["avg"], 45000);
    assert_eq!(value["roadmap"][0]["month"], 3);
    assert_eq!(value["band"]["min"], 0);
}

#[test]
fn test_normalizing_twice_changes_nothing() {
    let first = normalize(canned_reply(AgentRole::CareerAnalyst)).unwrap();
    let second = normalize(&first.to_string()).unwrap();
    assert_eq!(first, second);
}

// ============================================================================
// Typed decoding of canned replies
// ============================================================================

#[test]
fn test_analyst_reply_decodes() {
    let value = normalize(canned_reply(AgentRole::CareerAnalyst)).unwrap();
    let report: AnalystReport = serde_json::from_value(value).unwrap();
    let report = report.clamped();
    assert_eq!(report.salary.currency, "INR");
    assert_eq!(report.salary.entry.min, 350000.0);
    assert_eq!(report.salary.entry.avg, 4.5);
    assert!(report.summary.starts_with("Detail-oriented"));
}

#[test]
fn test_skill_gap_reply_decodes_in_order() {
    let value = normalize(canned_reply(AgentRole::SkillGapDiagnoser)).unwrap();
    let gaps: SkillGapList = serde_json::from_value(value).unwrap();
    assert_eq!(gaps.skill_names(), vec!["SQL", "Tableau", "Statistics", "Python"]);
    assert_eq!(gaps.0[0].current, 6.0);
    assert_eq!(gaps.0[1].target, 8.0);
}

#[test]
fn test_resume_and_plan_replies_decode() {
    let resume: ResumeFeedback =
        serde_json::from_value(normalize(canned_reply(AgentRole::ResumeOptimizer)).unwrap())
            .unwrap();
    assert_eq!(resume.score, 82.0);
    assert_eq!(resume.suggested_keywords, vec!["ETL", "dashboards"]);

    let plan: CareerPlan =
        serde_json::from_value(normalize(canned_reply(AgentRole::CareerPlanner)).unwrap())
            .unwrap();
    let months: Vec<u32> = plan.roadmap.iter().map(|m| m.month).collect();
    assert_eq!(months, vec![1, 2]);
    assert_eq!(plan.suggested_jobs[0].company, "Razorpay");
}
