//! Analysis Report Models
//!
//! The assembled career-strategy report and the per-section types the agents
//! produce. Everything serializes with camelCase keys. Decoding is lenient
//! about missing fields and free-text shapes; numeric fields are clamped to
//! their declared ranges after decoding.

use serde::{Deserialize, Deserializer, Serialize};

/// Clamp into `[lo, hi]`; NaN maps to `lo`.
fn clamp_range(value: f64, lo: f64, hi: f64) -> f64 {
    if value.is_nan() {
        lo
    } else {
        value.clamp(lo, hi)
    }
}

/// Accept a string, a list of strings (joined), a number or null.
fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(s)) => s,
        Some(serde_json::Value::Array(items)) => items
            .iter()
            .map(|v| match v {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join("; "),
        Some(other) => other.to_string(),
    })
}

/// Accept a list of strings or a single string.
fn deserialize_text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => Vec::new(),
        Some(serde_json::Value::String(s)) if s.trim().is_empty() => Vec::new(),
        Some(serde_json::Value::String(s)) => vec![s],
        Some(serde_json::Value::Array(items)) => items
            .into_iter()
            .filter_map(|v| match v {
                serde_json::Value::String(s) => Some(s),
                serde_json::Value::Null => None,
                other => Some(other.to_string()),
            })
            .collect(),
        Some(other) => vec![other.to_string()],
    })
}

/// Month numbers are 1-based; fractional values are rounded.
fn deserialize_month<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?.unwrap_or(1.0);
    Ok(if value.is_finite() && value >= 1.0 {
        value.round().min(u32::MAX as f64) as u32
    } else {
        1
    })
}

/// Current vs. required proficiency for one skill (0-10 scale)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkillGapData {
    #[serde(deserialize_with = "deserialize_text")]
    pub skill: String,
    pub current: f64,
    pub target: f64,
}

impl SkillGapData {
    pub fn clamped(self) -> Self {
        Self {
            current: clamp_range(self.current, 0.0, 10.0),
            target: clamp_range(self.target, 0.0, 10.0),
            ..self
        }
    }

    /// Points between current and target, never negative
    pub fn gap(&self) -> f64 {
        (self.target - self.current).max(0.0)
    }
}

/// One salary band
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalaryTier {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

impl SalaryTier {
    pub fn clamped(self) -> Self {
        Self {
            min: clamp_range(self.min, 0.0, f64::MAX),
            max: clamp_range(self.max, 0.0, f64::MAX),
            avg: clamp_range(self.avg, 0.0, f64::MAX),
        }
    }
}

/// Salary benchmarks for the target role
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SalaryEstimate {
    #[serde(deserialize_with = "deserialize_text")]
    pub currency: String,
    pub entry: SalaryTier,
    pub mid: SalaryTier,
    pub senior: SalaryTier,
    #[serde(deserialize_with = "deserialize_text")]
    pub insight: String,
}

impl SalaryEstimate {
    pub fn clamped(self) -> Self {
        Self {
            entry: self.entry.clamped(),
            mid: self.mid.clamped(),
            senior: self.senior.clamped(),
            ..self
        }
    }
}

/// ATS review of the resume
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeFeedback {
    /// 0-100
    pub score: f64,
    #[serde(deserialize_with = "deserialize_text_list")]
    pub positives: Vec<String>,
    #[serde(deserialize_with = "deserialize_text_list")]
    pub improvements: Vec<String>,
    #[serde(deserialize_with = "deserialize_text_list")]
    pub suggested_keywords: Vec<String>,
    #[serde(deserialize_with = "deserialize_text_list")]
    pub red_flags: Vec<String>,
}

impl ResumeFeedback {
    pub fn clamped(self) -> Self {
        Self {
            score: clamp_range(self.score, 0.0, 100.0),
            ..self
        }
    }
}

/// One month of the roadmap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CareerMilestone {
    #[serde(deserialize_with = "deserialize_month")]
    pub month: u32,
    #[serde(deserialize_with = "deserialize_text")]
    pub title: String,
    #[serde(deserialize_with = "deserialize_text")]
    pub description: String,
    #[serde(deserialize_with = "deserialize_text_list")]
    pub action_items: Vec<String>,
}

impl Default for CareerMilestone {
    fn default() -> Self {
        Self {
            month: 1,
            title: String::new(),
            description: String::new(),
            action_items: Vec::new(),
        }
    }
}

/// A job title worth applying to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SuggestedJob {
    #[serde(deserialize_with = "deserialize_text")]
    pub title: String,
    #[serde(deserialize_with = "deserialize_text")]
    pub company: String,
    #[serde(deserialize_with = "deserialize_text")]
    pub match_reason: String,
}

/// Formal concept note for the career plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConceptNote {
    #[serde(deserialize_with = "deserialize_text")]
    pub project_title: String,
    #[serde(deserialize_with = "deserialize_text")]
    pub mission_statement: String,
    #[serde(deserialize_with = "deserialize_text")]
    pub target_market: String,
    #[serde(deserialize_with = "deserialize_text")]
    pub strategic_objective: String,
    #[serde(deserialize_with = "deserialize_text")]
    pub expected_impact: String,
}

/// Lean canvas treating the career as a product
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeanCanvas {
    #[serde(deserialize_with = "deserialize_text")]
    pub problem: String,
    #[serde(deserialize_with = "deserialize_text")]
    pub solution: String,
    #[serde(deserialize_with = "deserialize_text")]
    pub key_metrics: String,
    #[serde(deserialize_with = "deserialize_text")]
    pub unique_value_prop: String,
    #[serde(deserialize_with = "deserialize_text")]
    pub unfair_advantage: String,
    #[serde(deserialize_with = "deserialize_text")]
    pub channels: String,
    #[serde(deserialize_with = "deserialize_text")]
    pub customer_segments: String,
    #[serde(deserialize_with = "deserialize_text")]
    pub cost_structure: String,
    #[serde(deserialize_with = "deserialize_text")]
    pub revenue_streams: String,
}

/// The assembled report. Built once per successful run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AIAnalysisResult {
    pub profile_summary: String,
    pub strengths: Vec<String>,
    pub skill_gaps: Vec<SkillGapData>,
    pub salary_estimate: SalaryEstimate,
    pub resume_feedback: ResumeFeedback,
    pub roadmap: Vec<CareerMilestone>,
    pub suggested_jobs: Vec<SuggestedJob>,
    pub concept_note: ConceptNote,
    pub lean_canvas: LeanCanvas,
}

impl AIAnalysisResult {
    /// Skills sorted by widest gap first
    pub fn largest_gaps(&self, n: usize) -> Vec<&SkillGapData> {
        let mut gaps: Vec<&SkillGapData> = self.skill_gaps.iter().collect();
        gaps.sort_by(|a, b| b.gap().total_cmp(&a.gap()));
        gaps.truncate(n);
        gaps
    }
}
