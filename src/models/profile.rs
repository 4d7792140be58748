//! User Profile Models
//!
//! The caller-owned input of a workflow run.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::utils::error::{AppError, AppResult};

/// Seniority band of the target role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExperienceLevel {
    #[default]
    Entry,
    Mid,
    Senior,
}

impl std::fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExperienceLevel::Entry => write!(f, "Entry"),
            ExperienceLevel::Mid => write!(f, "Mid"),
            ExperienceLevel::Senior => write!(f, "Senior"),
        }
    }
}

/// Profile handed to the workflow.
///
/// `skills` keeps insertion order; the first three become the report's
/// strengths. An empty `resume_text` means no resume was provided.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    pub target_role: String,
    #[serde(default)]
    pub experience_level: ExperienceLevel,
    pub skills: Vec<String>,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub resume_text: String,
}

impl UserProfile {
    /// Create a profile with the fields the workflow cannot run without
    pub fn new(target_role: impl Into<String>, skills: Vec<String>) -> Self {
        Self {
            target_role: target_role.into(),
            skills,
            ..Default::default()
        }
    }

    /// Builder pattern: set name
    pub fn with_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = full_name.into();
        self
    }

    /// Builder pattern: set experience level
    pub fn with_experience(mut self, level: ExperienceLevel) -> Self {
        self.experience_level = level;
        self
    }

    /// Builder pattern: set bio
    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = bio.into();
        self
    }

    /// Builder pattern: set resume text
    pub fn with_resume(mut self, resume_text: impl Into<String>) -> Self {
        self.resume_text = resume_text.into();
        self
    }

    pub fn has_resume(&self) -> bool {
        !self.resume_text.trim().is_empty()
    }

    /// First three declared skills, in input order
    pub fn strengths(&self) -> Vec<String> {
        self.skills.iter().take(3).cloned().collect()
    }

    /// Check the profile before any agent fires
    pub fn validate(&self) -> AppResult<()> {
        if self.target_role.trim().is_empty() {
            return Err(AppError::validation("target role must not be empty"));
        }
        if self.skills.is_empty() {
            return Err(AppError::validation("at least one skill is required"));
        }
        let mut seen = HashSet::new();
        for skill in &self.skills {
            let key = skill.trim().to_lowercase();
            if key.is_empty() {
                return Err(AppError::validation("skills must not be blank"));
            }
            if !seen.insert(key) {
                return Err(AppError::validation(format!("duplicate skill '{}'", skill)));
            }
        }
        Ok(())
    }
}
