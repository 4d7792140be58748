//! Cross-Platform Path Utilities
//!
//! Functions for resolving the Career Copilot directory (~/.career-copilot/).

use std::path::{Path, PathBuf};

use crate::utils::error::{AppError, AppResult};

/// Get the user's home directory
pub fn home_dir() -> AppResult<PathBuf> {
    dirs::home_dir().ok_or_else(|| AppError::config("Could not determine home directory"))
}

/// Get the Career Copilot directory (~/.career-copilot/)
pub fn career_copilot_dir() -> AppResult<PathBuf> {
    Ok(home_dir()?.join(".career-copilot"))
}

/// Get the config file path (~/.career-copilot/config.json)
pub fn config_path() -> AppResult<PathBuf> {
    Ok(career_copilot_dir()?.join("config.json"))
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> AppResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Get the Career Copilot directory, creating if it doesn't exist
pub fn ensure_career_copilot_dir() -> AppResult<PathBuf> {
    let path = career_copilot_dir()?;
    ensure_dir(&path)?;
    Ok(path)
}
