//! JSON Configuration Management
//!
//! Handles reading and writing the workflow configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use crate::models::settings::{ConfigUpdate, CopilotConfig};
use crate::utils::error::{AppError, AppResult};
use crate::utils::paths::{config_path, ensure_career_copilot_dir, ensure_dir};

/// Configuration service for managing workflow settings
#[derive(Debug)]
pub struct ConfigService {
    config_path: PathBuf,
    config: CopilotConfig,
}

impl ConfigService {
    /// Load ~/.career-copilot/config.json, creating defaults when absent
    pub fn new() -> AppResult<Self> {
        ensure_career_copilot_dir()?;
        Self::with_path(config_path()?)
    }

    /// Load the config at an explicit path, creating defaults when absent
    pub fn with_path(path: impl Into<PathBuf>) -> AppResult<Self> {
        let config_path = path.into();
        if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            ensure_dir(parent)?;
        }

        let config = if config_path.exists() {
            Self::load_from_file(&config_path)?
        } else {
            tracing::info!(path = %config_path.display(), "[ConfigService] writing default config");
            let default_config = CopilotConfig::default();
            Self::save_to_file(&config_path, &default_config)?;
            default_config
        };

        Ok(Self {
            config_path,
            config,
        })
    }

    /// Load configuration from a file
    fn load_from_file(path: &Path) -> AppResult<CopilotConfig> {
        let content = fs::read_to_string(path)?;
        let config: CopilotConfig = serde_json::from_str(&content)?;
        config.validate().map_err(AppError::validation)?;
        Ok(config)
    }

    /// Save configuration to a file with pretty formatting
    fn save_to_file(path: &Path, config: &CopilotConfig) -> AppResult<()> {
        config.validate().map_err(AppError::validation)?;
        let content = serde_json::to_string_pretty(config)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Get the current configuration
    pub fn get_config(&self) -> &CopilotConfig {
        &self.config
    }

    /// Get a clone of the current configuration
    pub fn get_config_clone(&self) -> CopilotConfig {
        self.config.clone()
    }

    /// Current configuration with environment overrides applied.
    /// The file on disk is left untouched.
    pub fn effective_config(&self) -> CopilotConfig {
        let mut config = self.config.clone();
        config.apply_env_overrides();
        config
    }

    /// Update the configuration with a partial update
    pub fn update_config(&mut self, update: ConfigUpdate) -> AppResult<CopilotConfig> {
        let mut candidate = self.config.clone();
        candidate.apply_update(update);
        Self::save_to_file(&self.config_path, &candidate)?;
        self.config = candidate;
        Ok(self.config.clone())
    }

    /// Save the current configuration to disk
    pub fn save(&self) -> AppResult<()> {
        Self::save_to_file(&self.config_path, &self.config)
    }

    /// Reload configuration from disk
    pub fn reload(&mut self) -> AppResult<()> {
        self.config = Self::load_from_file(&self.config_path)?;
        Ok(())
    }

    /// Reset configuration to defaults
    pub fn reset(&mut self) -> AppResult<()> {
        self.config = CopilotConfig::default();
        self.save()?;
        Ok(())
    }

    /// Check if the config service is healthy
    pub fn is_healthy(&self) -> bool {
        self.config_path.exists() && self.config.validate().is_ok()
    }
}
