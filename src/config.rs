//! Configuration handling for the TUI

use crate::questions::DEFAULT_ENDPOINT;
use crate::state::ValidationMode;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable overriding the question service endpoint
pub const ENDPOINT_ENV: &str = "INTAKE_QUESTIONS_URL";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Survey question service endpoint
    pub questions_endpoint: Option<String>,
    /// Timeout for a single question request
    pub request_timeout_secs: Option<u64>,
    /// Re-validate after every change (false: only on submit)
    pub validate_on_change: Option<bool>,
}

impl TuiConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("io", "intake", "intake-tui")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Path of the log file; the terminal belongs to the UI
    pub fn log_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_local_dir().join("intake-tui.log"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::config_path() {
            if path.exists() {
                let content = fs::read_to_string(&path)
                    .with_context(|| format!("reading {}", path.display()))?;
                let config: TuiConfig = serde_json::from_str(&content)
                    .with_context(|| format!("parsing {}", path.display()))?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Endpoint after applying the environment override
    pub fn questions_endpoint(&self) -> String {
        self.endpoint_with_override(std::env::var(ENDPOINT_ENV).ok())
    }

    fn endpoint_with_override(&self, env_value: Option<String>) -> String {
        env_value
            .filter(|v| !v.is_empty())
            .or_else(|| self.questions_endpoint.clone())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    pub fn validation_mode(&self) -> ValidationMode {
        match self.validate_on_change {
            Some(false) => ValidationMode::OnSubmit,
            _ => ValidationMode::OnChange,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TuiConfig::default();
        assert!(config.questions_endpoint.is_none());
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.validation_mode(), ValidationMode::OnChange);
        assert_eq!(config.endpoint_with_override(None), DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_validate_on_submit() {
        let config = TuiConfig {
            validate_on_change: Some(false),
            ..Default::default()
        };
        assert_eq!(config.validation_mode(), ValidationMode::OnSubmit);
    }

    #[test]
    fn test_endpoint_precedence() {
        let config = TuiConfig {
            questions_endpoint: Some("http://localhost:8080/q".to_string()),
            ..Default::default()
        };
        assert_eq!(config.endpoint_with_override(None), "http://localhost:8080/q");
        assert_eq!(
            config.endpoint_with_override(Some("http://env/q".to_string())),
            "http://env/q"
        );
        // An empty variable does not count as an override
        assert_eq!(
            config.endpoint_with_override(Some(String::new())),
            "http://localhost:8080/q"
        );
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: TuiConfig = serde_json::from_str("{}").unwrap();
        assert!(parsed.questions_endpoint.is_none());
        assert!(parsed.validate_on_change.is_none());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"request_timeout_secs": 3, "unknown_field": "value"}"#;
        let parsed: TuiConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.request_timeout(), Duration::from_secs(3));
    }

    #[test]
    fn test_serialization() {
        let config = TuiConfig {
            questions_endpoint: Some("https://questions.internal/api".to_string()),
            request_timeout_secs: Some(2),
            validate_on_change: Some(true),
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: TuiConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(
            parsed.questions_endpoint.as_deref(),
            Some("https://questions.internal/api")
        );
        assert_eq!(parsed.request_timeout_secs, Some(2));
        assert_eq!(parsed.validate_on_change, Some(true));
    }

    #[test]
    fn test_load_returns_default_when_no_file() {
        // Load should return default config when file doesn't exist
        let result = TuiConfig::load();
        assert!(result.is_ok());
    }
}
