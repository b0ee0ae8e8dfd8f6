//! Configuration handling for the TUI

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable that overrides the configured endpoint
pub const ENDPOINT_ENV: &str = "CONTACT_ENDPOINT_URL";

const DEFAULT_RESET_DELAY_MS: u64 = 3000;
const DEFAULT_SUCCESS_TOAST_MS: u64 = 4000;
const DEFAULT_ERROR_TOAST_MS: u64 = 6000;

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ContactConfig {
    /// Delivery endpoint; the simulated endpoint is used when absent
    pub endpoint_url: Option<String>,
    /// Delay between a successful submission and the form reset
    pub reset_delay_ms: Option<u64>,
    /// Lifetime of success notifications
    pub success_toast_ms: Option<u64>,
    /// Lifetime of error notifications
    pub error_toast_ms: Option<u64>,
}

impl ContactConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("studio", "contact", "contact-tui")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Directory for the log file
    pub fn log_dir() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
    }

    /// Load configuration from file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::load_file()?;
        if let Ok(url) = std::env::var(ENDPOINT_ENV) {
            config.endpoint_url = Some(url);
        }
        Ok(config)
    }

    fn load_file() -> Result<Self> {
        if let Some(path) = Self::config_path() {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: ContactConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Save configuration to file
    #[allow(dead_code)]
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(self)?;
            fs::write(&path, content)?;
        }
        Ok(())
    }

    /// Endpoint URL, ignoring blank values
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn reset_delay(&self) -> Duration {
        Duration::from_millis(self.reset_delay_ms.unwrap_or(DEFAULT_RESET_DELAY_MS))
    }

    pub fn success_toast(&self) -> Duration {
        Duration::from_millis(self.success_toast_ms.unwrap_or(DEFAULT_SUCCESS_TOAST_MS))
    }

    pub fn error_toast(&self) -> Duration {
        Duration::from_millis(self.error_toast_ms.unwrap_or(DEFAULT_ERROR_TOAST_MS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ContactConfig::default();
        assert!(config.endpoint_url.is_none());
        assert!(config.endpoint().is_none());
        assert_eq!(config.reset_delay(), Duration::from_secs(3));
        assert_eq!(config.success_toast(), Duration::from_secs(4));
        assert_eq!(config.error_toast(), Duration::from_secs(6));
    }

    #[test]
    fn test_serialization() {
        let config = ContactConfig {
            endpoint_url: Some("https://example.com/send-contact".to_string()),
            reset_delay_ms: Some(5000),
            success_toast_ms: Some(1000),
            error_toast_ms: Some(2000),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: ContactConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.endpoint(), Some("https://example.com/send-contact"));
        assert_eq!(parsed.reset_delay(), Duration::from_secs(5));
        assert_eq!(parsed.success_toast(), Duration::from_secs(1));
        assert_eq!(parsed.error_toast(), Duration::from_secs(2));
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: ContactConfig = serde_json::from_str("{}").unwrap();
        assert!(parsed.endpoint_url.is_none());
        assert_eq!(parsed.reset_delay(), Duration::from_millis(3000));
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"reset_delay_ms": 10, "unknown_field": "value"}"#;
        let parsed: ContactConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.reset_delay(), Duration::from_millis(10));
    }

    #[test]
    fn test_blank_endpoint_is_ignored() {
        let config = ContactConfig {
            endpoint_url: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(config.endpoint().is_none());
    }

    #[test]
    fn test_endpoint_is_trimmed() {
        let config = ContactConfig {
            endpoint_url: Some(" https://example.com/send \n".to_string()),
            ..Default::default()
        };
        assert_eq!(config.endpoint(), Some("https://example.com/send"));
    }

    #[test]
    fn test_config_path_returns_option() {
        // Just test that the function doesn't panic
        let _path = ContactConfig::config_path();
        let _logs = ContactConfig::log_dir();
    }
}
