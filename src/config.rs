//! Configuration handling for the TUI

use crate::api::{DEFAULT_DIRECTORY_URL, DEFAULT_SUBMIT_URL};
use anyhow::Result;
use directories::{ProjectDirs, UserDirs};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Environment override for the submission endpoint
pub const SUBMIT_URL_ENV: &str = "ADMISSION_SUBMIT_URL";
/// Environment override for the country directory
pub const DIRECTORY_URL_ENV: &str = "ADMISSION_DIRECTORY_URL";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Submission endpoint
    pub submit_url: Option<String>,
    /// Country directory endpoint
    pub directory_url: Option<String>,
    /// Where `form_submission.pdf` is written
    pub export_dir: Option<PathBuf>,
    /// Print command; the rendition is piped to its stdin
    pub print_command: Option<Vec<String>>,
    /// Send the form to the printer after submitting
    pub print_enabled: Option<bool>,
}

impl AppConfig {
    /// Project directories for config and log files
    pub fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("io", "admission", "admission-tui")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: AppConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    pub fn submit_url(&self) -> String {
        resolve(
            std::env::var(SUBMIT_URL_ENV).ok(),
            self.submit_url.as_deref(),
            DEFAULT_SUBMIT_URL,
        )
    }

    pub fn directory_url(&self) -> String {
        resolve(
            std::env::var(DIRECTORY_URL_ENV).ok(),
            self.directory_url.as_deref(),
            DEFAULT_DIRECTORY_URL,
        )
    }

    /// Configured directory, else the user's downloads, else the working directory
    pub fn export_dir(&self) -> PathBuf {
        self.export_dir
            .clone()
            .or_else(|| UserDirs::new().and_then(|d| d.download_dir().map(|p| p.to_path_buf())))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// The print command to use, or `None` when printing is disabled
    pub fn print_command(&self) -> Option<Vec<String>> {
        if !self.print_enabled.unwrap_or(true) {
            return None;
        }
        let command = self
            .print_command
            .clone()
            .unwrap_or_else(crate::platform::default_print_command);
        if command.is_empty() {
            None
        } else {
            Some(command)
        }
    }
}

/// Environment beats the config file, which beats the default. Blank values are ignored.
fn resolve(env: Option<String>, configured: Option<&str>, default: &str) -> String {
    env.filter(|v| !v.trim().is_empty())
        .or_else(|| {
            configured
                .filter(|v| !v.trim().is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.submit_url.is_none());
        assert!(config.directory_url.is_none());
        assert!(config.export_dir.is_none());
        assert!(config.print_command.is_none());
        assert!(config.print_enabled.is_none());
    }

    #[test]
    fn test_serialization() {
        let config = AppConfig {
            submit_url: Some("http://localhost:8080/api/form/submit".to_string()),
            directory_url: Some("http://localhost:8080/v2/all".to_string()),
            export_dir: Some(PathBuf::from("/tmp/exports")),
            print_command: Some(vec!["lp".to_string(), "-d".to_string(), "office".to_string()]),
            print_enabled: Some(false),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.submit_url, config.submit_url);
        assert_eq!(parsed.directory_url, config.directory_url);
        assert_eq!(parsed.export_dir, config.export_dir);
        assert_eq!(parsed.print_command, config.print_command);
        assert_eq!(parsed.print_enabled, Some(false));
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: AppConfig = serde_json::from_str("{}").unwrap();
        assert!(parsed.submit_url.is_none());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"export_dir": "/srv/forms", "unknown_field": "value"}"#;
        let parsed: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.export_dir, Some(PathBuf::from("/srv/forms")));
    }

    #[test]
    fn test_resolve_precedence() {
        assert_eq!(
            resolve(Some("http://env".to_string()), Some("http://file"), "http://default"),
            "http://env"
        );
        assert_eq!(resolve(None, Some("http://file"), "http://default"), "http://file");
        assert_eq!(resolve(None, None, "http://default"), "http://default");
    }

    #[test]
    fn test_resolve_ignores_blank_values() {
        assert_eq!(
            resolve(Some("  ".to_string()), Some(""), "http://default"),
            "http://default"
        );
    }

    #[test]
    fn test_configured_export_dir_wins() {
        let config = AppConfig {
            export_dir: Some(PathBuf::from("/srv/forms")),
            ..Default::default()
        };
        assert_eq!(config.export_dir(), PathBuf::from("/srv/forms"));
    }

    #[test]
    fn test_print_disabled() {
        let config = AppConfig {
            print_enabled: Some(false),
            print_command: Some(vec!["lp".to_string()]),
            ..Default::default()
        };
        assert!(config.print_command().is_none());
    }

    #[test]
    fn test_empty_print_command_disables_printing() {
        let config = AppConfig {
            print_command: Some(Vec::new()),
            ..Default::default()
        };
        assert!(config.print_command().is_none());
    }

    #[test]
    fn test_print_command_defaults_to_platform() {
        let config = AppConfig::default();
        assert_eq!(
            config.print_command(),
            Some(crate::platform::default_print_command())
        );
    }

    #[test]
    fn test_load_returns_ok_without_file() {
        // Load should return a config (default when the file doesn't exist)
        let result = AppConfig::load();
        tokio_test::assert_ok!(result);
    }
}
