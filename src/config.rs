//! Configuration management module.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Configuration load result.
#[derive(Debug)]
pub enum ConfigLoadResult {
    /// Config loaded successfully.
    Loaded(AppConfig),
    /// Config file missing (first run).
    Missing,
    /// Config file exists but invalid.
    Invalid(ConfigError),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Main application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub portal: PortalConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Student portal API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API origin, every endpoint path is joined onto it.
    pub base_url: String,
    /// Deadline applied to every request in seconds (default: 15).
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_request_timeout_secs() -> u64 {
    15
}

/// External pages reached from the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalConfig {
    /// Origin of the project upload site.
    pub upload_url: String,
    /// Source of the absences list.
    pub absences_url: String,
}

/// UI preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Quiet period before a project search fires (default: 500).
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
}

fn default_search_debounce_ms() -> u64 {
    500
}

impl AppConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("net", "miage", "student-portal")
    }

    /// Get config file path (per-user config directory, executable directory as fallback).
    pub fn default_path() -> PathBuf {
        match Self::project_dirs() {
            Some(dirs) => dirs.config_dir().join("config.toml"),
            None => Self::exe_dir().join("config.toml"),
        }
    }

    /// Directory holding the session file and logs.
    pub fn data_dir() -> PathBuf {
        match Self::project_dirs() {
            Some(dirs) => dirs.data_dir().to_path_buf(),
            None => Self::exe_dir(),
        }
    }

    fn exe_dir() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Attempt to load config with detailed result.
    pub fn try_load(path: &Path) -> ConfigLoadResult {
        if !path.exists() {
            return ConfigLoadResult::Missing;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<AppConfig>(&content) {
                Ok(config) => match config.validate() {
                    Ok(()) => ConfigLoadResult::Loaded(config),
                    Err(e) => ConfigLoadResult::Invalid(e),
                },
                Err(e) => ConfigLoadResult::Invalid(ConfigError::Parse(e)),
            },
            Err(e) => ConfigLoadResult::Invalid(ConfigError::Read(e)),
        }
    }

    /// Load the config, writing defaults on first run and falling back to
    /// defaults when the file is invalid.
    pub fn load_or_init(path: &Path) -> AppConfig {
        match Self::try_load(path) {
            ConfigLoadResult::Loaded(config) => {
                tracing::info!("Config loaded successfully");
                config
            }
            ConfigLoadResult::Missing => {
                tracing::info!("Config missing, writing defaults");
                let config = AppConfig::default();
                if let Err(e) = config.save(path) {
                    tracing::warn!("Failed to write default config: {}", e);
                }
                config
            }
            ConfigLoadResult::Invalid(e) => {
                tracing::warn!("Config invalid, using defaults: {}", e);
                AppConfig::default()
            }
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_http_url("API base URL", &self.api.base_url)?;
        check_http_url("Upload portal URL", &self.portal.upload_url)?;
        check_http_url("Absences URL", &self.portal.absences_url)?;
        if self.api.request_timeout_secs < 1 {
            return Err(ConfigError::Validation(
                "Request timeout must be at least 1 second".to_string(),
            ));
        }
        if self.ui.search_debounce_ms == 0 {
            return Err(ConfigError::Validation(
                "Search debounce must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Save configuration to file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}

fn check_http_url(name: &str, url: &str) -> Result<(), ConfigError> {
    if url.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{name} cannot be empty")));
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{name} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl UiConfig {
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://miage.myartsonline.com/".to_string(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            upload_url: "https://miageksar.ct.ws/".to_string(),
            absences_url: "https://jsonplaceholder.typicode.com/posts".to_string(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            search_debounce_ms: default_search_debounce_ms(),
        }
    }
}
