//! Configuration management for the `SkillUp` admin console
//!
//! Values come from built-in defaults, then an optional `skillup.toml` in the
//! working directory (or an explicit file), then `SKILLUP__SECTION__KEY`
//! environment variables.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Backend connection
    #[serde(default)]
    pub api: ApiConfig,

    /// Retry policy for idempotent reads
    #[serde(default)]
    pub retry: RetryConfig,

    /// Persisted session token
    #[serde(default)]
    pub session: SessionConfig,

    /// Screen behaviour
    #[serde(default)]
    pub dashboard: DashboardConfig,

    /// Platform settings file
    #[serde(default)]
    pub settings: SettingsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL including the `/api` prefix
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Timeout for the health probe, in seconds
    #[serde(default = "default_health_timeout")]
    pub health_timeout_secs: u64,

    /// Timeout for the paginated user list, in seconds
    #[serde(default = "default_list_timeout")]
    pub list_timeout_secs: u64,

    /// Timeout applied to every other request, in seconds
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl ApiConfig {
    /// Health probe timeout
    #[must_use]
    pub const fn health_timeout(&self) -> Duration {
        Duration::from_secs(self.health_timeout_secs)
    }

    /// User list timeout
    #[must_use]
    pub const fn list_timeout(&self) -> Duration {
        Duration::from_secs(self.list_timeout_secs)
    }

    /// Transport-wide timeout, if configured
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

/// Retry policy for idempotent reads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total attempts including the first
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Backoff unit; attempt `n` waits `n * backoff_ms` before the next one
    #[serde(default = "default_backoff_ms")]
    pub backoff_ms: u64,
}

/// Persisted session token
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Token file; defaults to `admin_token` in the data directory
    #[serde(default)]
    pub token_file: Option<PathBuf>,
}

impl SessionConfig {
    /// Resolved token file location
    #[must_use]
    pub fn token_path(&self) -> PathBuf {
        self.token_file
            .clone()
            .unwrap_or_else(|| data_dir().join(TOKEN_FILE_NAME))
    }
}

/// Screen behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Rows per page on the users screen
    #[serde(default = "default_users_page_size")]
    pub users_page_size: u32,

    /// Cards per page on the courses screen
    #[serde(default = "default_courses_page_size")]
    pub courses_page_size: u32,

    /// Seconds a delete stays armed waiting for confirmation
    #[serde(default = "default_delete_confirm")]
    pub delete_confirm_secs: u64,
}

impl DashboardConfig {
    /// Delete confirmation window
    #[must_use]
    pub const fn delete_window(&self) -> Duration {
        Duration::from_secs(self.delete_confirm_secs)
    }
}

/// Platform settings file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsConfig {
    /// Settings file; defaults to `settings.toml` in the data directory
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl SettingsConfig {
    /// Resolved settings file location
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.file
            .clone()
            .unwrap_or_else(|| data_dir().join(SETTINGS_FILE_NAME))
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level, used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json or text)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// File name the session token is stored under
pub const TOKEN_FILE_NAME: &str = "admin_token";

/// File name the platform settings are stored under
pub const SETTINGS_FILE_NAME: &str = "settings.toml";

/// Per-user data directory, or `.skillup` when the platform has none
#[must_use]
pub fn data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "SkillUp", "skillup-admin").map_or_else(
        || PathBuf::from(".skillup"),
        |dirs| dirs.data_dir().to_path_buf(),
    )
}

// Default value functions
fn default_base_url() -> String {
    "https://skillup-zvp9.onrender.com/api".to_string()
}

const fn default_health_timeout() -> u64 {
    5
}

const fn default_list_timeout() -> u64 {
    8
}

const fn default_max_attempts() -> u32 {
    2
}

const fn default_backoff_ms() -> u64 {
    500
}

const fn default_users_page_size() -> u32 {
    10
}

const fn default_courses_page_size() -> u32 {
    12
}

const fn default_delete_confirm() -> u64 {
    3
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            health_timeout_secs: default_health_timeout(),
            list_timeout_secs: default_list_timeout(),
            request_timeout_secs: None,
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            backoff_ms: default_backoff_ms(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            users_page_size: default_users_page_size(),
            courses_page_size: default_courses_page_size(),
            delete_confirm_secs: default_delete_confirm(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from `skillup.toml` and the environment
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or parsed.
    pub fn load() -> crate::Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration, reading `file` instead of `skillup.toml` when given
    ///
    /// An explicit file must exist; the default one is optional.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or parsed.
    pub fn load_from(file: Option<&Path>) -> crate::Result<Self> {
        let source = match file {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("skillup").required(false),
        };

        let config = config::Config::builder()
            .add_source(source)
            .add_source(config::Environment::with_prefix("SKILLUP").separator("__"))
            .build()?;

        let loaded: Self = config.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Reject values no screen can work with
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Validation`] naming the offending key.
    pub fn validate(&self) -> crate::Result<()> {
        let invalid = |field: &str, message: &str| crate::Error::Validation {
            field: field.to_string(),
            message: message.to_string(),
        };

        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://") {
            return Err(invalid("api.base_url", "must start with http:// or https://"));
        }
        if self.retry.max_attempts == 0 {
            return Err(invalid("retry.max_attempts", "must be at least 1"));
        }
        for (field, size) in [
            ("dashboard.users_page_size", self.dashboard.users_page_size),
            ("dashboard.courses_page_size", self.dashboard.courses_page_size),
        ] {
            if !(1..=100).contains(&size) {
                return Err(invalid(field, "must be between 1 and 100"));
            }
        }
        Ok(())
    }
}
