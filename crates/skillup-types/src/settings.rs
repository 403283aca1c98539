//! Platform settings edited on the settings page

use crate::error::TypeError;
use crate::user::Role;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// All settings sections
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlatformSettings {
    /// Site identity and uploads
    pub general: GeneralSettings,
    /// Account policies
    pub users: UserManagementSettings,
    /// Mail notifications
    pub notifications: NotificationSettings,
    /// Runtime switches
    pub system: SystemSettings,
}

/// Site identity and upload limits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneralSettings {
    pub site_name: String,
    pub site_description: String,
    pub contact_email: String,
    pub support_email: String,
    /// Upload limit in megabytes
    pub max_file_size_mb: u32,
    pub allow_registration: bool,
    pub require_email_verification: bool,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            site_name: "SkillUp Learning Platform".to_string(),
            site_description: "Empowering learners worldwide with quality education".to_string(),
            contact_email: "admin@skillup.com".to_string(),
            support_email: "support@skillup.com".to_string(),
            max_file_size_mb: 100,
            allow_registration: true,
            require_email_verification: true,
        }
    }
}

/// Account policies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserManagementSettings {
    /// Role given to self-registered accounts
    pub default_role: Role,
    pub auto_approve_instructors: bool,
    pub allow_role_change: bool,
    pub session_timeout_hours: u32,
    pub password_min_length: u32,
    pub require_strong_password: bool,
}

impl Default for UserManagementSettings {
    fn default() -> Self {
        Self {
            default_role: Role::Student,
            auto_approve_instructors: false,
            allow_role_change: true,
            session_timeout_hours: 24,
            password_min_length: 8,
            require_strong_password: true,
        }
    }
}

/// Mail notifications and SMTP relay
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationSettings {
    pub email_notifications: bool,
    pub new_user_registration: bool,
    pub course_published: bool,
    pub system_errors: bool,
    pub weekly_report: bool,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: String,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email_notifications: true,
            new_user_registration: true,
            course_published: true,
            system_errors: true,
            weekly_report: true,
            smtp_host: "smtp.gmail.com".to_string(),
            smtp_port: 587,
            smtp_username: String::new(),
            smtp_password: String::new(),
        }
    }
}

impl fmt::Debug for NotificationSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationSettings")
            .field("email_notifications", &self.email_notifications)
            .field("new_user_registration", &self.new_user_registration)
            .field("course_published", &self.course_published)
            .field("system_errors", &self.system_errors)
            .field("weekly_report", &self.weekly_report)
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_username", &self.smtp_username)
            .field("smtp_password", &"<redacted>")
            .finish()
    }
}

/// Runtime switches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SystemSettings {
    pub maintenance_mode: bool,
    pub debug_mode: bool,
    /// Requests per hour per client
    pub api_rate_limit: u32,
    pub cache_enabled: bool,
    pub log_level: LogLevel,
    pub backup_frequency: BackupFrequency,
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self {
            maintenance_mode: false,
            debug_mode: false,
            api_rate_limit: 1000,
            cache_enabled: true,
            log_level: LogLevel::Info,
            backup_frequency: BackupFrequency::Daily,
        }
    }
}

/// Backend log verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
}

impl LogLevel {
    /// All levels, most severe first
    pub const ALL: [Self; 4] = [Self::Error, Self::Warn, Self::Info, Self::Debug];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warn => "WARN",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| TypeError::UnknownVariant {
                field: "logLevel",
                value: s.to_string(),
            })
    }
}

/// How often the backend snapshots its data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackupFrequency {
    Hourly,
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl BackupFrequency {
    pub const ALL: [Self; 4] = [Self::Hourly, Self::Daily, Self::Weekly, Self::Monthly];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

impl fmt::Display for BackupFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackupFrequency {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|freq| freq.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| TypeError::UnknownVariant {
                field: "backupFrequency",
                value: s.to_string(),
            })
    }
}
