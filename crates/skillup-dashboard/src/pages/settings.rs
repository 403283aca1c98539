//! Platform settings screen

use crate::settings_store::SettingsStore;
use serde_json::Value;
use skillup_protocol::{FormErrors, forms};
use skillup_types::{BackupFrequency, LogLevel, PlatformSettings, Role};
use std::fmt;
use thiserror::Error;
use tracing::{info, warn};

/// Why a settings change was refused
#[derive(Debug, Error)]
pub enum SettingsError {
    /// No field with that `section.field` key
    #[error("Unknown setting: {key}")]
    UnknownField {
        /// Requested key
        key: String,
    },

    /// The value does not fit the field's type
    #[error("Invalid value for {key}: {message}")]
    InvalidValue {
        /// Requested key
        key: String,
        /// Parse error text
        message: String,
    },

    /// The settings as a whole failed validation
    #[error("{} setting(s) are invalid", .0.len())]
    Invalid(FormErrors),

    /// The settings file could not be read or written
    #[error(transparent)]
    Store(#[from] skillup_core::Error),
}

/// Settings screen state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsPage {
    /// Values being edited
    pub settings: PlatformSettings,
    /// Messages from the last failed save, keyed `section.field`
    pub errors: FormErrors,
    /// Whether the values on screen match the saved file
    pub saved: bool,
}

impl SettingsPage {
    /// Open the screen with the saved settings, or defaults when unreadable
    pub fn open(store: &SettingsStore) -> Self {
        let settings = store.load().unwrap_or_else(|e| {
            warn!(error = %e, path = %store.path().display(), "unreadable settings, using defaults");
            PlatformSettings::default()
        });
        Self {
            settings,
            errors: FormErrors::new(),
            saved: true,
        }
    }

    /// Change one field addressed as `section.field`, e.g. `general.siteName`
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown key or a value of the wrong type.
    pub fn set(&mut self, key: &str, raw: &str) -> Result<(), SettingsError> {
        let unknown = || SettingsError::UnknownField {
            key: key.to_string(),
        };
        let invalid = |message: String| SettingsError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let (section, field) = key.split_once('.').ok_or_else(unknown)?;
        let mut tree = serde_json::to_value(&self.settings).map_err(|e| invalid(e.to_string()))?;
        let slot = tree
            .get_mut(section)
            .and_then(|s| s.get_mut(field))
            .ok_or_else(unknown)?;

        let replacement = match key {
            "system.logLevel" => {
                let level: LogLevel = raw.parse().map_err(|e: skillup_types::TypeError| invalid(e.to_string()))?;
                Value::from(level.as_str())
            }
            "system.backupFrequency" => {
                let frequency: BackupFrequency =
                    raw.parse().map_err(|e: skillup_types::TypeError| invalid(e.to_string()))?;
                Value::from(frequency.as_str())
            }
            "users.defaultRole" => {
                let role: Role = raw
                    .to_ascii_uppercase()
                    .parse()
                    .map_err(|e: skillup_types::TypeError| invalid(e.to_string()))?;
                Value::from(role.as_str())
            }
            _ if slot.is_boolean() => {
                Value::Bool(raw.parse().map_err(|e: std::str::ParseBoolError| invalid(e.to_string()))?)
            }
            _ if slot.is_number() => {
                Value::from(raw.parse::<u64>().map_err(|e| invalid(e.to_string()))?)
            }
            _ => Value::from(raw),
        };
        *slot = replacement;

        self.settings = serde_json::from_value(tree).map_err(|e| invalid(e.to_string()))?;
        self.saved = false;
        Ok(())
    }

    /// Validate and write the settings
    ///
    /// # Errors
    ///
    /// Returns the validation messages or the storage error.
    pub fn save(&mut self, store: &SettingsStore) -> Result<(), SettingsError> {
        if let Err(errors) = forms::check_settings(&self.settings) {
            self.errors.clone_from(&errors);
            return Err(SettingsError::Invalid(errors));
        }
        self.errors.clear();
        store.save(&self.settings)?;
        self.saved = true;
        info!("platform settings saved");
        Ok(())
    }

    /// Restore and save the defaults
    ///
    /// # Errors
    ///
    /// Returns the storage error.
    pub fn reset(&mut self, store: &SettingsStore) -> Result<(), SettingsError> {
        self.settings = store.reset()?;
        self.errors.clear();
        self.saved = true;
        Ok(())
    }
}

fn flag(on: bool) -> &'static str {
    if on { "on" } else { "off" }
}

impl fmt::Display for SettingsPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.settings;
        writeln!(f, "Platform Settings{}", if self.saved { "" } else { " (unsaved)" })?;
        for (key, message) in &self.errors {
            writeln!(f, "! {key}: {message}")?;
        }

        let g = &s.general;
        writeln!(f, "\n[general]")?;
        writeln!(f, "  siteName                 = {}", g.site_name)?;
        writeln!(f, "  siteDescription          = {}", g.site_description)?;
        writeln!(f, "  contactEmail             = {}", g.contact_email)?;
        writeln!(f, "  supportEmail             = {}", g.support_email)?;
        writeln!(f, "  maxFileSizeMb            = {}", g.max_file_size_mb)?;
        writeln!(f, "  allowRegistration        = {}", flag(g.allow_registration))?;
        writeln!(f, "  requireEmailVerification = {}", flag(g.require_email_verification))?;

        let u = &s.users;
        writeln!(f, "\n[users]")?;
        writeln!(f, "  defaultRole              = {}", u.default_role)?;
        writeln!(f, "  autoApproveInstructors   = {}", flag(u.auto_approve_instructors))?;
        writeln!(f, "  allowRoleChange          = {}", flag(u.allow_role_change))?;
        writeln!(f, "  sessionTimeoutHours      = {}", u.session_timeout_hours)?;
        writeln!(f, "  passwordMinLength        = {}", u.password_min_length)?;
        writeln!(f, "  requireStrongPassword    = {}", flag(u.require_strong_password))?;

        let n = &s.notifications;
        writeln!(f, "\n[notifications]")?;
        writeln!(f, "  emailNotifications       = {}", flag(n.email_notifications))?;
        writeln!(f, "  newUserRegistration      = {}", flag(n.new_user_registration))?;
        writeln!(f, "  coursePublished          = {}", flag(n.course_published))?;
        writeln!(f, "  systemErrors             = {}", flag(n.system_errors))?;
        writeln!(f, "  weeklyReport             = {}", flag(n.weekly_report))?;
        writeln!(f, "  smtpHost                 = {}", n.smtp_host)?;
        writeln!(f, "  smtpPort                 = {}", n.smtp_port)?;
        writeln!(f, "  smtpUsername             = {}", n.smtp_username)?;
        let password = if n.smtp_password.is_empty() { "" } else { "********" };
        writeln!(f, "  smtpPassword             = {password}")?;

        let y = &s.system;
        writeln!(f, "\n[system]")?;
        writeln!(f, "  maintenanceMode          = {}", flag(y.maintenance_mode))?;
        writeln!(f, "  debugMode                = {}", flag(y.debug_mode))?;
        writeln!(f, "  apiRateLimit             = {}", y.api_rate_limit)?;
        writeln!(f, "  cacheEnabled             = {}", flag(y.cache_enabled))?;
        writeln!(f, "  logLevel                 = {}", y.log_level)?;
        writeln!(f, "  backupFrequency          = {}", y.backup_frequency)
    }
}
