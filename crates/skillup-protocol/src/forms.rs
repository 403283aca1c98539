//! Create/edit form rules for users, courses and platform settings
//!
//! Each field reports at most one message, the first rule it breaks, in the
//! order the form shows them.

use crate::validation::is_valid_email;
use skillup_types::{
    CreateCourseRequest, CreateUserRequest, PlatformSettings, Role, UpdateUserRequest, User,
};
use std::borrow::Cow;
use std::collections::BTreeMap;
use validator::{Validate, ValidationError as FieldError, ValidationErrors};

/// Shortest course description
pub const MIN_DESCRIPTION_LEN: usize = 50;

/// Field name to the first message reported for it
pub type FormErrors = BTreeMap<String, String>;

fn field_error(code: &'static str, message: &'static str) -> FieldError {
    FieldError::new(code).with_message(Cow::Borrowed(message))
}

fn user_name(value: &str) -> Result<(), FieldError> {
    if value.trim().is_empty() {
        return Err(field_error("required", "Name is required"));
    }
    Ok(())
}

fn user_email(value: &str) -> Result<(), FieldError> {
    if value.trim().is_empty() {
        return Err(field_error("required", "Email is required"));
    }
    if !is_valid_email(value) {
        return Err(field_error("email", "Please enter a valid email address"));
    }
    Ok(())
}

fn course_title(value: &str) -> Result<(), FieldError> {
    if value.trim().is_empty() {
        return Err(field_error("required", "Course title is required"));
    }
    Ok(())
}

fn course_description(value: &str) -> Result<(), FieldError> {
    if value.trim().is_empty() {
        return Err(field_error("required", "Course description is required"));
    }
    if value.chars().count() < MIN_DESCRIPTION_LEN {
        return Err(field_error(
            "length",
            "Description must be at least 50 characters long",
        ));
    }
    Ok(())
}

fn course_category(value: &str) -> Result<(), FieldError> {
    if value.is_empty() {
        return Err(field_error("required", "Please select a category"));
    }
    Ok(())
}

/// Flatten validator output to one message per field
#[must_use]
pub fn collect_errors(errors: &ValidationErrors) -> FormErrors {
    errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, list)| {
            list.first().map(|error| {
                let message = error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string);
                (field.to_string(), message)
            })
        })
        .collect()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// State of the user create/edit dialog
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub struct UserForm {
    /// Display name
    #[validate(custom(function = "user_name"))]
    pub name: String,

    /// Login email
    #[validate(custom(function = "user_email"))]
    pub email: String,

    /// New password; left empty when editing keeps the current one
    #[validate(length(min = 8, message = "Password must be at least 8 characters long"))]
    pub password: Option<String>,

    /// Account role
    pub role: Role,

    /// Free-form biography
    pub bio: Option<String>,
}

impl Default for UserForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            password: None,
            role: Role::Student,
            bio: None,
        }
    }
}

impl UserForm {
    /// Form prefilled from an existing account
    #[must_use]
    pub fn edit(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            password: None,
            role: user.role,
            bio: user.bio.clone(),
        }
    }

    /// Validate for account creation, where a password is mandatory
    ///
    /// # Errors
    ///
    /// Returns one message per offending field.
    pub fn check_create(&self) -> Result<CreateUserRequest, FormErrors> {
        let mut errors = self
            .validate()
            .map_or_else(|e| collect_errors(&e), |()| FormErrors::new());
        let password = non_empty(self.password.clone());
        if password.is_none() {
            errors.insert("password".to_string(), "Password is required".to_string());
        }
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(CreateUserRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: password.unwrap_or_default(),
            role: self.role,
            bio: non_empty(self.bio.clone()),
        })
    }

    /// Validate for an edit; an empty password leaves it unchanged
    ///
    /// # Errors
    ///
    /// Returns one message per offending field.
    pub fn check_update(&self) -> Result<UpdateUserRequest, FormErrors> {
        let normalized = Self {
            password: non_empty(self.password.clone()),
            ..self.clone()
        };
        normalized.validate().map_err(|e| collect_errors(&e))?;
        Ok(UpdateUserRequest {
            name: Some(normalized.name.trim().to_string()),
            email: Some(normalized.email.trim().to_string()),
            password: normalized.password,
            role: Some(normalized.role),
            bio: non_empty(normalized.bio),
        })
    }
}

/// State of the course create dialog
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct CourseForm {
    /// Course title
    #[validate(custom(function = "course_title"))]
    pub title: String,

    /// Long description
    #[validate(custom(function = "course_description"))]
    pub description: String,

    /// Category picked from the category list
    #[validate(custom(function = "course_category"))]
    pub category: String,

    /// Optional thumbnail image URL
    #[validate(url(message = "Please enter a valid URL"))]
    pub thumbnail_url: Option<String>,
}

impl CourseForm {
    /// Validate and build the create payload
    ///
    /// # Errors
    ///
    /// Returns one message per offending field.
    pub fn check(&self) -> Result<CreateCourseRequest, FormErrors> {
        let normalized = Self {
            thumbnail_url: non_empty(self.thumbnail_url.clone()),
            ..self.clone()
        };
        normalized.validate().map_err(|e| collect_errors(&e))?;
        Ok(CreateCourseRequest {
            title: normalized.title.trim().to_string(),
            description: normalized.description.trim().to_string(),
            category: normalized.category,
            thumbnail_url: normalized.thumbnail_url,
        })
    }
}

/// Check platform settings before they are saved
///
/// # Errors
///
/// Returns one message per offending field, keyed `section.field`.
pub fn check_settings(settings: &PlatformSettings) -> Result<(), FormErrors> {
    let mut errors = FormErrors::new();
    let mut fail = |field: &str, message: &str| {
        errors
            .entry(field.to_string())
            .or_insert_with(|| message.to_string());
    };

    let general = &settings.general;
    if general.site_name.trim().is_empty() {
        fail("general.siteName", "Site name is required");
    }
    if !is_valid_email(&general.contact_email) {
        fail("general.contactEmail", "Please enter a valid email address");
    }
    if !is_valid_email(&general.support_email) {
        fail("general.supportEmail", "Please enter a valid email address");
    }
    if !(1..=1024).contains(&general.max_file_size_mb) {
        fail("general.maxFileSizeMb", "Max file size must be between 1 and 1024 MB");
    }

    let users = &settings.users;
    if !(1..=720).contains(&users.session_timeout_hours) {
        fail("users.sessionTimeoutHours", "Session timeout must be between 1 and 720 hours");
    }
    if !(6..=128).contains(&users.password_min_length) {
        fail("users.passwordMinLength", "Minimum password length must be between 6 and 128");
    }

    let notifications = &settings.notifications;
    if notifications.email_notifications && notifications.smtp_host.trim().is_empty() {
        fail("notifications.smtpHost", "SMTP host is required when email notifications are on");
    }
    if notifications.smtp_port == 0 {
        fail("notifications.smtpPort", "SMTP port must be between 1 and 65535");
    }

    if settings.system.api_rate_limit == 0 {
        fail("system.apiRateLimit", "API rate limit must be at least 1");
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
