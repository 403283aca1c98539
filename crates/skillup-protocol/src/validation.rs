//! Parameter checks applied before a request is sent

use crate::error::{Result, ValidationError};
use regex::Regex;
use skillup_types::{LoginRequest, PageRequest, Role};
use std::sync::LazyLock;

/// Shortest password accepted at login
pub const MIN_LOGIN_PASSWORD_LEN: usize = 6;

/// Largest page size the backend serves
pub const MAX_PAGE_SIZE: i64 = 100;

/// Shortest search keyword, counted after trimming
pub const MIN_KEYWORD_LEN: usize = 2;

static EMAIL_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

/// Whether `email` has the shape `local@domain.tld`
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(email))
}

/// Check login credentials
///
/// # Errors
///
/// Returns the first rule the credentials break.
pub fn validate_login(request: &LoginRequest) -> Result<()> {
    if request.email.is_empty() || request.password.is_empty() {
        return Err(ValidationError::MissingCredentials);
    }
    if !is_valid_email(&request.email) {
        return Err(ValidationError::InvalidEmail);
    }
    if request.password.chars().count() < MIN_LOGIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_LOGIN_PASSWORD_LEN,
        });
    }
    Ok(())
}

/// Check page index and size
///
/// # Errors
///
/// Returns [`ValidationError::InvalidPage`] for a negative index and
/// [`ValidationError::InvalidPageSize`] for a size outside `1..=100`.
pub fn validate_page(request: PageRequest) -> Result<()> {
    if request.page < 0 {
        return Err(ValidationError::InvalidPage { page: request.page });
    }
    if request.size < 1 || request.size > MAX_PAGE_SIZE {
        return Err(ValidationError::InvalidPageSize { size: request.size });
    }
    Ok(())
}

/// Parse a role filter
///
/// # Errors
///
/// Returns [`ValidationError::InvalidRole`] when `role` is not one of the
/// three known roles.
pub fn validate_role(role: &str) -> Result<Role> {
    role.parse().map_err(|_| ValidationError::InvalidRole {
        role: role.to_string(),
    })
}

/// Check that an identifier is not blank
///
/// # Errors
///
/// Returns [`ValidationError::MissingId`] naming `field`.
pub fn validate_id<'a>(id: &'a str, field: &'static str) -> Result<&'a str> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingId { field });
    }
    Ok(trimmed)
}

/// Check and trim a search keyword
///
/// # Errors
///
/// Returns [`ValidationError::KeywordTooShort`] when fewer than two
/// characters remain after trimming.
pub fn validate_keyword(keyword: &str) -> Result<&str> {
    let trimmed = keyword.trim();
    if trimmed.chars().count() < MIN_KEYWORD_LEN {
        return Err(ValidationError::KeywordTooShort {
            min: MIN_KEYWORD_LEN,
        });
    }
    Ok(trimmed)
}
