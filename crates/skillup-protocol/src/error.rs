//! Local validation failures
//!
//! These are raised before any request leaves the process. Messages are shown
//! to the operator verbatim.

use thiserror::Error;

/// A parameter rejected before it reached the network
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Login attempted with an empty email or password
    #[error("Email and password are required")]
    MissingCredentials,

    /// Email does not look like `local@domain.tld`
    #[error("Invalid email format")]
    InvalidEmail,

    /// Password shorter than the login minimum
    #[error("Password must be at least {min} characters long")]
    PasswordTooShort {
        /// Minimum accepted length
        min: usize,
    },

    /// Negative page index
    #[error("Invalid parameter: page must be a non-negative integer")]
    InvalidPage {
        /// Rejected value
        page: i64,
    },

    /// Page size outside `1..=100`
    #[error("Invalid parameter: size must be an integer between 1 and 100")]
    InvalidPageSize {
        /// Rejected value
        size: i64,
    },

    /// Role filter outside the known set
    #[error("Invalid role parameter. Must be one of: ADMIN, INSTRUCTOR, STUDENT")]
    InvalidRole {
        /// Rejected value
        role: String,
    },

    /// Blank identifier
    #[error("Invalid parameter: {field} must be a non-empty string")]
    MissingId {
        /// Parameter name (`userId`, `courseId`)
        field: &'static str,
    },

    /// Search keyword too short after trimming
    #[error("Invalid parameter: search keyword must be at least {min} characters long")]
    KeywordTooShort {
        /// Minimum accepted length
        min: usize,
    },
}

/// Result alias for validation
pub type Result<T> = std::result::Result<T, ValidationError>;
