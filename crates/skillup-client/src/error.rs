//! Errors returned by the API client

use skillup_protocol::ValidationError;
use thiserror::Error;

/// Result type alias for API calls
pub type ApiResult<T> = Result<T, ApiError>;

/// Message used when a 403 comes back from the backend
pub const ADMIN_REQUIRED: &str = "Access denied. Admin privileges required.";

/// Message used when a non-admin account signs in or is validated
pub const DASHBOARD_ADMIN_REQUIRED: &str =
    "Access denied. Admin privileges required to access this dashboard.";

/// Errors that can occur while talking to the backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Rejected locally, nothing was sent
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// 401; the stored session has been cleared
    #[error("Authentication required. Please log in again.")]
    Authentication,

    /// 403, or an account without the admin role
    #[error("{message}")]
    AccessDenied {
        /// Error message
        message: String,
    },

    /// 400
    #[error("Invalid request: {message}")]
    BadRequest {
        /// Message reported by the backend
        message: String,
    },

    /// 5xx
    #[error("{message}")]
    Server {
        /// HTTP status
        status: u16,
        /// Error message
        message: String,
    },

    /// Transport failure before a response arrived
    #[error("Network error: {message}")]
    Network {
        /// Transport error text
        message: String,
    },

    /// The request exceeded its deadline
    #[error("Request timed out: {operation}")]
    Timeout {
        /// Operation that timed out
        operation: &'static str,
    },

    /// Any other non-success status
    #[error("{message}")]
    Http {
        /// HTTP status
        status: u16,
        /// Error message
        message: String,
    },

    /// A success response whose body did not match the expected shape
    #[error("Failed to parse response: {message}")]
    Decode {
        /// Parser error text
        message: String,
    },

    /// An authenticated call was made without a stored token
    #[error("No authentication token found")]
    NoSession,

    /// The session store could not be read or written
    #[error("Session storage error: {message}")]
    Session {
        /// Storage error text
        message: String,
    },
}

/// Coarse error categories the screens react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input, caught before or by the backend
    Validation,
    /// No valid session
    Authentication,
    /// Signed in, but not allowed
    Authorization,
    /// The backend failed
    Server,
    /// The backend could not be reached
    Network,
}

impl ApiError {
    /// Create an access denied error
    pub fn access_denied(message: impl Into<String>) -> Self {
        Self::AccessDenied {
            message: message.into(),
        }
    }

    /// Create a network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Wrap a session storage failure
    #[allow(clippy::needless_pass_by_value)]
    pub fn session(err: skillup_core::Error) -> Self {
        Self::Session {
            message: err.to_string(),
        }
    }

    /// Category of this error
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) | Self::BadRequest { .. } => ErrorKind::Validation,
            Self::Authentication | Self::NoSession | Self::Session { .. } => {
                ErrorKind::Authentication
            }
            Self::AccessDenied { .. } => ErrorKind::Authorization,
            Self::Server { .. } | Self::Http { .. } | Self::Decode { .. } => ErrorKind::Server,
            Self::Network { .. } | Self::Timeout { .. } => ErrorKind::Network,
        }
    }

    /// Whether repeating the same request might succeed
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Network { .. } | Self::Timeout { .. } | Self::Server { .. }
        )
    }

    /// Whether the session is gone and the operator must sign in again
    pub const fn requires_login(&self) -> bool {
        matches!(self, Self::Authentication | Self::NoSession)
    }
}
