//! Error banner shown above a screen whose data came from the demo set

use skillup_client::{ApiError, ErrorKind};
use std::fmt;

/// What the banner offers to do about the error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerAction {
    /// Send the operator to the login screen
    GoToLogin,
    /// Try the same request again
    Retry,
}

/// Title, explanation and follow-up action for a failed load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    /// Short heading
    pub title: &'static str,
    /// Explanation shown under the heading
    pub message: String,
    /// Offered follow-up, if any
    pub action: Option<BannerAction>,
}

impl Banner {
    /// Banner for an error returned by the client
    #[must_use]
    pub fn from_error(err: &ApiError) -> Self {
        match err.kind() {
            ErrorKind::Authorization => Self {
                title: "Access Denied",
                message: "You need admin privileges to access this dashboard. Please log in with an admin account."
                    .to_string(),
                action: Some(BannerAction::GoToLogin),
            },
            ErrorKind::Authentication => Self {
                title: "Connection Error",
                message: "Your session has expired. Please log in again.".to_string(),
                action: Some(BannerAction::GoToLogin),
            },
            ErrorKind::Network => Self {
                title: "Connection Error",
                message: "Unable to connect to server. Showing demo data instead.".to_string(),
                action: Some(BannerAction::Retry),
            },
            ErrorKind::Validation | ErrorKind::Server => Self {
                title: "Connection Error",
                message: format!("Using demo data. {err}"),
                action: None,
            },
        }
    }

    /// Banner with a fixed message and no action
    #[must_use]
    pub fn notice(title: &'static str, message: impl Into<String>) -> Self {
        Self {
            title,
            message: message.into(),
            action: None,
        }
    }
}

impl fmt::Display for Banner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "! {}: {}", self.title, self.message)?;
        match self.action {
            Some(BannerAction::GoToLogin) => write!(f, " [Go to Login]"),
            Some(BannerAction::Retry) => write!(f, " [Retry Connection]"),
            None => Ok(()),
        }
    }
}
