//! Screen view-models
//!
//! Each screen loads from the API client when opened and on every user
//! action. A failed load records a [`Banner`](crate::components::Banner) and
//! swaps in the demo dataset so that the screen still has something to show.
//! Mutations touch local state only after the backend confirms them.

pub mod analytics;
pub mod courses;
pub mod dashboard;
pub mod settings;
pub mod users;

pub use analytics::AnalyticsPage;
pub use courses::CoursesPage;
pub use dashboard::DashboardPage;
pub use settings::SettingsPage;
pub use users::UsersPage;

use skillup_client::ApiError;
use skillup_protocol::FormErrors;
use std::fmt;
use thiserror::Error;

/// Reachability of the backend as last observed by a screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    /// A request is in flight
    #[default]
    Connecting,
    /// The last request succeeded
    Connected,
    /// The last request failed
    Offline,
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Connecting => "Connecting...",
            Self::Connected => "Connected",
            Self::Offline => "Offline",
        })
    }
}

/// Outcome of a delete request on a screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// First request; repeat within the window to delete
    Armed,
    /// The backend deleted the item and it was removed locally
    Deleted,
}

/// Why a form could not be saved
#[derive(Debug, Error)]
pub enum SaveError {
    /// The form failed local validation
    #[error("form has {} invalid field(s)", .0.len())]
    Invalid(FormErrors),

    /// The backend rejected the request
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl From<FormErrors> for SaveError {
    fn from(errors: FormErrors) -> Self {
        Self::Invalid(errors)
    }
}
