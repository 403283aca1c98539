//! Decide what to show for a requested path given the auth state

use crate::routes::Route;
use skillup_types::User;

/// Authentication state of the console
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthStatus {
    /// Stored token still being validated
    #[default]
    Initializing,
    /// Signed in as an admin
    Authenticated(User),
    /// No usable session
    Unauthenticated,
}

impl AuthStatus {
    /// Whether a user is signed in
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// Whether validation is still in flight
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Initializing)
    }

    /// The signed-in user, if any
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        match self {
            Self::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

/// Outcome of routing a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Show a spinner with this message
    Loading(&'static str),
    /// Navigate elsewhere, replacing history
    Redirect(Route),
    /// Show the route
    Render(Route),
}

/// Message shown while a protected route waits for validation
pub const AUTHENTICATING: &str = "Authenticating...";

/// Message shown while the application itself starts
pub const LOADING_APPLICATION: &str = "Loading application...";

/// Route `path` under `status`
///
/// Unknown paths and `/` go to the dashboard; the login screen sends an
/// authenticated user to the dashboard; protected screens send anyone else
/// to the login screen.
#[must_use]
pub fn guard(status: &AuthStatus, path: &str) -> GuardDecision {
    let Some(route) = Route::from_path(path) else {
        return GuardDecision::Redirect(Route::Dashboard);
    };

    match (status, route) {
        (AuthStatus::Initializing, Route::Login) => GuardDecision::Loading(LOADING_APPLICATION),
        (AuthStatus::Initializing, _) => GuardDecision::Loading(AUTHENTICATING),
        (AuthStatus::Authenticated(_), Route::Login) => GuardDecision::Redirect(Route::Dashboard),
        (AuthStatus::Unauthenticated, route) if route.is_protected() => {
            GuardDecision::Redirect(Route::Login)
        }
        (_, route) => GuardDecision::Render(route),
    }
}
