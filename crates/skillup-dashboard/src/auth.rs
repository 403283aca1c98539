//! Console-wide authentication state

use skillup_client::{ApiClient, ApiResult, SessionEvent};
use skillup_protocol::AuthStatus;
use skillup_types::{LoginRequest, User};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Who is signed in, shared by every screen
///
/// Status changes are published on a watch channel so that the router can
/// react to a session ending in the middle of a page load.
#[derive(Debug, Clone)]
pub struct AuthContext {
    client: ApiClient,
    status: Arc<watch::Sender<AuthStatus>>,
}

impl AuthContext {
    /// Context in the [`AuthStatus::Initializing`] state
    pub fn new(client: ApiClient) -> Self {
        let (status, _) = watch::channel(AuthStatus::Initializing);
        Self {
            client,
            status: Arc::new(status),
        }
    }

    /// Current status
    pub fn status(&self) -> AuthStatus {
        self.status.borrow().clone()
    }

    /// Signed-in user, if any
    pub fn user(&self) -> Option<User> {
        self.status.borrow().user().cloned()
    }

    /// Receive every status change
    pub fn subscribe(&self) -> watch::Receiver<AuthStatus> {
        self.status.subscribe()
    }

    /// Validate a stored token, if there is one
    ///
    /// A token the backend no longer accepts is discarded.
    pub async fn initialize(&self) -> AuthStatus {
        if !self.client.has_session() {
            debug!("no stored session");
            return self.set(AuthStatus::Unauthenticated);
        }

        match self.client.validate_token().await {
            Ok(user) => {
                info!(email = %user.email, "restored session");
                self.set(AuthStatus::Authenticated(user))
            }
            Err(e) => {
                warn!(error = %e, "stored session rejected");
                if let Err(e) = self.client.logout() {
                    warn!(error = %e, "failed to discard stored session");
                }
                self.set(AuthStatus::Unauthenticated)
            }
        }
    }

    /// Sign in with `credentials`
    ///
    /// # Errors
    ///
    /// Returns the client error; the context stays signed out.
    pub async fn login(&self, credentials: &LoginRequest) -> ApiResult<User> {
        match self.client.login(credentials).await {
            Ok(response) => {
                self.set(AuthStatus::Authenticated(response.user.clone()));
                Ok(response.user)
            }
            Err(e) => {
                self.set(AuthStatus::Unauthenticated);
                Err(e)
            }
        }
    }

    /// Sign out
    pub fn logout(&self) {
        if let Err(e) = self.client.logout() {
            warn!(error = %e, "failed to clear session store");
        }
        self.set(AuthStatus::Unauthenticated);
    }

    /// React to a session event published by the client
    pub fn handle(&self, event: SessionEvent) {
        info!(?event, "session ended by backend");
        self.set(AuthStatus::Unauthenticated);
    }

    fn set(&self, status: AuthStatus) -> AuthStatus {
        self.status.send_replace(status.clone());
        status
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use skillup_client::MemorySessionStore;

    fn offline_context(token: Option<&str>) -> AuthContext {
        let store = token.map_or_else(MemorySessionStore::new, MemorySessionStore::with_token);
        AuthContext::new(ApiClient::new("http://127.0.0.1:9/api", Arc::new(store)))
    }

    #[tokio::test]
    async fn test_initialize_without_token() {
        let auth = offline_context(None);
        assert_eq!(auth.status(), AuthStatus::Initializing);
        assert_eq!(auth.initialize().await, AuthStatus::Unauthenticated);
    }

    #[test]
    fn test_session_event_signs_out() {
        let auth = offline_context(Some("token"));
        let mut changes = auth.subscribe();
        auth.handle(SessionEvent::Expired);

        assert!(changes.has_changed().unwrap());
        assert_eq!(*changes.borrow_and_update(), AuthStatus::Unauthenticated);
    }

    #[test]
    fn test_logout_clears_token() {
        let auth = offline_context(Some("token"));
        auth.logout();
        assert_eq!(auth.status(), AuthStatus::Unauthenticated);
        assert!(auth.user().is_none());
    }
}
