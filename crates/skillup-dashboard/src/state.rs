//! Application state shared by the router and the screens

use crate::auth::AuthContext;
use crate::settings_store::SettingsStore;
use skillup_client::{ApiClient, ApiError, FileSessionStore, SessionStore};
use skillup_core::Config;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Why the console could not start
#[derive(Debug, Error)]
pub enum StartupError {
    /// The token file could not be opened
    #[error(transparent)]
    Storage(#[from] skillup_core::Error),

    /// The HTTP client could not be built
    #[error(transparent)]
    Client(#[from] ApiError),
}

/// Configuration plus the long-lived services built from it
#[derive(Debug, Clone)]
pub struct AppState {
    /// Loaded configuration
    pub config: Config,
    /// Backend client
    pub client: ApiClient,
    /// Sign-in state
    pub auth: AuthContext,
    /// Saved platform settings
    pub settings: SettingsStore,
}

impl AppState {
    /// Build the state, keeping the session in the configured token file
    ///
    /// # Errors
    ///
    /// Returns an error if the token file is unreadable or the HTTP client
    /// cannot be built.
    pub fn new(config: Config) -> Result<Self, StartupError> {
        let token_path = config.session.token_path();
        debug!(path = %token_path.display(), "opening session store");
        let session = FileSessionStore::open(token_path)?;
        Self::with_session(config, Arc::new(session))
    }

    /// Build the state around an existing session store
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_session(config: Config, session: Arc<dyn SessionStore>) -> Result<Self, StartupError> {
        let client = ApiClient::from_config(&config, session)?;
        Ok(Self::with_client(config, client))
    }

    /// Build the state around an existing client
    #[must_use]
    pub fn with_client(config: Config, client: ApiClient) -> Self {
        let auth = AuthContext::new(client.clone());
        let settings = SettingsStore::new(config.settings.path());
        Self {
            config,
            client,
            auth,
            settings,
        }
    }
}
