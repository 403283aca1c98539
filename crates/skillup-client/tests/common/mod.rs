//! Shared fixtures for client integration tests

#![allow(dead_code, clippy::missing_panics_doc)]

use serde_json::{Value, json};
use skillup_client::{ApiClient, MemorySessionStore, RetryPolicy, SessionStore};
use std::sync::{Arc, Once};
use std::time::Duration;
use wiremock::MockServer;

static INIT: Once = Once::new();

/// Initialize test logging once per binary
pub fn init_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .try_init();
    });
}

/// Token handed out by the mocked login endpoint
pub const ADMIN_TOKEN: &str = "eyJhbGciOiJIUzI1NiJ9.admin.signature";

/// Mock server plus a client pointed at it
pub struct TestBackend {
    pub server: MockServer,
    pub session: Arc<MemorySessionStore>,
    pub client: ApiClient,
}

impl TestBackend {
    /// Backend with no stored session
    pub async fn start() -> Self {
        Self::with_session(MemorySessionStore::new()).await
    }

    /// Backend whose session already holds `ADMIN_TOKEN`
    pub async fn signed_in() -> Self {
        Self::with_session(MemorySessionStore::with_token(ADMIN_TOKEN)).await
    }

    async fn with_session(store: MemorySessionStore) -> Self {
        init_test_logging();
        let server = MockServer::start().await;
        let session = Arc::new(store);
        let shared: Arc<dyn SessionStore> = session.clone();
        let client = ApiClient::new(format!("{}/api", server.uri()), shared)
            .with_retry(RetryPolicy::new(2, Duration::from_millis(10)));
        Self {
            server,
            session,
            client,
        }
    }

    /// Currently stored token
    pub fn token(&self) -> Option<String> {
        self.session.load().unwrap()
    }
}

/// Wrap `data` in the success envelope
pub fn envelope(data: Value) -> Value {
    json!({ "success": true, "data": data })
}

/// User JSON as the backend sends it
pub fn user_json(id: u64, name: &str, role: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "email": format!("{}@skillup.com", name.to_lowercase().replace(' ', ".")),
        "role": role,
        "createdAt": "2024-01-15T10:30:00"
    })
}

/// Login `data` for an account with `role`
pub fn login_json(role: &str) -> Value {
    json!({
        "token": ADMIN_TOKEN,
        "id": 1,
        "email": "admin@skillup.com",
        "name": "Admin User",
        "role": role,
        "type": "Bearer"
    })
}

/// Spring-style page of `content`
pub fn page_json(content: Vec<Value>, page: u32, size: u32, total: u64) -> Value {
    let total_pages = total.div_ceil(u64::from(size.max(1)));
    json!({
        "content": content,
        "number": page,
        "size": size,
        "totalElements": total,
        "totalPages": total_pages,
        "first": page == 0,
        "last": u64::from(page) + 1 >= total_pages
    })
}
