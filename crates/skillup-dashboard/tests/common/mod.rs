//! Shared fixtures for console integration tests

#![allow(dead_code, clippy::missing_panics_doc)]

use serde_json::{Value, json};
use skillup_client::{ApiClient, MemorySessionStore, RetryPolicy, SessionStore};
use skillup_core::Config;
use skillup_dashboard::{App, AppState};
use std::sync::{Arc, Once};
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

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

/// Mock backend plus a console pointed at it
pub struct TestConsole {
    pub server: MockServer,
    pub session: Arc<MemorySessionStore>,
    pub app: App,
    _dir: TempDir,
}

impl TestConsole {
    /// Console with no stored session
    pub async fn start() -> Self {
        Self::with_session(MemorySessionStore::new()).await
    }

    /// Console whose session holds `ADMIN_TOKEN`, validated as an admin
    pub async fn signed_in() -> Self {
        let console = Self::with_session(MemorySessionStore::with_token(ADMIN_TOKEN)).await;
        Mock::given(method("GET"))
            .and(path("/api/auth/validate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(user_json(
                1,
                "Admin User",
                "ADMIN",
            ))))
            .mount(&console.server)
            .await;
        console
    }

    async fn with_session(store: MemorySessionStore) -> Self {
        init_test_logging();
        let server = MockServer::start().await;
        let dir = TempDir::new().unwrap();

        let mut config = Config::default();
        config.api.base_url = format!("{}/api", server.uri());
        config.settings.file = Some(dir.path().join("settings.toml"));

        let session = Arc::new(store);
        let shared: Arc<dyn SessionStore> = session.clone();
        let client = ApiClient::new(config.api.base_url.clone(), shared)
            .with_retry(RetryPolicy::new(2, Duration::from_millis(10)));
        let app = App::new(AppState::with_client(config, client));

        Self {
            server,
            session,
            app,
            _dir: dir,
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

/// Course JSON as the backend sends it
pub fn course_json(id: u64, title: &str, active: bool, featured: bool) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": "Hands-on course with projects and weekly reviews.",
        "category": "Programming",
        "instructor": user_json(2, "Jane Smith", "INSTRUCTOR"),
        "isActive": active,
        "isFeatured": featured,
        "createdAt": "2024-02-01T09:00:00"
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

/// Dashboard overview counters
pub fn stats_json() -> Value {
    json!({
        "totalUsers": 120,
        "totalInstructors": 12,
        "totalStudents": 105,
        "totalCourses": 34,
        "totalEnrollments": 870,
        "recentUsers": [],
        "recentCourses": []
    })
}
