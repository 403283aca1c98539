//! HTTP client for the `SkillUp` admin API

use crate::error::{ADMIN_REQUIRED, ApiError, ApiResult, DASHBOARD_ADMIN_REQUIRED};
use crate::events::{EVENT_CAPACITY, SessionEvent};
use crate::retry::RetryPolicy;
use crate::session::SessionStore;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use skillup_core::Config;
use skillup_protocol::validation;
use skillup_types::{
    ApiEnvelope, Course, CourseAction, CourseAnalytics, CreateCourseRequest, CreateUserRequest,
    DashboardStats, EnrollmentAnalytics, ErrorBody, LoginData, LoginRequest, LoginResponse, Page,
    PageRequest, SessionStatus, SortDirection, UpdateUserRequest, User, UserAnalytics,
};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

type Query = Vec<(&'static str, String)>;

/// API client for the admin endpoints
///
/// Cloning is cheap; clones share the HTTP connection pool, the session store
/// and the event channel.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Arc<dyn SessionStore>,
    events: broadcast::Sender<SessionEvent>,
    retry: RetryPolicy,
    health_timeout: Duration,
    list_timeout: Duration,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("session", &self.session)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client for `base_url` (including the `/api` prefix)
    pub fn new(base_url: impl Into<String>, session: Arc<dyn SessionStore>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
            events,
            retry: RetryPolicy::default(),
            health_timeout: Duration::from_secs(5),
            list_timeout: Duration::from_secs(8),
        }
    }

    /// Create a client from loaded configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &Config, session: Arc<dyn SessionStore>) -> ApiResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.api.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ApiError::network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            retry: RetryPolicy::from(&config.retry),
            health_timeout: config.api.health_timeout(),
            list_timeout: config.api.list_timeout(),
            ..Self::new(config.api.base_url.clone(), session)
        })
    }

    /// Replace the retry policy
    #[must_use]
    pub const fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Replace the health probe and user list timeouts
    #[must_use]
    pub const fn with_timeouts(mut self, health: Duration, list: Duration) -> Self {
        self.health_timeout = health;
        self.list_timeout = list;
        self
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Shared session store
    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    /// Subscribe to session lifecycle events
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Whether a token is stored and what it starts with
    pub fn session_status(&self) -> SessionStatus {
        let token = self.session.load().unwrap_or_else(|e| {
            warn!(error = %e, "failed to read session store");
            None
        });
        SessionStatus::from_token(token.as_deref())
    }

    /// Whether a token is stored
    pub fn has_session(&self) -> bool {
        self.session_status().has_token
    }

    // Health

    /// Probe `GET /health`; any failure counts as unhealthy
    pub async fn health(&self) -> bool {
        let request = self
            .http
            .get(self.url("/health"))
            .timeout(self.health_timeout);
        match request.send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!(error = %e, "server health check failed");
                false
            }
        }
    }

    // Authentication

    /// Sign in; only admin accounts are accepted
    ///
    /// The token is persisted only after the role check passes.
    ///
    /// # Errors
    ///
    /// Returns a validation error for malformed credentials,
    /// [`ApiError::AccessDenied`] for non-admin accounts, or the mapped HTTP
    /// error.
    pub async fn login(&self, credentials: &LoginRequest) -> ApiResult<LoginResponse> {
        validation::validate_login(credentials)
            .map_err(|e| self.client_error("login", e, &credentials.email))?;

        let request = self
            .http
            .post(self.url("/auth/login"))
            .json(credentials);
        let data: LoginData = self.execute("login", request, None, false).await?;
        let response = LoginResponse::from(data);

        if !response.user.role.is_admin() {
            warn!(email = %response.user.email, role = %response.user.role, "non-admin sign-in rejected");
            return Err(ApiError::access_denied(DASHBOARD_ADMIN_REQUIRED));
        }

        self.session
            .store(&response.token)
            .map_err(ApiError::session)?;
        info!(email = %response.user.email, "admin signed in");
        Ok(response)
    }

    /// Check the stored token and return its account
    ///
    /// A token belonging to a non-admin is discarded.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NoSession`] without a stored token,
    /// [`ApiError::AccessDenied`] for non-admin accounts, or the mapped HTTP
    /// error.
    pub async fn validate_token(&self) -> ApiResult<User> {
        if self.session.load().map_err(ApiError::session)?.is_none() {
            return Err(ApiError::NoSession);
        }

        let user: User = self
            .retry
            .run("validateToken", move || {
                self.get_json("validateToken", "/auth/validate".to_string(), Vec::new(), None)
            })
            .await?;

        if !user.role.is_admin() {
            warn!(email = %user.email, role = %user.role, "stored session belongs to a non-admin");
            self.end_session(SessionEvent::Revoked);
            return Err(ApiError::access_denied(DASHBOARD_ADMIN_REQUIRED));
        }
        Ok(user)
    }

    /// Forget the stored token
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be cleared.
    pub fn logout(&self) -> ApiResult<()> {
        self.session.clear().map_err(ApiError::session)?;
        info!("signed out");
        Ok(())
    }

    // Dashboard

    /// `GET /admin/analytics/overview`
    ///
    /// # Errors
    ///
    /// Returns the mapped HTTP error.
    pub async fn dashboard_stats(&self) -> ApiResult<DashboardStats> {
        self.retry
            .run("getDashboardStats", move || {
                self.get_json(
                    "getDashboardStats",
                    "/admin/analytics/overview".to_string(),
                    Vec::new(),
                    None,
                )
            })
            .await
    }

    // Users

    /// `GET /admin/users`, optionally filtered by role
    ///
    /// # Errors
    ///
    /// Returns a validation error for bad paging or role, or the mapped HTTP
    /// error.
    pub async fn list_users(&self, page: PageRequest, role: Option<&str>) -> ApiResult<Page<User>> {
        let role_desc = role.unwrap_or("-");
        validation::validate_page(page).map_err(|e| {
            self.client_error("getAllUsers", e, &format!("page={} size={} role={role_desc}", page.page, page.size))
        })?;
        let role = role
            .map(validation::validate_role)
            .transpose()
            .map_err(|e| self.client_error("getAllUsers", e, role_desc))?;

        let mut query: Query = vec![("page", page.page.to_string()), ("size", page.size.to_string())];
        if let Some(role) = role {
            query.push(("role", role.as_str().to_string()));
        }

        let timeout = self.list_timeout;
        self.retry
            .run("getAllUsers", move || {
                self.get_json("getAllUsers", "/admin/users".to_string(), query.clone(), Some(timeout))
            })
            .await
    }

    /// `GET /admin/users/{id}`
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank id, or the mapped HTTP error.
    pub async fn get_user(&self, user_id: &str) -> ApiResult<User> {
        let id = validation::validate_id(user_id, "userId")
            .map_err(|e| self.client_error("getUserById", e, user_id))?;
        let path = format!("/admin/users/{id}");
        self.retry
            .run("getUserById", move || {
                self.get_json("getUserById", path.clone(), Vec::new(), None)
            })
            .await
    }

    /// `GET /users/search?name=`
    ///
    /// # Errors
    ///
    /// Returns a validation error for a short keyword, or the mapped HTTP
    /// error.
    pub async fn search_users(&self, name: &str) -> ApiResult<Vec<User>> {
        let name = validation::validate_keyword(name)
            .map_err(|e| self.client_error("searchUsers", e, name))?
            .to_string();
        self.retry
            .run("searchUsers", move || {
                self.get_list("searchUsers", "/users/search", vec![("name", name.clone())])
            })
            .await
    }

    /// `POST /admin/users`
    ///
    /// # Errors
    ///
    /// Returns the mapped HTTP error.
    pub async fn create_user(&self, user: &CreateUserRequest) -> ApiResult<User> {
        self.send_json("createUser", Method::POST, "/admin/users", Some(user))
            .await
    }

    /// `PUT /admin/users/{id}`
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank id, or the mapped HTTP error.
    pub async fn update_user(&self, user_id: &str, update: &UpdateUserRequest) -> ApiResult<User> {
        let id = validation::validate_id(user_id, "userId")
            .map_err(|e| self.client_error("updateUser", e, user_id))?;
        self.send_json(
            "updateUser",
            Method::PUT,
            &format!("/admin/users/{id}"),
            Some(update),
        )
        .await
    }

    /// `DELETE /admin/users/{id}`
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank id, or the mapped HTTP error.
    pub async fn delete_user(&self, user_id: &str) -> ApiResult<()> {
        let id = validation::validate_id(user_id, "userId")
            .map_err(|e| self.client_error("deleteUser", e, user_id))?;
        let request = self.http.delete(self.url(&format!("/admin/users/{id}")));
        self.dispatch("deleteUser", request, None, true).await?;
        info!(user_id = %id, "user deleted");
        Ok(())
    }

    // Courses

    /// `GET /admin/courses`, sorted by `sort_by`
    ///
    /// # Errors
    ///
    /// Returns a validation error for bad paging, or the mapped HTTP error.
    pub async fn list_courses(
        &self,
        page: PageRequest,
        sort_by: &str,
        direction: SortDirection,
    ) -> ApiResult<Page<Course>> {
        validation::validate_page(page).map_err(|e| {
            self.client_error("getAllCourses", e, &format!("page={} size={}", page.page, page.size))
        })?;

        let query: Query = vec![
            ("page", page.page.to_string()),
            ("size", page.size.to_string()),
            ("sortBy", sort_by.to_string()),
            ("sortDirection", direction.to_string()),
        ];
        self.retry
            .run("getAllCourses", move || {
                self.get_json("getAllCourses", "/admin/courses".to_string(), query.clone(), None)
            })
            .await
    }

    /// `GET /courses/{id}`
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank id, or the mapped HTTP error.
    pub async fn get_course(&self, course_id: &str) -> ApiResult<Course> {
        let id = validation::validate_id(course_id, "courseId")
            .map_err(|e| self.client_error("getCourseById", e, course_id))?;
        let path = format!("/courses/{id}");
        self.retry
            .run("getCourseById", move || {
                self.get_json("getCourseById", path.clone(), Vec::new(), None)
            })
            .await
    }

    /// `GET /courses/search?keyword=`
    ///
    /// # Errors
    ///
    /// Returns a validation error for a short keyword, or the mapped HTTP
    /// error.
    pub async fn search_courses(&self, keyword: &str) -> ApiResult<Vec<Course>> {
        let keyword = validation::validate_keyword(keyword)
            .map_err(|e| self.client_error("searchCourses", e, keyword))?
            .to_string();
        self.retry
            .run("searchCourses", move || {
                self.get_list("searchCourses", "/courses/search", vec![("keyword", keyword.clone())])
            })
            .await
    }

    /// `POST /courses`
    ///
    /// # Errors
    ///
    /// Returns the mapped HTTP error.
    pub async fn create_course(&self, course: &CreateCourseRequest) -> ApiResult<Course> {
        self.send_json("createCourse", Method::POST, "/courses", Some(course))
            .await
    }

    /// `DELETE /admin/courses/{id}`
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank id, or the mapped HTTP error.
    pub async fn delete_course(&self, course_id: &str) -> ApiResult<()> {
        let id = validation::validate_id(course_id, "courseId")
            .map_err(|e| self.client_error("deleteCourse", e, course_id))?;
        let request = self.http.delete(self.url(&format!("/admin/courses/{id}")));
        self.dispatch("deleteCourse", request, None, true).await?;
        info!(course_id = %id, "course deleted");
        Ok(())
    }

    /// `PUT /admin/courses/{id}/{feature|unfeature|activate|deactivate}`
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank id, or the mapped HTTP error.
    pub async fn set_course_flag(&self, course_id: &str, action: CourseAction) -> ApiResult<Course> {
        let id = validation::validate_id(course_id, "courseId")
            .map_err(|e| self.client_error("updateCourseFlag", e, course_id))?;
        let path = format!("/admin/courses/{id}/{}", action.path_segment());
        self.send_json::<Course, ()>("updateCourseFlag", Method::PUT, &path, None)
            .await
    }

    /// `GET /courses/categories`
    ///
    /// # Errors
    ///
    /// Returns the mapped HTTP error.
    pub async fn categories(&self) -> ApiResult<Vec<String>> {
        self.retry
            .run("getCategories", move || {
                self.get_list("getCategories", "/courses/categories", Vec::new())
            })
            .await
    }

    // Analytics

    /// `GET /admin/analytics/users`
    ///
    /// # Errors
    ///
    /// Returns the mapped HTTP error.
    pub async fn user_analytics(&self) -> ApiResult<UserAnalytics> {
        self.analytics("getUserAnalytics", "users").await
    }

    /// `GET /admin/analytics/courses`
    ///
    /// # Errors
    ///
    /// Returns the mapped HTTP error.
    pub async fn course_analytics(&self) -> ApiResult<CourseAnalytics> {
        self.analytics("getCourseAnalytics", "courses").await
    }

    /// `GET /admin/analytics/enrollments`
    ///
    /// # Errors
    ///
    /// Returns the mapped HTTP error.
    pub async fn enrollment_analytics(&self) -> ApiResult<EnrollmentAnalytics> {
        self.analytics("getEnrollmentAnalytics", "enrollments").await
    }

    async fn analytics<T: DeserializeOwned>(&self, operation: &'static str, segment: &str) -> ApiResult<T> {
        let path = format!("/admin/analytics/{segment}");
        self.retry
            .run(operation, move || self.get_json(operation, path.clone(), Vec::new(), None))
            .await
    }

    // Plumbing

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        path: String,
        query: Query,
        timeout: Option<Duration>,
    ) -> ApiResult<T> {
        let request = self.http.get(self.url(&path)).query(&query);
        self.execute(operation, request, timeout, true).await
    }

    /// GET a list, treating a non-array `data` as empty
    async fn get_list<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        path: &'static str,
        query: Query,
    ) -> ApiResult<Vec<T>> {
        let data: serde_json::Value = self
            .get_json(operation, path.to_string(), query, None)
            .await?;
        if !data.is_array() {
            debug!(operation, "response data is not an array, using empty list");
            return Ok(Vec::new());
        }
        serde_json::from_value(data).map_err(|e| ApiError::Decode {
            message: e.to_string(),
        })
    }

    async fn send_json<T, B>(
        &self,
        operation: &'static str,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let mut request = self.http.request(method, self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }
        self.execute(operation, request, None, true).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: RequestBuilder,
        timeout: Option<Duration>,
        authenticated: bool,
    ) -> ApiResult<T> {
        let response = self
            .dispatch(operation, request, timeout, authenticated)
            .await?;
        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(operation, &e))?;
        let envelope: ApiEnvelope<T> =
            serde_json::from_slice(&body).map_err(|e| {
                error!(operation, error = %e, "unexpected response body");
                ApiError::Decode {
                    message: e.to_string(),
                }
            })?;
        Ok(envelope.data)
    }

    async fn dispatch(
        &self,
        operation: &'static str,
        request: RequestBuilder,
        timeout: Option<Duration>,
        authenticated: bool,
    ) -> ApiResult<Response> {
        let mut request = request.header(CONTENT_TYPE, "application/json");
        if authenticated
            && let Some(token) = self.session.load().map_err(ApiError::session)?
        {
            request = request.bearer_auth(token);
        }
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request
            .send()
            .await
            .map_err(|e| self.transport_error(operation, &e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().to_string();
        let body = response.bytes().await.unwrap_or_default();
        Err(self.status_error(operation, status, &url, &body))
    }

    fn transport_error(&self, operation: &'static str, err: &reqwest::Error) -> ApiError {
        if err.is_timeout() {
            warn!(operation, base_url = %self.base_url, "request timed out");
            ApiError::Timeout { operation }
        } else {
            warn!(operation, base_url = %self.base_url, error = %err, "request failed before a response");
            ApiError::network(err.to_string())
        }
    }

    fn status_error(&self, operation: &'static str, status: StatusCode, url: &str, body: &[u8]) -> ApiError {
        let code = status.as_u16();
        let message = serde_json::from_slice::<ErrorBody>(body)
            .unwrap_or_else(|_| ErrorBody::synthetic(code))
            .message;
        error!(
            operation,
            status = code,
            url,
            message = message.as_deref().unwrap_or(""),
            "API server error"
        );

        match code {
            401 => {
                self.end_session(SessionEvent::Expired);
                ApiError::Authentication
            }
            403 => ApiError::access_denied(ADMIN_REQUIRED),
            400 => ApiError::BadRequest {
                message: message.unwrap_or_else(|| "Please check your input parameters".to_string()),
            },
            500 => ApiError::Server {
                status: code,
                message: format!(
                    "Server error: {}",
                    message.as_deref().unwrap_or("Internal server error")
                ),
            },
            501..=599 => ApiError::Server {
                status: code,
                message: format!(
                    "Server unavailable ({code}): The service is temporarily down. Please try again later."
                ),
            },
            _ => ApiError::Http {
                status: code,
                message: message.unwrap_or_else(|| format!("HTTP error! status: {code}")),
            },
        }
    }

    /// Clear the session and announce `event`, once per stored token
    fn end_session(&self, event: SessionEvent) {
        match self.session.clear() {
            Ok(Some(_)) => {
                warn!(?event, "session cleared");
                // No subscribers is fine
                let _ = self.events.send(event);
            }
            Ok(None) => {}
            Err(e) => error!(error = %e, "failed to clear session"),
        }
    }

    fn client_error(
        &self,
        operation: &'static str,
        err: skillup_protocol::ValidationError,
        params: &str,
    ) -> ApiError {
        warn!(operation, params, error = %err, base_url = %self.base_url, "API client error");
        ApiError::from(err)
    }
}
