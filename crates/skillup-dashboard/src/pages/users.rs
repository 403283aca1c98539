//! User management screen

use super::{ConnectionStatus, DeleteOutcome, SaveError};
use crate::components::{Banner, Pagination, Table};
use skillup_client::{ApiClient, ApiResult};
use skillup_protocol::{Confirmation, DeleteConfirmation, UserForm, fallback, paginate};
use skillup_types::{Page, PageRequest, Role, User};
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Shown when the screen opens without a stored session
pub const NOT_AUTHENTICATED: &str = "Not authenticated. Please log in again.";

/// User management screen state
#[derive(Debug, Clone)]
pub struct UsersPage {
    /// Rows currently shown
    pub users: Vec<User>,
    /// Footer position
    pub pagination: Pagination,
    /// Search term applied to the last load
    pub search: String,
    /// Role filter applied to the last load
    pub role_filter: Option<Role>,
    /// Backend reachability
    pub connection: ConnectionStatus,
    /// Banner after a failed load or action
    pub banner: Option<Banner>,
    /// Whether the last failure means the operator must sign in again
    pub needs_login: bool,
    page_size: u32,
    confirm: DeleteConfirmation<String>,
}

impl UsersPage {
    /// Empty screen with `page_size` rows per page and a delete window
    #[must_use]
    pub fn new(page_size: u32, delete_window: Duration) -> Self {
        Self {
            users: Vec::new(),
            pagination: Pagination::of(&Page::<User>::empty(page_size), page_size),
            search: String::new(),
            role_filter: None,
            connection: ConnectionStatus::Connecting,
            banner: None,
            needs_login: false,
            page_size,
            confirm: DeleteConfirmation::new(delete_window),
        }
    }

    /// Rows per page
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Load page `index` with the current search term and role filter
    pub async fn load(&mut self, client: &ApiClient, index: u32) {
        self.banner = None;
        self.needs_login = false;
        self.connection = ConnectionStatus::Connecting;

        if !client.has_session() {
            warn!("users screen opened without a session");
            self.banner = Some(Banner::notice("Connection Error", NOT_AUTHENTICATED));
            self.connection = ConnectionStatus::Offline;
            self.needs_login = true;
            return;
        }

        debug!(index, search = %self.search, role = ?self.role_filter, "loading users");
        match self.fetch(client, index).await {
            Ok(page) => {
                self.pagination = Pagination::of(&page, self.page_size());
                self.users = page.content;
                self.connection = ConnectionStatus::Connected;
            }
            Err(e) => {
                self.connection = ConnectionStatus::Offline;
                self.banner = Some(Banner::from_error(&e));
                if e.requires_login() {
                    self.needs_login = true;
                    self.users.clear();
                    return;
                }
                warn!(error = %e, "users unavailable, showing demo data");
                let search = Some(self.search.as_str()).filter(|s| !s.is_empty());
                let demo = fallback::filtered_demo_users(self.role_filter, search);
                let page = paginate(&demo, index, self.page_size());
                self.pagination = Pagination::of(&page, self.page_size());
                self.users = page.content;
            }
        }
    }

    async fn fetch(&self, client: &ApiClient, index: u32) -> ApiResult<Page<User>> {
        if self.search.is_empty() {
            let request = PageRequest::new(i64::from(index), i64::from(self.page_size()));
            let role = self.role_filter.map(Role::as_str);
            client.list_users(request, role).await
        } else {
            let found = client.search_users(&self.search).await?;
            Ok(Page::single(found))
        }
    }

    /// Search by name from the first page
    pub async fn search(&mut self, client: &ApiClient, term: &str) {
        term.trim().clone_into(&mut self.search);
        self.load(client, 0).await;
    }

    /// Filter by role from the first page
    pub async fn filter_role(&mut self, client: &ApiClient, role: Option<Role>) {
        self.role_filter = role;
        self.load(client, 0).await;
    }

    /// Move to page `index` if it exists
    pub async fn go_to(&mut self, client: &ApiClient, index: u32) {
        if index < self.pagination.total_pages.max(1) {
            self.load(client, index).await;
        }
    }

    /// Create a user, or update `editing` when given
    ///
    /// New users go to the top of the list; updated users are replaced in
    /// place.
    ///
    /// # Errors
    ///
    /// Returns the form errors or the backend error; the list is unchanged.
    pub async fn save(
        &mut self,
        client: &ApiClient,
        editing: Option<&str>,
        form: &UserForm,
    ) -> Result<User, SaveError> {
        if let Some(id) = editing {
            let request = form.check_update()?;
            let updated = client.update_user(id, &request).await?;
            if let Some(slot) = self.users.iter_mut().find(|u| u.id == updated.id) {
                *slot = updated.clone();
            }
            info!(user_id = %updated.id, "user updated");
            Ok(updated)
        } else {
            let request = form.check_create()?;
            let created = client.create_user(&request).await?;
            self.users.insert(0, created.clone());
            info!(user_id = %created.id, "user created");
            Ok(created)
        }
    }

    /// Ask to delete `user_id`; the second request within the window deletes
    ///
    /// # Errors
    ///
    /// Returns the backend error; the row stays and a banner is shown.
    pub async fn request_delete(
        &mut self,
        client: &ApiClient,
        user_id: &str,
        now: Instant,
    ) -> ApiResult<DeleteOutcome> {
        if self.confirm.request(user_id.to_string(), now) == Confirmation::Armed {
            debug!(user_id, "delete armed");
            return Ok(DeleteOutcome::Armed);
        }

        match client.delete_user(user_id).await {
            Ok(()) => {
                self.users.retain(|u| u.id != user_id);
                Ok(DeleteOutcome::Deleted)
            }
            Err(e) => {
                self.banner = Some(Banner::from_error(&e));
                self.needs_login = e.requires_login();
                Err(e)
            }
        }
    }

    /// Row waiting for its confirming delete, if any
    #[must_use]
    pub fn pending_delete(&self, now: Instant) -> Option<&str> {
        self.confirm.pending(now).map(String::as_str)
    }
}

impl fmt::Display for UsersPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "User Management [{}]", self.connection)?;
        if let Some(banner) = &self.banner {
            writeln!(f, "{banner}")?;
        }
        let filter = self.role_filter.map_or("All Roles", Role::as_str);
        writeln!(f, "Role: {filter}  Search: {}", self.search)?;
        writeln!(f)?;

        let mut table = Table::new(&["ID", "Name", "Email", "Role", "Joined"]);
        for user in &self.users {
            let joined = user
                .created_at
                .map(|t| t.format("%Y-%m-%d").to_string())
                .unwrap_or_default();
            table.row([
                user.id.clone(),
                user.name.clone(),
                user.email.clone(),
                user.role.to_string(),
                joined,
            ]);
        }
        write!(f, "{table}")?;
        if self.users.is_empty() {
            writeln!(f, "No users found")?;
        }
        writeln!(f, "{}", self.pagination)
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use skillup_client::{MemorySessionStore, RetryPolicy};
    use std::sync::Arc;

    fn offline_client(token: Option<&str>) -> ApiClient {
        let store = token.map_or_else(MemorySessionStore::new, MemorySessionStore::with_token);
        ApiClient::new("http://127.0.0.1:9/api", Arc::new(store)).with_retry(RetryPolicy::none())
    }

    #[tokio::test]
    async fn test_no_session_skips_fetch() {
        let mut page = UsersPage::new(10, Duration::from_secs(3));
        page.load(&offline_client(None), 0).await;

        assert!(page.users.is_empty());
        assert!(page.needs_login);
        assert_eq!(page.connection, ConnectionStatus::Offline);
        assert_eq!(
            page.banner.as_ref().map(|b| b.message.as_str()),
            Some(NOT_AUTHENTICATED)
        );
    }

    #[tokio::test]
    async fn test_offline_search_filters_demo_users() {
        let client = offline_client(Some("token"));
        let mut page = UsersPage::new(10, Duration::from_secs(3));
        page.search(&client, "SMITH").await;

        assert_eq!(page.connection, ConnectionStatus::Offline);
        assert_eq!(page.users.len(), 1);
        assert_eq!(page.users[0].name, "Jane Smith");
        assert!(!page.needs_login);
    }

    #[tokio::test]
    async fn test_offline_paging_uses_page_size() {
        let client = offline_client(Some("token"));
        let mut page = UsersPage::new(2, Duration::from_secs(3));
        page.load(&client, 0).await;
        assert_eq!(page.users.len(), 2);
        assert_eq!(page.pagination.total_pages, 3);

        page.go_to(&client, 2).await;
        assert_eq!(page.users.len(), 1);
        assert_eq!(page.pagination.page, 2);

        page.go_to(&client, 7).await;
        assert_eq!(page.pagination.page, 2);
    }
}
