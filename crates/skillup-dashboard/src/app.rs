//! Router and layout
//!
//! Every navigation goes through the route guard. Screens are loaded only
//! once the guard allows them; if a load ends the session, navigation is
//! re-run so the operator lands on the login screen.

use crate::components::Loading;
use crate::pages::{AnalyticsPage, CoursesPage, DashboardPage, SettingsPage, UsersPage};
use crate::state::AppState;
use skillup_client::SessionEvent;
use skillup_protocol::{AuthStatus, GuardDecision, Route, breadcrumbs, guard, nav_items};
use skillup_types::Role;
use std::fmt::Write as _;
use tokio::sync::{broadcast, watch};
use tracing::{debug, info};

/// Redirect hops followed before giving up and showing the login screen
const MAX_REDIRECTS: usize = 4;

/// What the router decided to show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Waiting for the session check
    Loading(Loading),
    /// A screen, after following redirects
    Screen(Route),
}

/// Parameters a screen is opened with
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenOptions {
    /// Zero-based page index
    pub page: u32,
    /// Search term
    pub search: Option<String>,
    /// Role filter for the users screen
    pub role: Option<Role>,
}

/// A rendered screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// Route that was finally shown
    pub route: Route,
    /// Full text, layout included
    pub text: String,
}

/// The console: state, current location and session tracking
#[derive(Debug)]
pub struct App {
    state: AppState,
    location: String,
    events: broadcast::Receiver<SessionEvent>,
    status: watch::Receiver<AuthStatus>,
}

impl App {
    /// Console at `/`, not yet initialized
    #[must_use]
    pub fn new(state: AppState) -> Self {
        let events = state.client.subscribe();
        let status = state.auth.subscribe();
        Self {
            state,
            location: "/".to_string(),
            events,
            status,
        }
    }

    /// Shared state
    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// Path of the screen currently shown
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Validate any stored session
    pub async fn initialize(&mut self) -> AuthStatus {
        let status = self.state.auth.initialize().await;
        self.status.mark_unchanged();
        status
    }

    /// Resolve `path` through the guard, following redirects
    pub fn navigate(&mut self, path: &str) -> View {
        let status = self.state.auth.status();
        let mut target = path.to_string();
        for _ in 0..MAX_REDIRECTS {
            match guard(&status, &target) {
                GuardDecision::Loading(message) => return View::Loading(Loading::new(message)),
                GuardDecision::Redirect(route) => {
                    debug!(from = %target, to = route.path(), "redirect");
                    route.path().clone_into(&mut target);
                }
                GuardDecision::Render(route) => {
                    self.location = target;
                    return View::Screen(route);
                }
            }
        }
        Route::Login.path().clone_into(&mut self.location);
        View::Screen(Route::Login)
    }

    /// Navigate to `path` and render whatever the guard allows
    pub async fn open(&mut self, path: &str, options: &OpenOptions) -> Rendered {
        let route = match self.navigate(path) {
            View::Loading(loading) => {
                return Rendered {
                    route: Route::from_path(path).unwrap_or(Route::Dashboard),
                    text: loading.to_string(),
                };
            }
            View::Screen(route) => route,
        };

        let body = self.render_screen(route, options).await;
        if self.sync_session() {
            info!(path, "session ended while loading, returning to login");
            let View::Screen(route) = self.navigate(path) else {
                return Rendered {
                    route: Route::Login,
                    text: body,
                };
            };
            let text = self.layout(route, &self.render_screen(route, options).await);
            return Rendered { route, text };
        }

        Rendered {
            route,
            text: self.layout(route, &body),
        }
    }

    /// Apply session events published since the last check
    ///
    /// Returns whether the auth status changed.
    pub fn sync_session(&mut self) -> bool {
        while let Ok(event) = self.events.try_recv() {
            self.state.auth.handle(event);
        }
        let changed = self.status.has_changed().unwrap_or(false);
        self.status.mark_unchanged();
        changed
    }

    async fn render_screen(&self, route: Route, options: &OpenOptions) -> String {
        let client = &self.state.client;
        let dashboard = &self.state.config.dashboard;
        match route {
            Route::Login => "Sign in with `skillup-admin login --email <EMAIL> --password <PASSWORD>`\n"
                .to_string(),
            Route::Dashboard => DashboardPage::open(client).await.to_string(),
            Route::Users => {
                let mut page = UsersPage::new(dashboard.users_page_size, dashboard.delete_window());
                page.role_filter = options.role;
                if let Some(search) = &options.search {
                    search.trim().clone_into(&mut page.search);
                }
                page.load(client, options.page).await;
                page.to_string()
            }
            Route::Courses => {
                let mut page =
                    CoursesPage::new(dashboard.courses_page_size, dashboard.delete_window());
                if let Some(search) = &options.search {
                    search.trim().clone_into(&mut page.search);
                }
                page.load(client, options.page).await;
                page.to_string()
            }
            Route::Analytics => AnalyticsPage::open(client).await.to_string(),
            Route::Settings => SettingsPage::open(&self.state.settings).to_string(),
            Route::Messages | Route::Apps => {
                format!("{}\nThis section is coming soon.\n", route.label())
            }
        }
    }

    /// Header, sidebar and body for a protected screen
    #[must_use]
    pub fn layout(&self, route: Route, body: &str) -> String {
        if !route.is_protected() {
            return body.to_string();
        }

        let mut out = String::new();
        let trail: Vec<String> = breadcrumbs(&self.location)
            .into_iter()
            .map(|crumb| crumb.label)
            .collect();
        let user = self
            .state
            .auth
            .user()
            .map(|u| format!("{} ({})", u.name, u.email))
            .unwrap_or_default();
        let _ = writeln!(out, "{}    {user}", trail.join(" > "));

        let nav: Vec<String> = nav_items(&self.location)
            .into_iter()
            .map(|item| {
                if item.active {
                    format!("[{}]", item.route.label())
                } else {
                    item.route.label().to_string()
                }
            })
            .collect();
        let _ = writeln!(out, "{}", nav.join(" | "));
        let _ = writeln!(out);
        out.push_str(body);
        out
    }
}
