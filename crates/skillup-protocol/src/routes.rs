//! Route table, breadcrumbs and sidebar navigation

use serde::Serialize;
use std::fmt;

/// Screens reachable in the console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Route {
    /// Sign-in form
    Login,
    /// Overview
    Dashboard,
    /// User administration
    Users,
    /// Course administration
    Courses,
    /// Charts
    Analytics,
    /// Placeholder
    Messages,
    /// Placeholder
    Apps,
    /// Platform settings
    Settings,
}

impl Route {
    /// Sidebar order
    pub const NAV: [Self; 7] = [
        Self::Dashboard,
        Self::Users,
        Self::Courses,
        Self::Analytics,
        Self::Messages,
        Self::Apps,
        Self::Settings,
    ];

    /// Canonical path
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Dashboard => "/dashboard",
            Self::Users => "/dashboard/users",
            Self::Courses => "/dashboard/courses",
            Self::Analytics => "/dashboard/analytics",
            Self::Messages => "/dashboard/messages",
            Self::Apps => "/dashboard/apps",
            Self::Settings => "/dashboard/settings",
        }
    }

    /// Label shown in the sidebar and page header
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Dashboard => "Dashboard",
            Self::Users => "Users",
            Self::Courses => "Courses",
            Self::Analytics => "Analytics",
            Self::Messages => "Messages",
            Self::Apps => "Apps",
            Self::Settings => "Settings",
        }
    }

    /// Whether the route requires an authenticated admin
    #[must_use]
    pub const fn is_protected(self) -> bool {
        !matches!(self, Self::Login)
    }

    /// Resolve a path, ignoring query string and trailing slash
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let path = normalize(path);
        [Self::Login]
            .into_iter()
            .chain(Self::NAV)
            .find(|route| route.path() == path)
    }

    /// Whether this sidebar item is highlighted for `current`
    ///
    /// The dashboard root only matches exactly; every other item matches its
    /// whole subtree.
    #[must_use]
    pub fn is_active(self, current: &str) -> bool {
        let current = normalize(current);
        match self {
            Self::Dashboard => current == self.path(),
            _ => current.starts_with(self.path()),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    if path.len() > 1 {
        path.trim_end_matches('/')
    } else {
        path
    }
}

/// One step of the header trail
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    /// Text shown
    pub label: String,
    /// Link target
    pub path: String,
}

/// Header trail for `path`
///
/// Always starts at the dashboard. A path with more than one segment adds its
/// last segment, capitalized, linking to the full path.
#[must_use]
pub fn breadcrumbs(path: &str) -> Vec<Breadcrumb> {
    let path = normalize(path);
    let mut trail = vec![Breadcrumb {
        label: Route::Dashboard.label().to_string(),
        path: Route::Dashboard.path().to_string(),
    }];

    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if segments.len() > 1
        && let Some(last) = segments.last()
    {
        trail.push(Breadcrumb {
            label: capitalize(last),
            path: path.to_string(),
        });
    }
    trail
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Sidebar entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    /// Target route
    pub route: Route,
    /// Whether the entry is highlighted
    pub active: bool,
}

/// Sidebar entries for the current path, in display order
#[must_use]
pub fn nav_items(current: &str) -> Vec<NavItem> {
    Route::NAV
        .into_iter()
        .map(|route| NavItem {
            route,
            active: route.is_active(current),
        })
        .collect()
}
