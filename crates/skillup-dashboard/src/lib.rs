//! `SkillUp` admin console
//!
//! The console is a set of screen view-models driven by a router. The
//! [`AuthContext`] tracks who is signed in, the [`App`] router resolves every
//! path through the route guard, and each screen in [`pages`] loads its data
//! through the shared API client, falling back to demo data when the backend
//! cannot be reached. Screens render to plain text via [`components`].

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod app;
pub mod auth;
pub mod components;
pub mod pages;
pub mod settings_store;
pub mod state;

pub use app::{App, OpenOptions, Rendered, View};
pub use auth::AuthContext;
pub use settings_store::SettingsStore;
pub use state::{AppState, StartupError};
