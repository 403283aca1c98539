//! REST client for the `SkillUp` admin API
//!
//! [`ApiClient`] owns the HTTP connection pool and a shared [`SessionStore`].
//! Every call validates its parameters before anything is sent, attaches the
//! stored bearer token and maps HTTP failures onto [`ApiError`]. A 401 clears
//! the session and publishes [`SessionEvent::Expired`] to subscribers.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod client;
pub mod error;
pub mod events;
pub mod retry;
pub mod session;

pub use client::ApiClient;
pub use error::{ADMIN_REQUIRED, ApiError, ApiResult, DASHBOARD_ADMIN_REQUIRED, ErrorKind};
pub use events::SessionEvent;
pub use retry::RetryPolicy;
pub use session::{FileSessionStore, MemorySessionStore, SessionStore};
