//! Business rules for the `SkillUp` admin console
//!
//! This crate holds the logic that must behave identically no matter how the
//! console is driven: request parameter validation, form rules, the route
//! table and its guard, local pagination, delete confirmation and the demo
//! datasets shown when the backend cannot be reached. Nothing here performs
//! I/O or awaits.

#![forbid(unsafe_code)]

pub mod confirm;
pub mod error;
pub mod fallback;
pub mod forms;
pub mod guard;
pub mod paging;
pub mod routes;
pub mod validation;

pub use confirm::{Confirmation, DeleteConfirmation};
pub use error::{Result, ValidationError};
pub use forms::{CourseForm, FormErrors, UserForm};
pub use guard::{AuthStatus, GuardDecision, guard};
pub use paging::paginate;
pub use routes::{Breadcrumb, NavItem, Route, breadcrumbs, nav_items};
