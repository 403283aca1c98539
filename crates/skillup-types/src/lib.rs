//! Pure data types for the `SkillUp` admin console
//!
//! Everything in this crate mirrors the shapes exchanged with the `SkillUp`
//! REST backend. There is no I/O here: the client crate moves these types
//! over the wire and the protocol crate validates them.

#![forbid(unsafe_code)]

pub mod analytics;
pub mod auth;
pub mod course;
pub mod envelope;
pub mod error;
pub mod page;
pub mod serde_helpers;
pub mod settings;
pub mod user;

pub use analytics::{
    CategoryCount, CourseAnalytics, CourseEnrollments, DashboardStats, DateCount,
    EnrollmentAnalytics, MonthCount, RoleCount, UserAnalytics,
};
pub use auth::{LoginData, LoginRequest, LoginResponse, SessionStatus};
pub use course::{Course, CourseAction, CreateCourseRequest};
pub use envelope::{ApiEnvelope, ErrorBody};
pub use error::TypeError;
pub use page::{Page, PageRequest, SortDirection};
pub use settings::{
    BackupFrequency, GeneralSettings, LogLevel, NotificationSettings, PlatformSettings,
    SystemSettings, UserManagementSettings,
};
pub use user::{CreateUserRequest, Role, UpdateUserRequest, User};
