//! Analytics screen

use crate::components::Table;
use skillup_client::{ApiClient, ApiResult};
use skillup_protocol::fallback;
use skillup_types::{CourseAnalytics, EnrollmentAnalytics, UserAnalytics};
use std::fmt;
use tracing::warn;

/// The three analytics reports, always populated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsPage {
    /// Account report
    pub users: UserAnalytics,
    /// Course report
    pub courses: CourseAnalytics,
    /// Enrollment report
    pub enrollments: EnrollmentAnalytics,
    /// Error text after a failed load
    pub error: Option<String>,
}

impl AnalyticsPage {
    /// Fetch all three reports concurrently
    ///
    /// If any one of them fails, all three are replaced by demo reports.
    pub async fn open(client: &ApiClient) -> Self {
        match Self::fetch(client).await {
            Ok((users, courses, enrollments)) => Self {
                users,
                courses,
                enrollments,
                error: None,
            },
            Err(e) => {
                warn!(error = %e, "analytics unavailable, showing demo data");
                Self {
                    error: Some(e.to_string()),
                    ..Self::demo()
                }
            }
        }
    }

    async fn fetch(client: &ApiClient) -> ApiResult<(UserAnalytics, CourseAnalytics, EnrollmentAnalytics)> {
        tokio::try_join!(
            client.user_analytics(),
            client.course_analytics(),
            client.enrollment_analytics(),
        )
    }

    /// Screen filled with demo reports
    #[must_use]
    pub fn demo() -> Self {
        Self {
            users: fallback::demo_user_analytics(),
            courses: fallback::demo_course_analytics(),
            enrollments: fallback::demo_enrollment_analytics(),
            error: None,
        }
    }
}

impl fmt::Display for AnalyticsPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Analytics")?;
        if let Some(error) = &self.error {
            writeln!(f, "! Using demo data. {error}")?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "Users: {}  Courses: {} ({} active, {} featured)  Enrollments: {}",
            self.users.total_users,
            self.courses.total_courses,
            self.courses.active_courses,
            self.courses.featured_courses,
            self.enrollments.total_enrollments
        )?;
        writeln!(f)?;

        let mut roles = Table::new(&["Role", "Share"]);
        for (role, share) in self.users.role_shares() {
            roles.row([role, format!("{share:.1}%")]);
        }
        write!(f, "{roles}")?;
        writeln!(f)?;

        let mut categories = Table::new(&["Category", "Courses"]);
        for c in &self.courses.courses_by_category {
            categories.row([c.category.clone(), c.count.to_string()]);
        }
        write!(f, "{categories}")?;
        writeln!(f)?;

        let mut top = Table::new(&["Course", "Enrollments"]);
        for c in &self.enrollments.top_courses {
            top.row([c.course_title.clone(), c.enrollments.to_string()]);
        }
        write!(f, "{top}")
    }
}
