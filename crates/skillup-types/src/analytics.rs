//! Aggregates served by the analytics endpoints

use crate::course::Course;
use crate::user::User;
use serde::{Deserialize, Serialize};

/// Overview shown on the dashboard landing page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// All accounts
    pub total_users: u64,
    /// Accounts with the instructor role
    pub total_instructors: u64,
    /// Accounts with the student role
    pub total_students: u64,
    /// All courses
    pub total_courses: u64,
    /// All enrollments
    pub total_enrollments: u64,
    /// Most recently registered accounts
    #[serde(default)]
    pub recent_users: Vec<User>,
    /// Most recently created courses
    #[serde(default)]
    pub recent_courses: Vec<Course>,
}

/// Count of accounts holding a role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleCount {
    /// Role name as reported by the backend
    pub role: String,
    /// Number of accounts
    pub count: u64,
}

/// Count attached to a calendar date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateCount {
    /// ISO date
    pub date: String,
    /// Number of events
    pub count: u64,
}

/// Count attached to a month label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthCount {
    /// Month label (`Jan`, `Feb`, ...)
    pub month: String,
    /// Number of events
    pub count: u64,
}

/// Count of courses in a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    /// Category name
    pub category: String,
    /// Number of courses
    pub count: u64,
}

/// Enrollment total for one course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseEnrollments {
    /// Course title
    pub course_title: String,
    /// Number of enrollments
    pub enrollments: u64,
}

/// `GET /admin/analytics/users`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAnalytics {
    /// All accounts
    pub total_users: u64,
    /// Breakdown per role
    #[serde(default)]
    pub users_by_role: Vec<RoleCount>,
    /// Daily registrations
    #[serde(default)]
    pub recent_registrations: Vec<DateCount>,
    /// Cumulative accounts per month
    #[serde(default)]
    pub user_growth_data: Vec<MonthCount>,
}

/// `GET /admin/analytics/courses`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseAnalytics {
    /// All courses
    pub total_courses: u64,
    /// Breakdown per category
    #[serde(default)]
    pub courses_by_category: Vec<CategoryCount>,
    /// Courses with the featured flag
    pub featured_courses: u64,
    /// Courses with the active flag
    pub active_courses: u64,
    /// Courses created per month
    #[serde(default)]
    pub course_creation_data: Vec<MonthCount>,
}

/// `GET /admin/analytics/enrollments`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentAnalytics {
    /// All enrollments
    pub total_enrollments: u64,
    /// Enrollments per month
    #[serde(default)]
    pub enrollments_by_month: Vec<MonthCount>,
    /// Most enrolled courses
    #[serde(default)]
    pub top_courses: Vec<CourseEnrollments>,
    /// Daily enrollments
    #[serde(default)]
    pub enrollment_growth: Vec<DateCount>,
}

impl UserAnalytics {
    /// Share of accounts per role, as percentages rounded to one decimal
    #[must_use]
    pub fn role_shares(&self) -> Vec<(String, f64)> {
        let total: u64 = self.users_by_role.iter().map(|r| r.count).sum();
        self.users_by_role
            .iter()
            .map(|r| {
                #[allow(clippy::cast_precision_loss)]
                let share = if total == 0 {
                    0.0
                } else {
                    (r.count as f64 * 1000.0 / total as f64).round() / 10.0
                };
                (r.role.clone(), share)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_dashboard_stats_tolerates_missing_lists() {
        let stats: DashboardStats = serde_json::from_str(
            r#"{"totalUsers": 3, "totalInstructors": 1, "totalStudents": 2,
                "totalCourses": 4, "totalEnrollments": 5}"#,
        )
        .unwrap();
        assert_eq!(stats.total_users, 3);
        assert!(stats.recent_users.is_empty());
        assert!(stats.recent_courses.is_empty());
    }

    #[test]
    fn test_role_shares() {
        let analytics = UserAnalytics {
            total_users: 4,
            users_by_role: vec![
                RoleCount { role: "STUDENT".to_string(), count: 3 },
                RoleCount { role: "ADMIN".to_string(), count: 1 },
            ],
            recent_registrations: vec![],
            user_growth_data: vec![],
        };
        let shares = analytics.role_shares();
        assert_eq!(shares[0], ("STUDENT".to_string(), 75.0));
        assert_eq!(shares[1], ("ADMIN".to_string(), 25.0));
    }
}
