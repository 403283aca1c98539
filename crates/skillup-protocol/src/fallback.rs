//! Fixed datasets shown when the backend cannot be reached
//!
//! Every screen draws its demo data from here so offline rendering stays
//! consistent between screens.

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use skillup_types::{
    CategoryCount, Course, CourseAnalytics, CourseEnrollments, DashboardStats, DateCount,
    EnrollmentAnalytics, MonthCount, Role, RoleCount, User, UserAnalytics,
};

/// Categories offered when the category endpoint fails
pub const DEFAULT_CATEGORIES: [&str; 10] = [
    "Programming",
    "Web Development",
    "Mobile Development",
    "Data Science",
    "Machine Learning",
    "DevOps",
    "Design",
    "Business",
    "Marketing",
    "Other",
];

const MONTHS: [&str; 6] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun"];

/// One bar group of the dashboard overview chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlyActivity {
    /// Month label
    pub name: &'static str,
    /// New users
    pub users: u64,
    /// New courses
    pub courses: u64,
}

/// Static series drawn on the dashboard
#[must_use]
pub fn monthly_activity() -> Vec<MonthlyActivity> {
    let users = [400, 300, 200, 278, 189, 239];
    let courses = [240, 139, 980, 390, 480, 380];
    MONTHS
        .into_iter()
        .zip(users.into_iter().zip(courses))
        .map(|(name, (users, courses))| MonthlyActivity {
            name,
            users,
            courses,
        })
        .collect()
}

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0).single()
}

fn user(id: &str, name: &str, email: &str, role: Role, bio: Option<&str>) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        role,
        bio: bio.map(str::to_string),
        created_at: None,
        updated_at: None,
    }
}

/// The five accounts shown by the users screen when offline
#[must_use]
pub fn demo_users() -> Vec<User> {
    let rows = [
        (
            "1",
            "John Doe",
            "john.doe@example.com",
            Role::Student,
            "Passionate learner interested in technology",
            at(2024, 1, 15, 10, 0),
        ),
        (
            "2",
            "Jane Smith",
            "jane.smith@example.com",
            Role::Instructor,
            "Experienced software developer and teacher",
            at(2024, 1, 10, 14, 30),
        ),
        (
            "3",
            "Admin User",
            "admin@skillup.com",
            Role::Admin,
            "Platform administrator",
            at(2024, 1, 1, 9, 0),
        ),
        (
            "4",
            "Sarah Johnson",
            "sarah.johnson@example.com",
            Role::Student,
            "Marketing professional learning new skills",
            at(2024, 1, 20, 11, 0),
        ),
        (
            "5",
            "Mike Wilson",
            "mike.wilson@example.com",
            Role::Instructor,
            "Data science expert and course creator",
            at(2024, 1, 5, 16, 0),
        ),
    ];
    rows.into_iter()
        .map(|(id, name, email, role, bio, created)| User {
            created_at: created,
            updated_at: created,
            ..user(id, name, email, role, Some(bio))
        })
        .collect()
}

/// Offline users filtered the way the server would filter them
///
/// `role` narrows by role; `search` matches name or email case-insensitively.
#[must_use]
pub fn filtered_demo_users(role: Option<Role>, search: Option<&str>) -> Vec<User> {
    let needle = search.map(str::trim).filter(|s| !s.is_empty());
    demo_users()
        .into_iter()
        .filter(|u| role.is_none_or(|r| u.role == r))
        .filter(|u| needle.is_none_or(|n| u.matches(n)))
        .collect()
}

/// The three courses shown by the courses screen when offline
#[must_use]
pub fn demo_courses() -> Vec<Course> {
    let instructor = user("2", "Jane Smith", "jane@example.com", Role::Instructor, None);
    let rows = [
        (
            "1",
            "Complete Java Programming Course",
            "Learn Java from basics to advanced concepts with hands-on projects",
            "Programming",
            true,
            true,
            at(2024, 1, 15, 10, 0),
        ),
        (
            "2",
            "Advanced Spring Boot Development",
            "Master Spring Boot framework with microservices architecture",
            "Programming",
            true,
            false,
            at(2024, 1, 10, 14, 30),
        ),
        (
            "3",
            "React Fundamentals",
            "Build modern web applications with React and TypeScript",
            "Web Development",
            false,
            false,
            at(2024, 1, 5, 9, 15),
        ),
    ];
    rows.into_iter()
        .map(|(id, title, description, category, active, featured, created)| Course {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            thumbnail_url: None,
            instructor_id: Some(instructor.id.clone()),
            instructor: Some(instructor.clone()),
            is_active: active,
            is_featured: featured,
            created_at: created,
            updated_at: created,
        })
        .collect()
}

/// Overview numbers shown when the stats endpoint fails
#[must_use]
pub fn demo_dashboard_stats(now: DateTime<Utc>) -> DashboardStats {
    let stamp = |u: User| User {
        created_at: Some(now),
        updated_at: Some(now),
        ..u
    };
    let instructor = stamp(user(
        "2",
        "Sarah Johnson",
        "sarah@example.com",
        Role::Instructor,
        None,
    ));

    DashboardStats {
        total_users: 1250,
        total_instructors: 45,
        total_students: 1205,
        total_courses: 89,
        total_enrollments: 3420,
        recent_users: vec![
            stamp(user("1", "John Smith", "john@example.com", Role::Student, None)),
            instructor.clone(),
        ],
        recent_courses: vec![Course {
            id: "1".to_string(),
            title: "Complete Java Programming Course".to_string(),
            description: "Learn Java from basics to advanced concepts".to_string(),
            category: "Programming".to_string(),
            thumbnail_url: None,
            instructor_id: Some(instructor.id.clone()),
            instructor: Some(instructor),
            is_active: true,
            is_featured: false,
            created_at: Some(now),
            updated_at: Some(now),
        }],
    }
}

fn months(counts: [u64; 6]) -> Vec<MonthCount> {
    MONTHS
        .iter()
        .zip(counts)
        .map(|(month, count)| MonthCount {
            month: (*month).to_string(),
            count,
        })
        .collect()
}

fn days(counts: &[u64]) -> Vec<DateCount> {
    counts
        .iter()
        .zip(1..)
        .map(|(count, day)| DateCount {
            date: format!("2024-01-{day:02}"),
            count: *count,
        })
        .collect()
}

/// User analytics shown when any analytics request fails
#[must_use]
pub fn demo_user_analytics() -> UserAnalytics {
    UserAnalytics {
        total_users: 1250,
        users_by_role: [("STUDENT", 1205), ("INSTRUCTOR", 45), ("ADMIN", 5)]
            .into_iter()
            .map(|(role, count)| RoleCount {
                role: role.to_string(),
                count,
            })
            .collect(),
        recent_registrations: days(&[20, 15, 25, 30, 18]),
        user_growth_data: months([400, 500, 650, 800, 1000, 1250]),
    }
}

/// Course analytics shown when any analytics request fails
#[must_use]
pub fn demo_course_analytics() -> CourseAnalytics {
    CourseAnalytics {
        total_courses: 89,
        courses_by_category: [
            ("Programming", 35),
            ("Data Science", 20),
            ("Web Development", 15),
            ("Mobile Development", 12),
            ("DevOps", 7),
        ]
        .into_iter()
        .map(|(category, count)| CategoryCount {
            category: category.to_string(),
            count,
        })
        .collect(),
        featured_courses: 12,
        active_courses: 85,
        course_creation_data: months([10, 15, 20, 18, 14, 12]),
    }
}

/// Enrollment analytics shown when any analytics request fails
#[must_use]
pub fn demo_enrollment_analytics() -> EnrollmentAnalytics {
    EnrollmentAnalytics {
        total_enrollments: 3420,
        enrollments_by_month: months([400, 520, 680, 750, 580, 490]),
        top_courses: [
            ("Complete JavaScript Course", 245),
            ("React Fundamentals", 198),
            ("Python for Beginners", 178),
            ("Node.js Backend Development", 156),
            ("Data Science with Python", 134),
        ]
        .into_iter()
        .map(|(title, enrollments)| CourseEnrollments {
            course_title: title.to_string(),
            enrollments,
        })
        .collect(),
        enrollment_growth: days(&[20, 25, 18, 32, 28, 35, 22]),
    }
}

/// Default category list as owned strings
#[must_use]
pub fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(ToString::to_string).collect()
}
