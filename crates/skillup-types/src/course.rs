//! Courses and course administration actions

use crate::serde_helpers;
use crate::user::User;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A course as returned by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Backend identifier
    #[serde(deserialize_with = "serde_helpers::id")]
    pub id: String,

    /// Course title
    pub title: String,

    /// Long description
    #[serde(default)]
    pub description: String,

    /// Category name
    #[serde(default)]
    pub category: String,

    /// Thumbnail image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,

    /// Owning instructor id
    #[serde(
        default,
        deserialize_with = "serde_helpers::optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub instructor_id: Option<String>,

    /// Denormalized instructor record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructor: Option<User>,

    /// Visible to students
    #[serde(default)]
    pub is_active: bool,

    /// Promoted on the landing page
    #[serde(default)]
    pub is_featured: bool,

    /// Creation time
    #[serde(
        default,
        deserialize_with = "serde_helpers::optional_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,

    /// Last modification time
    #[serde(
        default,
        deserialize_with = "serde_helpers::optional_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Course {
    /// Instructor name, or a placeholder when the backend did not embed one
    #[must_use]
    pub fn instructor_name(&self) -> &str {
        self.instructor
            .as_ref()
            .map_or("Unknown Instructor", |instructor| instructor.name.as_str())
    }

    /// Apply the flag change implied by a confirmed [`CourseAction`]
    pub const fn apply(&mut self, action: CourseAction) {
        match action {
            CourseAction::Feature => self.is_featured = true,
            CourseAction::Unfeature => self.is_featured = false,
            CourseAction::Activate => self.is_active = true,
            CourseAction::Deactivate => self.is_active = false,
        }
    }
}

/// Payload for `POST /courses`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    /// Course title
    pub title: String,
    /// Long description
    pub description: String,
    /// Category name
    pub category: String,
    /// Thumbnail image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

/// Flag toggles exposed under `PUT /admin/courses/{id}/{action}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CourseAction {
    /// Set the featured flag
    Feature,
    /// Clear the featured flag
    Unfeature,
    /// Set the active flag
    Activate,
    /// Clear the active flag
    Deactivate,
}

impl CourseAction {
    /// Final path segment of the endpoint
    #[must_use]
    pub const fn path_segment(self) -> &'static str {
        match self {
            Self::Feature => "feature",
            Self::Unfeature => "unfeature",
            Self::Activate => "activate",
            Self::Deactivate => "deactivate",
        }
    }

    /// Action that sets the featured flag to `featured`
    #[must_use]
    pub const fn featured(featured: bool) -> Self {
        if featured { Self::Feature } else { Self::Unfeature }
    }

    /// Action that sets the active flag to `active`
    #[must_use]
    pub const fn active(active: bool) -> Self {
        if active { Self::Activate } else { Self::Deactivate }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Course {
        serde_json::from_str(
            r#"{
                "id": 3,
                "title": "React Fundamentals",
                "description": "Build modern web applications",
                "category": "Web Development",
                "instructorId": 2,
                "isActive": false,
                "isFeatured": false,
                "createdAt": "2024-01-05T09:15:00Z"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_course_from_backend_json() {
        let course = sample();
        assert_eq!(course.id, "3");
        assert_eq!(course.instructor_id.as_deref(), Some("2"));
        assert_eq!(course.instructor_name(), "Unknown Instructor");
        assert!(course.thumbnail_url.is_none());
    }

    #[test]
    fn test_apply_actions() {
        let mut course = sample();
        course.apply(CourseAction::featured(true));
        course.apply(CourseAction::active(true));
        assert!(course.is_featured);
        assert!(course.is_active);

        course.apply(CourseAction::Unfeature);
        assert!(!course.is_featured);
        assert!(course.is_active);
    }

    #[test]
    fn test_action_segments() {
        assert_eq!(CourseAction::Feature.path_segment(), "feature");
        assert_eq!(CourseAction::active(false).path_segment(), "deactivate");
    }
}
