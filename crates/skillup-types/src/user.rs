//! Platform users

use crate::error::TypeError;
use crate::serde_helpers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role held by a platform account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Full access to the admin console
    Admin,
    /// Creates and teaches courses
    Instructor,
    /// Enrolls in courses
    Student,
}

impl Role {
    /// All roles, in display order
    pub const ALL: [Self; 3] = [Self::Admin, Self::Instructor, Self::Student];

    /// Wire representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Instructor => "INSTRUCTOR",
            Self::Student => "STUDENT",
        }
    }

    /// Whether this role may use the admin console
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| TypeError::UnknownRole {
                value: s.to_string(),
            })
    }
}

/// A platform account as returned by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Backend identifier
    #[serde(deserialize_with = "serde_helpers::id")]
    pub id: String,

    /// Display name
    pub name: String,

    /// Login email
    pub email: String,

    /// Account role
    pub role: Role,

    /// Free-form biography
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,

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

impl User {
    /// Uppercase first letter of the name, used as an avatar placeholder
    #[must_use]
    pub fn initial(&self) -> char {
        self.name
            .chars()
            .next()
            .and_then(|c| c.to_uppercase().next())
            .unwrap_or('?')
    }

    /// Whether the name or email contains `needle`, ignoring case
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.name.to_lowercase().contains(&needle) || self.email.to_lowercase().contains(&needle)
    }
}

/// Payload for `POST /admin/users`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    /// Display name
    pub name: String,
    /// Login email
    pub email: String,
    /// Initial password
    pub password: String,
    /// Account role
    pub role: Role,
    /// Optional biography
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

/// Payload for `PUT /admin/users/{id}`; absent fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    /// New display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New login email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New password
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// New role
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// New biography
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}
