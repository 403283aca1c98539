//! Login payloads and session introspection

use crate::serde_helpers;
use crate::user::{Role, User};
use serde::{Deserialize, Serialize};

/// Credentials posted to `/auth/login`
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Account email
    pub email: String,
    /// Account password
    pub password: String,
}

impl LoginRequest {
    /// Build a login request
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// `data` member of a successful login response
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    /// Bearer token
    pub token: String,
    /// Account id
    #[serde(deserialize_with = "serde_helpers::id")]
    pub id: String,
    /// Account email
    pub email: String,
    /// Display name
    pub name: String,
    /// Account role
    pub role: Role,
    /// Token type, usually `Bearer`
    #[serde(default, rename = "type")]
    pub token_type: Option<String>,
    /// Token expiry as sent by the backend
    #[serde(default)]
    pub expires_at: Option<String>,
}

/// Token plus the account it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginResponse {
    /// Bearer token
    pub token: String,
    /// Authenticated account
    pub user: User,
}

impl From<LoginData> for LoginResponse {
    fn from(data: LoginData) -> Self {
        Self {
            token: data.token,
            user: User {
                id: data.id,
                name: data.name,
                email: data.email,
                role: data.role,
                bio: None,
                created_at: None,
                updated_at: None,
            },
        }
    }
}

/// Snapshot of the stored session, safe to print
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionStatus {
    /// Whether a token is stored
    pub has_token: bool,
    /// First characters of the token followed by `...`
    pub masked: Option<String>,
}

impl SessionStatus {
    /// Number of token characters revealed by [`SessionStatus::from_token`]
    pub const VISIBLE_CHARS: usize = 20;

    /// Describe an optional stored token
    #[must_use]
    pub fn from_token(token: Option<&str>) -> Self {
        Self {
            has_token: token.is_some(),
            masked: token.map(|t| {
                let visible: String = t.chars().take(Self::VISIBLE_CHARS).collect();
                format!("{visible}...")
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_login_data_into_response() {
        let data: LoginData = serde_json::from_str(
            r#"{
                "token": "abc",
                "id": 1,
                "email": "admin@skillup.com",
                "name": "Admin",
                "role": "ADMIN",
                "type": "Bearer",
                "expiresAt": "2030-01-01T00:00:00"
            }"#,
        )
        .unwrap();
        let response = LoginResponse::from(data);

        assert_eq!(response.token, "abc");
        assert_eq!(response.user.id, "1");
        assert_eq!(response.user.role, Role::Admin);
    }

    #[test]
    fn test_session_status_masks_token() {
        let token = "eyJhbGciOiJIUzI1NiJ9.payload.signature";
        let status = SessionStatus::from_token(Some(token));
        assert!(status.has_token);
        assert_eq!(status.masked.as_deref(), Some("eyJhbGciOiJIUzI1NiJ9..."));

        let empty = SessionStatus::from_token(None);
        assert!(!empty.has_token);
        assert!(empty.masked.is_none());
    }

    #[test]
    fn test_login_request_debug_hides_password() {
        let request = LoginRequest::new("a@b.co", "hunter22");
        assert!(!format!("{request:?}").contains("hunter22"));
    }

    proptest::proptest! {
        #[test]
        fn prop_masked_token_never_leaks_the_tail(token in "[A-Za-z0-9._-]{0,200}") {
            let status = SessionStatus::from_token(Some(&token));
            let masked = status.masked.unwrap_or_default();
            proptest::prop_assert!(masked.ends_with("..."));
            proptest::prop_assert!(masked.chars().count() <= SessionStatus::VISIBLE_CHARS + 3);
            proptest::prop_assert!(token.starts_with(masked.trim_end_matches("...")));
        }
    }
}
