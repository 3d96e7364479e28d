//! Client-related types shared between server and client
//!
//! Request/response types used in API communication.
//! These types are shared between cafe-server and cafe-client.

use serde::{Deserialize, Serialize};

use crate::models::{Role, UserProfile};

// Re-export ApiResponse from the error module
pub use crate::error::ApiResponse;

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Signup request
///
/// Every field is optional on the wire so that absent ones are reported as
/// missing fields rather than as a malformed body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignupRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
}

impl SignupRequest {
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            email: Some(email.into()),
            password: Some(password.into()),
            name: Some(name.into()),
            role: Some(role.as_str().to_string()),
        }
    }
}

/// Login request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            password: Some(password.into()),
        }
    }
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: UserInfo,
}

/// User information
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
}

impl UserInfo {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl From<UserProfile> for UserInfo {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id,
            email: profile.email,
            name: profile.name,
            role: profile.role,
        }
    }
}

// =============================================================================
// Misc API DTOs
// =============================================================================

/// Result of sample data initialization
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SampleDataResult {
    pub item_count: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_request_tolerates_missing_fields() {
        let req: SignupRequest = serde_json::from_str(r#"{"email":"a@b.c"}"#).unwrap();
        assert_eq!(req.email.as_deref(), Some("a@b.c"));
        assert!(req.password.is_none());
        assert!(req.role.is_none());
    }

    #[test]
    fn test_signup_request_new() {
        let req = SignupRequest::new("a@b.c", "secret", "Alex", Role::Admin);
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["role"], "admin");
        assert_eq!(value["name"], "Alex");
    }

    #[test]
    fn test_login_response_wire_format() {
        let json = r#"{
            "access_token": "tok",
            "user": {"id": "u-1", "email": "a@b.c", "name": "Alex", "role": "employee"}
        }"#;
        let resp: LoginResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.access_token, "tok");
        assert_eq!(resp.user.role, Role::Employee);
        assert!(!resp.user.is_admin());
    }
}
