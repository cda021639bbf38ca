//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::tasks::Priority;

/// Login request body.
///
/// Fields default to empty strings so that an absent field surfaces as
/// `MISSING_CREDENTIALS` from the service rather than a deserialization
/// rejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Login email.
    #[serde(default)]
    pub email: String,
    /// Plaintext password.
    #[serde(default)]
    pub password: String,
}

/// Token refresh request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    /// Refresh token string.
    #[serde(default)]
    pub refresh_token: String,
}

/// Logout request body. The token is optional; logout never fails.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutRequest {
    /// Refresh token to revoke, if the client still has one.
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Update profile request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    /// New display name.
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    /// New avatar URL.
    #[validate(length(max = 500))]
    pub avatar: Option<String>,
}

/// Create task request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// Task title.
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    /// Priority (defaults to medium).
    #[serde(default = "default_priority")]
    pub priority: Priority,
}

fn default_priority() -> Priority {
    Priority::Medium
}
