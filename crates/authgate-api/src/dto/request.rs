//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// A previously issued pair, as presented to refresh and logout.
///
/// Refresh reads only `refreshToken`; logout reads only `accessToken`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PresentedTokens {
    /// Access token.
    #[serde(default)]
    pub access_token: String,
    /// Refresh token.
    #[serde(default)]
    pub refresh_token: String,
}

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// Desired username.
    #[validate(length(min = 1, max = 100, message = "Username must be 1-100 characters"))]
    pub username: String,
    /// Plaintext password; the length policy is enforced by the registrar.
    pub password: String,
    /// Role name such as `ROLE_ADMIN` or `admin`. Defaults to `ROLE_USER`.
    #[serde(default)]
    pub role: Option<String>,
}
