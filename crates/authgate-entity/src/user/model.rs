//! User entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::principal::Principal;
use super::role::UserRole;

/// A registered account, owned by the user directory.
///
/// `locked` and `failed_attempts` are the lockout bookkeeping mutated by
/// the login attempt tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Surrogate key.
    pub id: i64,
    /// Unique login name.
    pub username: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Granted role.
    pub role: UserRole,
    /// Whether the account is locked out.
    pub locked: bool,
    /// Number of recorded failed logins.
    pub failed_attempts: i32,
}

impl Principal for User {
    fn username(&self) -> &str {
        &self.username
    }

    fn authorities(&self) -> Vec<UserRole> {
        vec![self.role]
    }

    fn is_locked(&self) -> bool {
        self.locked
    }
}

/// Data required to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    /// Desired username.
    pub username: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Assigned role.
    pub role: UserRole,
}
