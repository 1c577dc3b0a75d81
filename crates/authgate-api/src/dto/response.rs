//! Response DTOs.

use serde::{Deserialize, Serialize};

use authgate_core::config::StorageBackend;
use authgate_entity::user::{User, UserRole};

/// Public view of a registered user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: i64,
    /// Username.
    pub username: String,
    /// Whether the account may log in.
    pub enabled: bool,
    /// Granted role.
    pub role: UserRole,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            enabled: !user.locked,
            role: user.role,
        }
    }
}

/// The authenticated caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    /// Username.
    pub username: String,
    /// Granted role.
    pub role: UserRole,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the database does not answer.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Configured storage backend.
    pub storage: StorageBackend,
    /// Database round-trip time; absent on the memory backend.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_latency_ms: Option<u64>,
}
