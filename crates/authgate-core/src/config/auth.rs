//! Token lifecycle and lockout configuration.

use serde::{Deserialize, Serialize};

/// Where the HMAC signing key comes from.
///
/// `Ephemeral` regenerates the key on every start, so every token issued by
/// a previous process becomes unverifiable and users must log in again
/// after a restart. `Configured` reads a base64 secret from
/// [`AuthConfig::signing_secret`] and keeps tokens valid across restarts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SigningKeySource {
    /// Fresh random 256-bit key per process.
    #[default]
    Ephemeral,
    /// Base64 secret supplied through configuration.
    Configured,
}

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Source of the HMAC-SHA256 signing key.
    #[serde(default)]
    pub signing_key: SigningKeySource,
    /// Base64-encoded secret, required when `signing_key = "configured"`.
    #[serde(default)]
    pub signing_secret: Option<String>,
    /// Access token TTL in hours.
    #[serde(default = "default_access_ttl")]
    pub access_ttl_hours: u64,
    /// Refresh token TTL as a multiple of the access TTL.
    #[serde(default = "default_refresh_multiplier")]
    pub refresh_ttl_multiplier: u32,
    /// Clock-skew leeway applied when checking expiry, in seconds.
    /// Zero means a token is rejected as soon as its expiry passes.
    #[serde(default = "default_leeway")]
    pub leeway_seconds: u64,
    /// Recorded failures after which the next failure locks the account.
    #[serde(default = "default_max_failed")]
    pub max_failed_attempts: i32,
    /// Return an existing valid token pair on login instead of re-verifying.
    #[serde(default = "default_true")]
    pub reuse_existing_session: bool,
    /// Clear the failure counter after a successful credential check.
    #[serde(default)]
    pub reset_failed_attempts_on_success: bool,
    /// Minimum password length for newly registered users.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            signing_key: SigningKeySource::default(),
            signing_secret: None,
            access_ttl_hours: default_access_ttl(),
            refresh_ttl_multiplier: default_refresh_multiplier(),
            leeway_seconds: default_leeway(),
            max_failed_attempts: default_max_failed(),
            reuse_existing_session: true,
            reset_failed_attempts_on_success: false,
            password_min_length: default_password_min(),
        }
    }
}

fn default_access_ttl() -> u64 {
    24
}

fn default_refresh_multiplier() -> u32 {
    30
}

fn default_leeway() -> u64 {
    0
}

fn default_max_failed() -> i32 {
    5
}

fn default_true() -> bool {
    true
}

fn default_password_min() -> usize {
    8
}
