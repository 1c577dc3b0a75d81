//! Token record entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One issued access/refresh pair and its validity flag.
///
/// Records are never deleted; `valid` only ever moves from `true` to
/// `false`. Several valid records may exist for the same username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct TokenRecord {
    /// Surrogate key.
    pub id: i64,
    /// Subject the pair was issued for.
    pub username: String,
    /// Signed access token.
    pub access_token: String,
    /// Signed refresh token.
    pub refresh_token: String,
    /// Cleared on logout or rotation.
    pub valid: bool,
    /// When the pair was stored.
    pub created_at: DateTime<Utc>,
}

impl TokenRecord {
    /// The pair carried by this record.
    pub fn pair(&self) -> TokenPair {
        TokenPair {
            access_token: self.access_token.clone(),
            refresh_token: self.refresh_token.clone(),
        }
    }
}

/// An access/refresh token pair as exchanged with clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    /// Short-lived access token.
    pub access_token: String,
    /// Long-lived, single-use refresh token.
    pub refresh_token: String,
}

/// Outcome of revoking a token by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Revocation {
    /// The record was valid and this call flipped it to invalid.
    Revoked,
    /// The record exists but had already been invalidated.
    AlreadyRevoked,
    /// No record carries this token.
    NotFound,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_wire_format_is_camel_case() {
        let pair = TokenPair {
            access_token: "a".into(),
            refresh_token: "r".into(),
        };
        let json = serde_json::to_value(&pair).unwrap();
        assert_eq!(json, serde_json::json!({"accessToken": "a", "refreshToken": "r"}));
    }
}
