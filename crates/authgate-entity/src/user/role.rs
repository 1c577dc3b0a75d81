//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Authorities a user can hold.
///
/// Roles are flat: holding one never implies another, so an admin is not
/// a user for the purposes of an exact-match role check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role")]
pub enum UserRole {
    /// Regular account.
    #[serde(rename = "ROLE_USER")]
    #[sqlx(rename = "ROLE_USER")]
    User,
    /// Administrator.
    #[serde(rename = "ROLE_ADMIN")]
    #[sqlx(rename = "ROLE_ADMIN")]
    Admin,
    /// Super administrator.
    #[serde(rename = "ROLE_SUPER_ADMIN")]
    #[sqlx(rename = "ROLE_SUPER_ADMIN")]
    SuperAdmin,
}

impl UserRole {
    /// Return the authority string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "ROLE_USER",
            Self::Admin => "ROLE_ADMIN",
            Self::SuperAdmin => "ROLE_SUPER_ADMIN",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = authgate_core::AppError;

    /// Accepts the authority string with or without the `ROLE_` prefix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        match upper.strip_prefix("ROLE_").unwrap_or(&upper) {
            "USER" => Ok(Self::User),
            "ADMIN" => Ok(Self::Admin),
            "SUPER_ADMIN" => Ok(Self::SuperAdmin),
            _ => Err(authgate_core::AppError::validation(format!(
                "Invalid role: '{s}'. Expected one of: ROLE_USER, ROLE_ADMIN, ROLE_SUPER_ADMIN"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("ROLE_ADMIN".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!("user".parse::<UserRole>().unwrap(), UserRole::User);
        assert_eq!(
            "super_admin".parse::<UserRole>().unwrap(),
            UserRole::SuperAdmin
        );
        assert!("root".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_serde_uses_authority_strings() {
        let json = serde_json::to_string(&UserRole::SuperAdmin).unwrap();
        assert_eq!(json, "\"ROLE_SUPER_ADMIN\"");
        let back: UserRole = serde_json::from_str("\"ROLE_USER\"").unwrap();
        assert_eq!(back, UserRole::User);
    }
}
