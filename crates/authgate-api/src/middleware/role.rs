//! Role guards for protected routes.

use authgate_core::error::AppError;
use authgate_entity::user::UserRole;

use crate::extractors::AuthUser;

/// Requires the caller to hold exactly `role`.
///
/// Roles are flat authorities, not a hierarchy: an admin does not pass a
/// user-only guard.
pub fn require_role(auth: &AuthUser, role: UserRole) -> Result<(), AppError> {
    if auth.role != role {
        return Err(AppError::authorization(format!(
            "{role} authority required"
        )));
    }
    Ok(())
}
