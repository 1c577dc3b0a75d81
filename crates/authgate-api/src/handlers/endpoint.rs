//! Demo endpoints gated by role.

use authgate_entity::user::UserRole;

use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::middleware::role::require_role;

/// GET /api/endpoint/for-everyone
pub async fn for_everyone() -> &'static str {
    "Hello World!"
}

/// GET /api/endpoint/for-user
pub async fn for_user(auth: AuthUser) -> ApiResult<&'static str> {
    require_role(&auth, UserRole::User)?;
    Ok("Hello User!")
}

/// GET /api/endpoint/for-admin
pub async fn for_admin(auth: AuthUser) -> ApiResult<&'static str> {
    require_role(&auth, UserRole::Admin)?;
    Ok("Hello Admin!")
}

/// GET /api/endpoint/for-super-admin
pub async fn for_super_admin(auth: AuthUser) -> ApiResult<&'static str> {
    require_role(&auth, UserRole::SuperAdmin)?;
    Ok("Hello Super Admin!")
}
