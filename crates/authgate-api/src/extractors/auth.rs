//! `AuthUser` extractor: pulls the bearer token, authorizes it, and loads the caller.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;

use authgate_auth::Claims;
use authgate_core::error::AppError;
use authgate_entity::user::UserRole;

use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated caller of a protected route.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Username from the token subject.
    pub username: String,
    /// Current role from the directory.
    pub role: UserRole,
    /// Verified token claims.
    pub claims: Claims,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(header) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::invalid_token("Missing or malformed bearer token"))?;

        // Signature, expiry, and the stored record's validity flag.
        let claims = state.sessions.authorize(header.token()).await?;

        let user = state
            .directory
            .find_by_username(&claims.sub)
            .await?
            .ok_or_else(|| AppError::invalid_token("Token subject no longer exists"))?;

        Ok(AuthUser {
            username: user.username,
            role: user.role,
            claims,
        })
    }
}
