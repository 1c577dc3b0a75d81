//! Auth handlers: login, refresh, logout, me.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use authgate_auth::LogoutOutcome;
use authgate_entity::token::TokenPair;

use crate::dto::request::{LoginRequest, PresentedTokens};
use crate::dto::response::MeResponse;
use crate::error::ApiResult;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<TokenPair>> {
    let pair = state.sessions.login(&req.username, &req.password).await?;
    Ok(Json(pair))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<PresentedTokens>,
) -> ApiResult<Json<TokenPair>> {
    let pair = state.sessions.refresh(&req.refresh_token).await?;
    Ok(Json(pair))
}

/// POST /api/auth/logout
///
/// Answers with a plain-text message; 400 when already logged out.
pub async fn logout(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<PresentedTokens>,
) -> ApiResult<(StatusCode, String)> {
    let outcome = state.sessions.logout(&req.access_token).await?;
    let status = match outcome {
        LogoutOutcome::LoggedOut => StatusCode::OK,
        LogoutOutcome::AlreadyLoggedOut => StatusCode::BAD_REQUEST,
    };
    Ok((status, outcome.message().to_string()))
}

/// GET /api/auth/me
pub async fn me(auth: AuthUser) -> Json<MeResponse> {
    Json(MeResponse {
        username: auth.username,
        role: auth.role,
    })
}
