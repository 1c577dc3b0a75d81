//! User registration handler.

use axum::Json;
use axum::extract::State;

use authgate_entity::user::UserRole;

use crate::dto::request::CreateUserRequest;
use crate::dto::response::UserResponse;
use crate::error::ApiResult;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    let role = match req.role.as_deref() {
        Some(name) => name.parse::<UserRole>()?,
        None => UserRole::User,
    };

    let user = state
        .registrar
        .register(&req.username, &req.password, role)
        .await?;

    Ok(Json(UserResponse::from(user)))
}
