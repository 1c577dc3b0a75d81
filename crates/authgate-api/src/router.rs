//! Route definitions for the AuthGate HTTP API.
//!
//! All routes are mounted under `/api`.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the router with every route and the request logger.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(endpoint_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Auth endpoints: login, refresh, logout, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/me", get(handlers::auth::me))
}

/// Registration
fn user_routes() -> Router<AppState> {
    Router::new().route("/users", post(handlers::user::create_user))
}

/// Role-gated demo endpoints
fn endpoint_routes() -> Router<AppState> {
    Router::new()
        .route("/endpoint/for-everyone", get(handlers::endpoint::for_everyone))
        .route("/endpoint/for-user", get(handlers::endpoint::for_user))
        .route("/endpoint/for-admin", get(handlers::endpoint::for_admin))
        .route(
            "/endpoint/for-super-admin",
            get(handlers::endpoint::for_super_admin),
        )
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
