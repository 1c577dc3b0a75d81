//! Health check handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::warn;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /api/health
///
/// On the postgres backend the pool is pinged; an unreachable database
/// turns the answer into `503 degraded`.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let mut response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage: state.config.database.backend,
        database_latency_ms: None,
    };

    let Some(database) = &state.database else {
        return (StatusCode::OK, Json(response));
    };

    match database.ping().await {
        Ok(latency) => {
            response.database_latency_ms = Some(u64::try_from(latency.as_millis()).unwrap_or(u64::MAX));
            (StatusCode::OK, Json(response))
        }
        Err(e) => {
            warn!(error = %e, "Health check: database unreachable");
            response.status = "degraded".to_string();
            (StatusCode::SERVICE_UNAVAILABLE, Json(response))
        }
    }
}
