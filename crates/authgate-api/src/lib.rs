//! # authgate-api
//!
//! HTTP API layer for AuthGate built on Axum.
//!
//! Exposes login, refresh, logout, registration, and role-gated demo
//! endpoints, plus the error mapping, extractors, and middleware they use.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, build_state, memory_state, run_server};
pub use error::{ApiError, ApiResult};
pub use state::AppState;
