//! Axum middleware stack.

pub mod cors;
pub mod logging;
pub mod role;
