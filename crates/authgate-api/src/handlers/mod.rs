//! Route handlers organized by domain.

pub mod auth;
pub mod endpoint;
pub mod health;
pub mod user;
