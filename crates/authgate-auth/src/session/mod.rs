//! Login, refresh, logout, and bearer authorization.

pub mod manager;

pub use manager::{AuthSessionService, LogoutOutcome};
