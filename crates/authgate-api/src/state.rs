//! Application state shared across all handlers and extractors.

use std::sync::Arc;

use authgate_auth::{AuthSessionService, UserDirectory, UserRegistrar};
use authgate_core::config::AppConfig;
use authgate_database::DatabasePool;

/// Dependencies handed to every handler via `State<AppState>`.
///
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Login, refresh, logout, and bearer authorization.
    pub sessions: Arc<AuthSessionService>,
    /// Registered accounts.
    pub directory: Arc<dyn UserDirectory>,
    /// Account registration.
    pub registrar: Arc<UserRegistrar>,
    /// Connection pool, present only on the postgres backend.
    pub database: Option<DatabasePool>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("sessions", &self.sessions)
            .field("database", &self.database.is_some())
            .finish_non_exhaustive()
    }
}
