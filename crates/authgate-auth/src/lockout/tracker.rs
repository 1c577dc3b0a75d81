//! Per-user failed login tracker.

use std::sync::Arc;

use tracing::{debug, warn};

use authgate_core::config::AuthConfig;
use authgate_core::result::AppResult;
use authgate_entity::user::User;

use crate::directory::UserDirectory;

/// Counts failed logins per user and locks accounts past a threshold.
///
/// State lives on the [`User`] record, so every mutation goes through
/// [`UserDirectory::update_with`] and is atomic per user.
#[derive(Clone)]
pub struct LoginAttemptTracker {
    directory: Arc<dyn UserDirectory>,
    max_failed_attempts: i32,
}

impl std::fmt::Debug for LoginAttemptTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginAttemptTracker")
            .field("max_failed_attempts", &self.max_failed_attempts)
            .finish()
    }
}

impl LoginAttemptTracker {
    /// Creates a tracker over `directory` using the configured threshold.
    pub fn new(directory: Arc<dyn UserDirectory>, config: &AuthConfig) -> Self {
        Self {
            directory,
            max_failed_attempts: config.max_failed_attempts,
        }
    }

    /// Whether the named account is locked. Unknown users are not blocked.
    pub async fn is_blocked(&self, username: &str) -> AppResult<bool> {
        Ok(self
            .directory
            .find_by_username(username)
            .await?
            .is_some_and(|user| user.locked))
    }

    /// Records one failed login.
    ///
    /// Below the threshold the counter grows by one; once it has reached
    /// the threshold the next failure locks the account. Unknown users are
    /// ignored.
    pub async fn record_failure(&self, username: &str) -> AppResult<()> {
        let max = self.max_failed_attempts;
        let updated = self
            .directory
            .update_with(username, &move |user: &mut User| {
                if user.failed_attempts >= max {
                    user.locked = true;
                } else {
                    user.failed_attempts += 1;
                }
            })
            .await?;

        match updated {
            Some(user) if user.locked => {
                warn!(username = %username, failed_attempts = user.failed_attempts, "Account locked after repeated failed logins");
            }
            Some(user) => {
                debug!(username = %username, failed_attempts = user.failed_attempts, "Failed login recorded");
            }
            None => {
                debug!(username = %username, "Failed login for unknown user ignored");
            }
        }

        Ok(())
    }

    /// Clears the failure counter. Does not unlock a locked account.
    pub async fn reset(&self, username: &str) -> AppResult<()> {
        self.directory
            .update_with(username, &|user: &mut User| user.failed_attempts = 0)
            .await?;
        Ok(())
    }
}
