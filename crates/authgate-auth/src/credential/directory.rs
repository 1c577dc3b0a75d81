//! Credential verification against the user directory.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use authgate_core::error::AppError;
use authgate_core::result::AppResult;
use authgate_entity::user::Principal;

use crate::directory::UserDirectory;
use crate::password::PasswordHasher;

use super::CredentialVerifier;

/// Verifies passwords against Argon2 hashes held in a [`UserDirectory`].
#[derive(Clone)]
pub struct DirectoryCredentialVerifier {
    directory: Arc<dyn UserDirectory>,
    hasher: PasswordHasher,
}

impl std::fmt::Debug for DirectoryCredentialVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectoryCredentialVerifier").finish_non_exhaustive()
    }
}

impl DirectoryCredentialVerifier {
    /// Creates a verifier reading from `directory`.
    pub fn new(directory: Arc<dyn UserDirectory>, hasher: PasswordHasher) -> Self {
        Self { directory, hasher }
    }
}

#[async_trait]
impl CredentialVerifier for DirectoryCredentialVerifier {
    async fn verify(&self, username: &str, secret: &str) -> AppResult<Box<dyn Principal>> {
        let Some(user) = self.directory.find_by_username(username).await? else {
            debug!(username = %username, "Credential check for unknown user");
            return Err(AppError::authentication("Bad credentials"));
        };

        if user.locked {
            return Err(AppError::authentication("User account is locked"));
        }

        if !self.hasher.verify_password(secret, &user.password_hash)? {
            return Err(AppError::authentication("Bad credentials"));
        }

        Ok(Box::new(user))
    }
}
