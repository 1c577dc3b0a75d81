//! Username/password verification.

pub mod directory;

use async_trait::async_trait;

use authgate_core::result::AppResult;
use authgate_entity::user::Principal;

pub use directory::DirectoryCredentialVerifier;

/// Checks a username and secret and yields the authenticated principal.
///
/// Rejections are reported as `Authentication` errors. Any other error
/// kind means verification could not be performed at all.
#[async_trait]
pub trait CredentialVerifier: Send + Sync + 'static {
    /// Verifies the pair and returns the principal it belongs to.
    async fn verify(&self, username: &str, secret: &str) -> AppResult<Box<dyn Principal>>;
}
