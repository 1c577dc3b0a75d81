//! Persistence of issued token pairs and their validity flag.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use authgate_core::result::AppResult;
use authgate_entity::token::{Revocation, TokenRecord};

pub use memory::MemoryTokenStore;

/// Durable record of issued token pairs.
///
/// Implementations must make [`TokenStore::revoke`] a single atomic
/// find-and-flip: of two concurrent calls on the same valid token, exactly
/// one observes [`Revocation::Revoked`].
#[async_trait]
pub trait TokenStore: Send + Sync + 'static {
    /// Stores a new pair with `valid = true`.
    async fn save(
        &self,
        username: &str,
        access_token: &str,
        refresh_token: &str,
    ) -> AppResult<TokenRecord>;

    /// Finds the record carrying this access token.
    async fn find_by_access_token(&self, token: &str) -> AppResult<Option<TokenRecord>>;

    /// Finds the record carrying this refresh token.
    async fn find_by_refresh_token(&self, token: &str) -> AppResult<Option<TokenRecord>>;

    /// Still-valid records for `username`, oldest first.
    async fn find_valid_by_username(&self, username: &str) -> AppResult<Vec<TokenRecord>>;

    /// Every stored record, oldest first. O(n); audit use only.
    async fn list_all(&self) -> AppResult<Vec<TokenRecord>>;

    /// Invalidates the record carrying `token`, looking it up as an access
    /// token first and as a refresh token second.
    async fn revoke(&self, token: &str) -> AppResult<Revocation>;

    /// Returns `true` only if this call flipped a valid record to invalid.
    async fn invalidate(&self, token: &str) -> AppResult<bool> {
        Ok(self.revoke(token).await? == Revocation::Revoked)
    }
}
