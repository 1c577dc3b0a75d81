//! [`TokenStore`] backed by the `tokens` table.

use async_trait::async_trait;

use authgate_core::result::AppResult;
use authgate_database::repositories::TokenRepository;
use authgate_entity::token::{Revocation, TokenRecord};

use super::TokenStore;

#[async_trait]
impl TokenStore for TokenRepository {
    async fn save(
        &self,
        username: &str,
        access_token: &str,
        refresh_token: &str,
    ) -> AppResult<TokenRecord> {
        self.create(username, access_token, refresh_token).await
    }

    async fn find_by_access_token(&self, token: &str) -> AppResult<Option<TokenRecord>> {
        TokenRepository::find_by_access_token(self, token).await
    }

    async fn find_by_refresh_token(&self, token: &str) -> AppResult<Option<TokenRecord>> {
        TokenRepository::find_by_refresh_token(self, token).await
    }

    async fn find_valid_by_username(&self, username: &str) -> AppResult<Vec<TokenRecord>> {
        TokenRepository::find_valid_by_username(self, username).await
    }

    async fn list_all(&self) -> AppResult<Vec<TokenRecord>> {
        self.find_all().await
    }

    async fn revoke(&self, token: &str) -> AppResult<Revocation> {
        TokenRepository::revoke(self, token).await
    }
}
