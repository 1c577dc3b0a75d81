mod common;

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;

use authgate_auth::{MemoryTokenStore, TokenStore};
use authgate_core::error::AppError;
use authgate_core::result::AppResult;
use authgate_entity::token::{Revocation, TokenRecord};
use common::TestApp;

/// Token table that answers reads but rejects every write.
#[derive(Default)]
struct ReadOnlyTokenStore {
    inner: MemoryTokenStore,
}

#[async_trait]
impl TokenStore for ReadOnlyTokenStore {
    async fn save(&self, _: &str, _: &str, _: &str) -> AppResult<TokenRecord> {
        Err(AppError::persistence(
            "connection refused: postgres://authgate:secret@db/authgate",
        ))
    }

    async fn find_by_access_token(&self, token: &str) -> AppResult<Option<TokenRecord>> {
        self.inner.find_by_access_token(token).await
    }

    async fn find_by_refresh_token(&self, token: &str) -> AppResult<Option<TokenRecord>> {
        self.inner.find_by_refresh_token(token).await
    }

    async fn find_valid_by_username(&self, username: &str) -> AppResult<Vec<TokenRecord>> {
        self.inner.find_valid_by_username(username).await
    }

    async fn list_all(&self) -> AppResult<Vec<TokenRecord>> {
        self.inner.list_all().await
    }

    async fn revoke(&self, _: &str) -> AppResult<Revocation> {
        Err(AppError::persistence("connection refused"))
    }
}

#[tokio::test]
async fn test_storage_failure_is_a_generic_500() {
    let app = TestApp::with_token_store(Arc::new(ReadOnlyTokenStore::default()));

    let registered = app.register("alice", "password1", "ROLE_USER").await;
    assert_eq!(registered.status, StatusCode::OK);

    let res = app.login("alice", "password1").await;
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    let body = res.json();
    assert_eq!(body["error"], "PERSISTENCE");
    assert_eq!(body["message"], "Internal server error");
    assert!(!res.body.contains("secret"));
}
