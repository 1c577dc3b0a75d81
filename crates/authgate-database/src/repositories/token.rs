//! Token table repository.

use sqlx::PgPool;

use authgate_core::error::{AppError, ErrorKind};
use authgate_core::result::AppResult;
use authgate_entity::token::{Revocation, TokenRecord};

/// Repository for the `tokens` table.
#[derive(Debug, Clone)]
pub struct TokenRepository {
    pool: PgPool,
}

/// Which token column a lookup or revocation is keyed on.
#[derive(Debug, Clone, Copy)]
enum TokenColumn {
    Access,
    Refresh,
}

impl TokenColumn {
    fn name(self) -> &'static str {
        match self {
            Self::Access => "access_token",
            Self::Refresh => "refresh_token",
        }
    }
}

impl TokenRepository {
    /// Create a new token repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new, valid token pair.
    pub async fn create(
        &self,
        username: &str,
        access_token: &str,
        refresh_token: &str,
    ) -> AppResult<TokenRecord> {
        sqlx::query_as::<_, TokenRecord>(
            "INSERT INTO tokens (username, access_token, refresh_token, valid) \
             VALUES ($1, $2, $3, TRUE) RETURNING *",
        )
        .bind(username)
        .bind(access_token)
        .bind(refresh_token)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Persistence, "Failed to save token", e))
    }

    /// Find a record by its access token.
    pub async fn find_by_access_token(&self, token: &str) -> AppResult<Option<TokenRecord>> {
        self.find_by(TokenColumn::Access, token).await
    }

    /// Find a record by its refresh token.
    pub async fn find_by_refresh_token(&self, token: &str) -> AppResult<Option<TokenRecord>> {
        self.find_by(TokenColumn::Refresh, token).await
    }

    /// All still-valid records for a user, oldest first.
    pub async fn find_valid_by_username(&self, username: &str) -> AppResult<Vec<TokenRecord>> {
        sqlx::query_as::<_, TokenRecord>(
            "SELECT * FROM tokens WHERE username = $1 AND valid ORDER BY id ASC",
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Persistence, "Failed to find user tokens", e)
        })
    }

    /// Every stored record, oldest first.
    pub async fn find_all(&self) -> AppResult<Vec<TokenRecord>> {
        sqlx::query_as::<_, TokenRecord>("SELECT * FROM tokens ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Persistence, "Failed to list tokens", e))
    }

    /// Invalidate the record carrying `token`, matching access tokens first.
    ///
    /// The flip itself is a single conditional `UPDATE ... WHERE valid`, so
    /// two concurrent callers can never both observe [`Revocation::Revoked`].
    pub async fn revoke(&self, token: &str) -> AppResult<Revocation> {
        for column in [TokenColumn::Access, TokenColumn::Refresh] {
            match self.revoke_by(column, token).await? {
                Revocation::NotFound => continue,
                outcome => return Ok(outcome),
            }
        }
        Ok(Revocation::NotFound)
    }

    async fn revoke_by(&self, column: TokenColumn, token: &str) -> AppResult<Revocation> {
        let flipped: Option<i64> = sqlx::query_scalar(&format!(
            "UPDATE tokens SET valid = FALSE WHERE {} = $1 AND valid RETURNING id",
            column.name()
        ))
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Persistence, "Failed to revoke token", e))?;

        if flipped.is_some() {
            return Ok(Revocation::Revoked);
        }

        Ok(match self.find_by(column, token).await? {
            Some(_) => Revocation::AlreadyRevoked,
            None => Revocation::NotFound,
        })
    }

    async fn find_by(&self, column: TokenColumn, token: &str) -> AppResult<Option<TokenRecord>> {
        sqlx::query_as::<_, TokenRecord>(&format!(
            "SELECT * FROM tokens WHERE {} = $1 ORDER BY id ASC LIMIT 1",
            column.name()
        ))
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Persistence, "Failed to find token", e))
    }
}
