//! User table repository.

use sqlx::PgPool;

use authgate_core::error::{AppError, ErrorKind};
use authgate_core::result::AppResult;
use authgate_entity::user::{NewUser, User};

/// Repository for the `users` table.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by username.
    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Persistence, "Failed to find user", e))
    }

    /// Register a new user. Fails with `Conflict` if the username is taken.
    pub async fn create(&self, data: &NewUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (username, password_hash, role) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&data.username)
        .bind(&data.password_hash)
        .bind(data.role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => AppError::conflict(format!(
                "User with username {} already exist",
                data.username
            )),
            _ => AppError::with_source(ErrorKind::Persistence, "Failed to create user", e),
        })
    }

    /// Overwrite the mutable columns of an existing user.
    pub async fn save(&self, user: &User) -> AppResult<()> {
        sqlx::query(
            "UPDATE users SET password_hash = $2, role = $3, locked = $4, failed_attempts = $5 \
             WHERE id = $1",
        )
        .bind(user.id)
        .bind(&user.password_hash)
        .bind(user.role)
        .bind(user.locked)
        .bind(user.failed_attempts)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Persistence, "Failed to save user", e))?;
        Ok(())
    }

    /// Read-modify-write a user under a row lock.
    ///
    /// Concurrent callers for the same username serialize on
    /// `SELECT ... FOR UPDATE`, so no update is lost. Returns `None` when
    /// the user does not exist.
    pub async fn update_with<F>(&self, username: &str, apply: F) -> AppResult<Option<User>>
    where
        F: FnOnce(&mut User) + Send,
    {
        let mut tx = self.pool.begin().await?;

        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1 FOR UPDATE")
            .bind(username)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Persistence, "Failed to lock user", e))?;

        let Some(mut user) = user else {
            return Ok(None);
        };

        apply(&mut user);

        sqlx::query(
            "UPDATE users SET password_hash = $2, role = $3, locked = $4, failed_attempts = $5 \
             WHERE id = $1",
        )
        .bind(user.id)
        .bind(&user.password_hash)
        .bind(user.role)
        .bind(user.locked)
        .bind(user.failed_attempts)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Persistence, "Failed to update user", e))?;

        tx.commit().await?;
        Ok(Some(user))
    }
}
