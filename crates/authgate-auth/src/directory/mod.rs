//! User lookup and per-user atomic updates.

pub mod memory;
pub mod postgres;
pub mod registrar;

use async_trait::async_trait;

use authgate_core::result::AppResult;
use authgate_entity::user::{NewUser, User};

pub use memory::MemoryUserDirectory;
pub use registrar::UserRegistrar;

/// Mutation applied to a user while the directory holds its lock.
pub type UserUpdate<'a> = &'a (dyn Fn(&mut User) + Send + Sync);

/// Source of truth for registered accounts.
#[async_trait]
pub trait UserDirectory: Send + Sync + 'static {
    /// Looks up a user by username.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Registers a new account. Fails with `Conflict` on a taken username.
    async fn create(&self, data: NewUser) -> AppResult<User>;

    /// Overwrites an existing user.
    async fn save(&self, user: &User) -> AppResult<()>;

    /// Applies `apply` to the stored user as one atomic read-modify-write.
    ///
    /// Concurrent updates of the same user never lose each other's changes.
    /// Returns the updated user, or `None` if no such user exists.
    async fn update_with(&self, username: &str, apply: UserUpdate<'_>) -> AppResult<Option<User>>;
}
