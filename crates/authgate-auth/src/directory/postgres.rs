//! [`UserDirectory`] backed by the `users` table.

use async_trait::async_trait;

use authgate_core::result::AppResult;
use authgate_database::repositories::user::UserRepository;
use authgate_entity::user::{NewUser, User};

use super::{UserDirectory, UserUpdate};

#[async_trait]
impl UserDirectory for UserRepository {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        UserRepository::find_by_username(self, username).await
    }

    async fn create(&self, data: NewUser) -> AppResult<User> {
        UserRepository::create(self, &data).await
    }

    async fn save(&self, user: &User) -> AppResult<()> {
        UserRepository::save(self, user).await
    }

    async fn update_with(&self, username: &str, apply: UserUpdate<'_>) -> AppResult<Option<User>> {
        UserRepository::update_with(self, username, |user| apply(user)).await
    }
}
