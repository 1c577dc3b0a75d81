//! Account registration.

use std::sync::Arc;

use tracing::info;

use authgate_core::error::AppError;
use authgate_core::result::AppResult;
use authgate_entity::user::{NewUser, User, UserRole};

use crate::password::{PasswordHasher, PasswordValidator};

use super::UserDirectory;

/// Registers new accounts with a hashed password.
#[derive(Clone)]
pub struct UserRegistrar {
    directory: Arc<dyn UserDirectory>,
    hasher: PasswordHasher,
    validator: PasswordValidator,
}

impl std::fmt::Debug for UserRegistrar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRegistrar")
            .field("validator", &self.validator)
            .finish()
    }
}

impl UserRegistrar {
    /// Creates a registrar writing into `directory`.
    pub fn new(
        directory: Arc<dyn UserDirectory>,
        hasher: PasswordHasher,
        validator: PasswordValidator,
    ) -> Self {
        Self {
            directory,
            hasher,
            validator,
        }
    }

    /// Validates the password, hashes it, and stores the account.
    ///
    /// A taken username is a `Conflict`.
    pub async fn register(&self, username: &str, password: &str, role: UserRole) -> AppResult<User> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AppError::validation("Username must not be blank"));
        }
        self.validator.validate(password)?;

        let password_hash = self.hasher.hash_password(password)?;
        let user = self
            .directory
            .create(NewUser {
                username: username.to_string(),
                password_hash,
                role,
            })
            .await?;

        info!(user_id = user.id, username = %user.username, role = %user.role, "User registered");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use authgate_core::config::AuthConfig;
    use authgate_core::error::ErrorKind;

    use super::*;
    use crate::directory::MemoryUserDirectory;

    fn make_registrar() -> (UserRegistrar, Arc<MemoryUserDirectory>) {
        let directory = Arc::new(MemoryUserDirectory::new());
        let registrar = UserRegistrar::new(
            directory.clone(),
            PasswordHasher::new(),
            PasswordValidator::new(&AuthConfig::default()),
        );
        (registrar, directory)
    }

    #[tokio::test]
    async fn test_register_stores_hash_not_password() {
        let (registrar, directory) = make_registrar();
        let user = registrar
            .register("alice", "password1", UserRole::Admin)
            .await
            .unwrap();
        assert_eq!(user.role, UserRole::Admin);

        let stored = directory.find_by_username("alice").await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "password1");
        assert!(
            PasswordHasher::new()
                .verify_password("password1", &stored.password_hash)
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_register_rejects_duplicates_and_weak_passwords() {
        let (registrar, _) = make_registrar();
        registrar
            .register("alice", "password1", UserRole::User)
            .await
            .unwrap();

        let dup = registrar
            .register("alice", "password2", UserRole::User)
            .await
            .unwrap_err();
        assert!(dup.is(ErrorKind::Conflict));

        let weak = registrar
            .register("bob", "pw", UserRole::User)
            .await
            .unwrap_err();
        assert!(weak.is(ErrorKind::Validation));

        let blank = registrar
            .register("  ", "password1", UserRole::User)
            .await
            .unwrap_err();
        assert!(blank.is(ErrorKind::Validation));
    }
}
