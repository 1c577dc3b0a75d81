//! Concurrent in-memory user directory.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use authgate_core::error::AppError;
use authgate_core::result::AppResult;
use authgate_entity::user::{NewUser, User};

use super::{UserDirectory, UserUpdate};

/// In-memory [`UserDirectory`] keyed by username.
///
/// Per-user updates run under the shard lock of the user's entry.
#[derive(Debug, Default)]
pub struct MemoryUserDirectory {
    users: DashMap<String, User>,
    next_id: AtomicI64,
}

impl MemoryUserDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether no users are registered.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl UserDirectory for MemoryUserDirectory {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self.users.get(username).map(|u| u.value().clone()))
    }

    async fn create(&self, data: NewUser) -> AppResult<User> {
        match self.users.entry(data.username.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict(format!(
                "User with username {} already exist",
                data.username
            ))),
            Entry::Vacant(slot) => {
                let user = User {
                    id: self.next_id.fetch_add(1, Ordering::Relaxed) + 1,
                    username: data.username,
                    password_hash: data.password_hash,
                    role: data.role,
                    locked: false,
                    failed_attempts: 0,
                };
                slot.insert(user.clone());
                Ok(user)
            }
        }
    }

    async fn save(&self, user: &User) -> AppResult<()> {
        match self.users.get_mut(&user.username) {
            Some(mut stored) => {
                *stored = user.clone();
                Ok(())
            }
            None => Err(AppError::not_found(format!(
                "User {} not found",
                user.username
            ))),
        }
    }

    async fn update_with(&self, username: &str, apply: UserUpdate<'_>) -> AppResult<Option<User>> {
        Ok(self.users.get_mut(username).map(|mut entry| {
            apply(entry.value_mut());
            entry.value().clone()
        }))
    }
}
