//! In-memory token store using a Tokio mutex for single-node deployments.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use authgate_core::result::AppResult;
use authgate_entity::token::{Revocation, TokenRecord};

use super::TokenStore;

/// Records plus lookup indexes, all guarded by one lock.
#[derive(Debug, Default)]
struct TokenTable {
    /// Records in insertion order; a record's id is its position + 1.
    records: Vec<TokenRecord>,
    /// Access token to record position.
    by_access: HashMap<String, usize>,
    /// Refresh token to record position.
    by_refresh: HashMap<String, usize>,
    /// Username to positions of records that are still valid.
    valid_by_user: HashMap<String, Vec<usize>>,
}

impl TokenTable {
    fn flip(&mut self, idx: usize) -> Revocation {
        let record = &mut self.records[idx];
        if !record.valid {
            return Revocation::AlreadyRevoked;
        }
        record.valid = false;

        if let Some(positions) = self.valid_by_user.get_mut(&record.username) {
            positions.retain(|&p| p != idx);
        }
        Revocation::Revoked
    }
}

/// In-memory [`TokenStore`].
///
/// State is lost when the process exits. Every operation holds the table
/// lock for its whole duration, so revocation is a single atomic step.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    table: Arc<Mutex<TokenTable>>,
}

impl MemoryTokenStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn save(
        &self,
        username: &str,
        access_token: &str,
        refresh_token: &str,
    ) -> AppResult<TokenRecord> {
        let mut table = self.table.lock().await;

        let idx = table.records.len();
        let record = TokenRecord {
            id: idx as i64 + 1,
            username: username.to_string(),
            access_token: access_token.to_string(),
            refresh_token: refresh_token.to_string(),
            valid: true,
            created_at: Utc::now(),
        };

        table.records.push(record.clone());
        table.by_access.entry(access_token.to_string()).or_insert(idx);
        table
            .by_refresh
            .entry(refresh_token.to_string())
            .or_insert(idx);
        table
            .valid_by_user
            .entry(username.to_string())
            .or_default()
            .push(idx);

        Ok(record)
    }

    async fn find_by_access_token(&self, token: &str) -> AppResult<Option<TokenRecord>> {
        let table = self.table.lock().await;
        Ok(table
            .by_access
            .get(token)
            .map(|&idx| table.records[idx].clone()))
    }

    async fn find_by_refresh_token(&self, token: &str) -> AppResult<Option<TokenRecord>> {
        let table = self.table.lock().await;
        Ok(table
            .by_refresh
            .get(token)
            .map(|&idx| table.records[idx].clone()))
    }

    async fn find_valid_by_username(&self, username: &str) -> AppResult<Vec<TokenRecord>> {
        let table = self.table.lock().await;
        Ok(table
            .valid_by_user
            .get(username)
            .map(|positions| {
                positions
                    .iter()
                    .map(|&idx| table.records[idx].clone())
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn list_all(&self) -> AppResult<Vec<TokenRecord>> {
        Ok(self.table.lock().await.records.clone())
    }

    async fn revoke(&self, token: &str) -> AppResult<Revocation> {
        let mut table = self.table.lock().await;

        let idx = table
            .by_access
            .get(token)
            .or_else(|| table.by_refresh.get(token))
            .copied();

        Ok(match idx {
            Some(idx) => table.flip(idx),
            None => Revocation::NotFound,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_and_find() {
        let store = MemoryTokenStore::new();
        let saved = store.save("alice", "a1", "r1").await.unwrap();
        assert!(saved.valid);
        assert_eq!(saved.id, 1);

        let by_access = store.find_by_access_token("a1").await.unwrap().unwrap();
        let by_refresh = store.find_by_refresh_token("r1").await.unwrap().unwrap();
        assert_eq!(by_access, saved);
        assert_eq!(by_refresh, saved);
        assert!(store.find_by_access_token("r1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_invalidate_is_idempotent() {
        let store = MemoryTokenStore::new();
        store.save("alice", "a1", "r1").await.unwrap();

        assert!(store.invalidate("a1").await.unwrap());
        assert!(!store.invalidate("a1").await.unwrap());
        assert!(!store.find_by_access_token("a1").await.unwrap().unwrap().valid);
    }

    #[tokio::test]
    async fn test_revoke_by_refresh_token_retires_the_pair() {
        let store = MemoryTokenStore::new();
        store.save("alice", "a1", "r1").await.unwrap();

        assert_eq!(store.revoke("r1").await.unwrap(), Revocation::Revoked);
        assert_eq!(store.revoke("a1").await.unwrap(), Revocation::AlreadyRevoked);
        assert_eq!(store.revoke("zzz").await.unwrap(), Revocation::NotFound);
        assert!(!store.invalidate("zzz").await.unwrap());
    }

    #[tokio::test]
    async fn test_valid_by_username_tracks_revocations() {
        let store = MemoryTokenStore::new();
        store.save("alice", "a1", "r1").await.unwrap();
        store.save("alice", "a2", "r2").await.unwrap();
        store.save("bob", "b1", "rb1").await.unwrap();

        let valid = store.find_valid_by_username("alice").await.unwrap();
        assert_eq!(valid.len(), 2);
        assert_eq!(valid[0].access_token, "a1");

        store.invalidate("a1").await.unwrap();
        let valid = store.find_valid_by_username("alice").await.unwrap();
        assert_eq!(valid.len(), 1);
        assert_eq!(valid[0].access_token, "a2");

        assert!(store.find_valid_by_username("carol").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_records_are_retained_after_invalidation() {
        let store = MemoryTokenStore::new();
        store.save("alice", "a1", "r1").await.unwrap();
        store.save("alice", "a2", "r2").await.unwrap();
        store.invalidate("r1").await.unwrap();

        let all = store.list_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(!all[0].valid);
        assert!(all[1].valid);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_revoke_flips_once() {
        let store = MemoryTokenStore::new();
        store.save("alice", "a1", "r1").await.unwrap();

        let tasks = (0..16).map(|_| {
            let store = store.clone();
            tokio::spawn(async move { store.invalidate("r1").await.unwrap() })
        });
        let results = futures::future::join_all(tasks).await;
        let winners = results.into_iter().filter(|r| *r.as_ref().unwrap()).count();
        assert_eq!(winners, 1);
    }
}
