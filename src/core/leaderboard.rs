use std::sync::Arc;

use crate::models::LeaderboardEntry;
use crate::services::{StoreError, UserStore};

/// Read-only ranking of users by cumulative wins
#[derive(Clone)]
pub struct Leaderboard {
    users: Arc<dyn UserStore>,
    default_limit: u32,
    max_limit: u32,
}

impl Leaderboard {
    pub fn new(users: Arc<dyn UserStore>, default_limit: u32, max_limit: u32) -> Self {
        Self {
            users,
            default_limit,
            max_limit,
        }
    }

    /// Cap a requested size at `max_limit`, falling back to the default
    pub fn effective_limit(&self, requested: Option<u32>) -> u32 {
        requested
            .unwrap_or(self.default_limit)
            .min(self.max_limit)
    }

    pub async fn top(&self, requested: Option<u32>) -> Result<Vec<LeaderboardEntry>, StoreError> {
        let limit = self.effective_limit(requested);
        let entries = self.users.get_leaderboard(limit).await?;
        tracing::debug!("Leaderboard returned {} of at most {} users", entries.len(), limit);
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::MemoryStore;

    #[test]
    fn test_effective_limit() {
        let board = Leaderboard::new(Arc::new(MemoryStore::new()), 100, 1000);
        assert_eq!(board.effective_limit(None), 100);
        assert_eq!(board.effective_limit(Some(5)), 5);
        assert_eq!(board.effective_limit(Some(0)), 0);
        assert_eq!(board.effective_limit(Some(50_000)), 1000);
    }

    #[tokio::test]
    async fn test_zero_limit_returns_no_rows() {
        let store = Arc::new(MemoryStore::new());
        store.create_user("alice", "h").await.unwrap();
        store.create_user("bob", "h").await.unwrap();
        let board = Leaderboard::new(store, 100, 1000);

        assert!(board.top(Some(0)).await.unwrap().is_empty());
        assert_eq!(board.top(Some(1)).await.unwrap().len(), 1);
    }
}
