use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::Mutex;

use crate::models::{
    Feedback, LeaderboardEntry, Match, MatchId, MatchOutcome, MatchReply, MatchStatus, NewMatch,
    User, UserId,
};
use crate::services::store::{MatchStore, StoreError, UserStore};

#[derive(Default)]
struct Tables {
    users: BTreeMap<UserId, User>,
    matches: BTreeMap<MatchId, Match>,
    feedback: Vec<Feedback>,
    next_user_id: UserId,
    next_match_id: MatchId,
    next_feedback_id: i32,
}

/// In-process store with the same semantics as [`PostgresStore`]
///
/// Every operation takes the single table lock, so multi-row writes such as
/// match completion are atomic.
///
/// [`PostgresStore`]: crate::services::PostgresStore
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of feedback entries stored
    pub async fn feedback_count(&self) -> usize {
        self.tables.lock().await.feedback.len()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User, StoreError> {
        let mut tables = self.tables.lock().await;

        if tables.users.values().any(|u| u.username == username) {
            return Err(StoreError::Conflict(format!("username '{}'", username)));
        }

        tables.next_user_id += 1;
        let user = User {
            id: tables.next_user_id,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            score: 0,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>, StoreError> {
        Ok(self.tables.lock().await.users.get(&id).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let tables = self.tables.lock().await;
        Ok(tables.users.values().find(|u| u.username == username).cloned())
    }

    async fn get_leaderboard(&self, limit: u32) -> Result<Vec<LeaderboardEntry>, StoreError> {
        let tables = self.tables.lock().await;

        // BTreeMap iteration is id-ascending and the sort is stable
        let mut users: Vec<&User> = tables.users.values().collect();
        users.sort_by(|a, b| b.score.cmp(&a.score));

        Ok(users
            .into_iter()
            .take(limit as usize)
            .map(|u| LeaderboardEntry {
                username: u.username.clone(),
                score: u.score,
            })
            .collect())
    }

    async fn save_feedback(&self, user_id: UserId, feedback: &str) -> Result<(), StoreError> {
        let mut tables = self.tables.lock().await;
        tables.next_feedback_id += 1;
        let entry = Feedback {
            id: tables.next_feedback_id,
            user_id,
            feedback: feedback.to_string(),
            created_at: chrono::Utc::now(),
        };
        tables.feedback.push(entry);
        Ok(())
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}

#[async_trait]
impl MatchStore for MemoryStore {
    async fn create_match(&self, new_match: NewMatch) -> Result<Match, StoreError> {
        let mut tables = self.tables.lock().await;
        tables.next_match_id += 1;

        let m = Match {
            id: tables.next_match_id,
            creator_id: new_match.creator_id,
            invited_id: new_match.invited_id,
            creator_photo: new_match.creator_photo,
            invited_photo: None,
            creator_score: None,
            invited_score: None,
            status: MatchStatus::Pending,
            created_at: new_match.created_at,
        };
        tables.matches.insert(m.id, m.clone());
        Ok(m)
    }

    async fn get_match(&self, id: MatchId) -> Result<Option<Match>, StoreError> {
        Ok(self.tables.lock().await.matches.get(&id).cloned())
    }

    async fn record_reply(&self, id: MatchId, reply: MatchReply) -> Result<bool, StoreError> {
        let mut tables = self.tables.lock().await;

        let m = match tables.matches.get_mut(&id) {
            Some(m) if m.status == MatchStatus::Pending => m,
            _ => return Ok(false),
        };

        m.status = reply.resulting_status();
        if let MatchReply::Accepted { invited_photo } = reply {
            m.invited_photo = Some(invited_photo);
        }
        Ok(true)
    }

    async fn complete_match(&self, id: MatchId, outcome: MatchOutcome) -> Result<bool, StoreError> {
        let mut tables = self.tables.lock().await;

        match tables.matches.get(&id) {
            Some(m) if m.status == MatchStatus::Ready => {}
            _ => return Ok(false),
        }

        // Check the winner before touching anything so a failure writes nothing
        let winner = tables
            .users
            .get_mut(&outcome.winner_id)
            .ok_or_else(|| StoreError::NotFound(format!("winner {}", outcome.winner_id)))?;
        winner.score += 1;

        if let Some(m) = tables.matches.get_mut(&id) {
            m.creator_score = Some(outcome.creator_score);
            m.invited_score = Some(outcome.invited_score);
            m.status = MatchStatus::Completed;
        }
        Ok(true)
    }

    async fn get_user_matches(&self, user_id: UserId) -> Result<Vec<Match>, StoreError> {
        let tables = self.tables.lock().await;

        let mut matches: Vec<Match> = tables
            .matches
            .values()
            .filter(|m| m.involves(user_id))
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(matches)
    }

    async fn delete_user_matches(&self, user_id: UserId) -> Result<u64, StoreError> {
        let mut tables = self.tables.lock().await;
        let before = tables.matches.len();
        tables.matches.retain(|_, m| !m.involves(user_id));
        Ok((before - tables.matches.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded() -> (MemoryStore, User, User) {
        let store = MemoryStore::new();
        let alice = store.create_user("alice", "h1").await.unwrap();
        let bob = store.create_user("bob", "h2").await.unwrap();
        (store, alice, bob)
    }

    fn new_match(creator: &User, invited: &User) -> NewMatch {
        NewMatch {
            creator_id: creator.id,
            invited_id: invited.id,
            creator_photo: "cDE=".to_string(),
            created_at: chrono::Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts() {
        let (store, _, _) = seeded().await;
        let err = store.create_user("alice", "other").await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_reply_only_applies_to_pending() {
        let (store, alice, bob) = seeded().await;
        let m = store.create_match(new_match(&alice, &bob)).await.unwrap();

        assert!(store.record_reply(m.id, MatchReply::Declined).await.unwrap());
        let accepted = MatchReply::Accepted { invited_photo: "cDI=".to_string() };
        assert!(!store.record_reply(m.id, accepted).await.unwrap());

        let m = store.get_match(m.id).await.unwrap().unwrap();
        assert_eq!(m.status, MatchStatus::Declined);
        assert!(m.invited_photo.is_none());
    }

    #[tokio::test]
    async fn test_completion_requires_ready_and_credits_once() {
        let (store, alice, bob) = seeded().await;
        let m = store.create_match(new_match(&alice, &bob)).await.unwrap();
        let outcome = MatchOutcome { creator_score: 90.0, invited_score: 10.0, winner_id: alice.id };

        assert!(!store.complete_match(m.id, outcome).await.unwrap());

        let accepted = MatchReply::Accepted { invited_photo: "cDI=".to_string() };
        assert!(store.record_reply(m.id, accepted).await.unwrap());
        assert!(store.complete_match(m.id, outcome).await.unwrap());
        assert!(!store.complete_match(m.id, outcome).await.unwrap());

        assert_eq!(store.get_user(alice.id).await.unwrap().unwrap().score, 1);
        assert_eq!(store.get_user(bob.id).await.unwrap().unwrap().score, 0);
    }

    #[tokio::test]
    async fn test_completion_with_unknown_winner_writes_nothing() {
        let (store, alice, bob) = seeded().await;
        let m = store.create_match(new_match(&alice, &bob)).await.unwrap();
        let accepted = MatchReply::Accepted { invited_photo: "cDI=".to_string() };
        store.record_reply(m.id, accepted).await.unwrap();

        let outcome = MatchOutcome { creator_score: 1.0, invited_score: 2.0, winner_id: 999 };
        assert!(store.complete_match(m.id, outcome).await.is_err());

        let m = store.get_match(m.id).await.unwrap().unwrap();
        assert_eq!(m.status, MatchStatus::Ready);
        assert!(m.creator_score.is_none());
    }

    #[tokio::test]
    async fn test_leaderboard_ties_keep_registration_order() {
        let (store, _alice, _bob) = seeded().await;
        store.create_user("carol", "h3").await.unwrap();

        let board = store.get_leaderboard(2).await.unwrap();
        let names: Vec<&str> = board.iter().map(|e| e.username.as_str()).collect();
        assert_eq!(names, vec!["alice", "bob"]);
    }
}
