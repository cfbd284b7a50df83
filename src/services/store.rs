use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    LeaderboardEntry, Match, MatchId, MatchOutcome, MatchReply, NewMatch, User, UserId,
};

/// Errors that can occur in either store backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

/// Persistence for user accounts, their scores, and feedback
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user with score 0. Fails with `Conflict` if the username is taken.
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User, StoreError>;

    async fn get_user(&self, id: UserId) -> Result<Option<User>, StoreError>;

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Users ordered by score descending (ties by id), at most `limit` rows
    async fn get_leaderboard(&self, limit: u32) -> Result<Vec<LeaderboardEntry>, StoreError>;

    async fn save_feedback(&self, user_id: UserId, feedback: &str) -> Result<(), StoreError>;

    async fn health_check(&self) -> Result<bool, StoreError>;
}

/// Persistence for matches
#[async_trait]
pub trait MatchStore: Send + Sync {
    async fn create_match(&self, new_match: NewMatch) -> Result<Match, StoreError>;

    async fn get_match(&self, id: MatchId) -> Result<Option<Match>, StoreError>;

    /// Apply the invitee's reply if the match is still pending.
    ///
    /// Returns `false` without writing anything when the match is missing or
    /// no longer pending.
    async fn record_reply(&self, id: MatchId, reply: MatchReply) -> Result<bool, StoreError>;

    /// Persist both scores, mark the match completed and credit the winner,
    /// all or nothing. Only applies to a match in `ready`; returns `false`
    /// otherwise.
    async fn complete_match(&self, id: MatchId, outcome: MatchOutcome) -> Result<bool, StoreError>;

    /// Matches where the user is creator or invitee, newest first
    async fn get_user_matches(&self, user_id: UserId) -> Result<Vec<Match>, StoreError>;

    /// Delete every match where the user is creator or invitee
    async fn delete_user_matches(&self, user_id: UserId) -> Result<u64, StoreError>;
}
