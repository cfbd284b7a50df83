use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type UserId = i32;
pub type MatchId = i32;

/// Registered user and their cumulative win count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub score: i32,
}

/// Public view of a user, safe to return to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: UserId,
    pub username: String,
    pub score: i32,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            score: user.score,
        }
    }
}

/// Lifecycle state of a match
///
/// `pending -> ready -> completed`, or `pending -> declined`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Pending,
    Ready,
    Declined,
    Completed,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Pending => "pending",
            MatchStatus::Ready => "ready",
            MatchStatus::Declined => "declined",
            MatchStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(MatchStatus::Pending),
            "ready" => Ok(MatchStatus::Ready),
            "declined" => Ok(MatchStatus::Declined),
            "completed" => Ok(MatchStatus::Completed),
            other => Err(format!("unknown match status '{}'", other)),
        }
    }
}

/// A photo duel between a creator and an invited user
///
/// Photos are base64 encoded. `invited_photo` and both scores stay empty
/// until the corresponding transition happens.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: MatchId,
    pub creator_id: UserId,
    pub invited_id: UserId,
    pub creator_photo: String,
    pub invited_photo: Option<String>,
    pub creator_score: Option<f64>,
    pub invited_score: Option<f64>,
    pub status: MatchStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Match {
    pub fn involves(&self, user_id: UserId) -> bool {
        self.creator_id == user_id || self.invited_id == user_id
    }
}

/// Fields required to persist a new pending match
#[derive(Debug, Clone)]
pub struct NewMatch {
    pub creator_id: UserId,
    pub invited_id: UserId,
    pub creator_photo: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// The invitee's answer to a pending match
#[derive(Debug, Clone, PartialEq)]
pub enum MatchReply {
    Declined,
    Accepted { invited_photo: String },
}

impl MatchReply {
    pub fn resulting_status(&self) -> MatchStatus {
        match self {
            MatchReply::Declined => MatchStatus::Declined,
            MatchReply::Accepted { .. } => MatchStatus::Ready,
        }
    }
}

/// Everything written when a ready match completes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchOutcome {
    pub creator_score: f64,
    pub invited_score: f64,
    pub winner_id: UserId,
}

/// Both photo scores returned from a comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchScores {
    pub creator_score: f64,
    pub invited_score: f64,
}

/// One leaderboard row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub username: String,
    pub score: i32,
}

/// Free-text feedback left by a user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: i32,
    pub user_id: UserId,
    pub feedback: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
