use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to register a new account
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 64, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    #[serde(rename = "acceptPolicy", default)]
    pub accept_policy: bool,
}

/// Request to log in with existing credentials
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Free-text feedback submission
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FeedbackRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Feedback is required"))]
    pub feedback: String,
}

/// Query string for the leaderboard
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeaderboardQuery {
    pub limit: Option<u32>,
}
