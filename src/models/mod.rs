// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Feedback, LeaderboardEntry, Match, MatchId, MatchOutcome, MatchReply, MatchScores,
    MatchStatus, NewMatch, User, UserId, UserSummary,
};
pub use requests::{FeedbackRequest, LeaderboardQuery, LoginRequest, RegisterRequest};
pub use responses::{AuthResponse, ErrorResponse, HealthResponse, MessageResponse};
