//! Faceoff - photo duel service
//!
//! Two users each submit a photo, an external face-analysis API scores both,
//! and the higher score wins a point on the leaderboard. The match lifecycle
//! (`pending -> ready -> completed`, or `declined`) lives in [`core`]; storage
//! and the Face++ client live in [`services`].

pub mod auth;
pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{decide_winner, Leaderboard, MatchController, MatchError, Side, UploadPolicy};
pub use error::AppError;
pub use models::{LeaderboardEntry, Match, MatchScores, MatchStatus, User};
pub use routes::AppState;
