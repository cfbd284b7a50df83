// Core match workflow exports
pub mod leaderboard;
pub mod lifecycle;
pub mod scoring;
pub mod upload;

pub use leaderboard::Leaderboard;
pub use lifecycle::{MatchController, MatchError};
pub use scoring::{decide_winner, resolve_outcome, Side};
pub use upload::{UploadError, UploadPolicy};
