use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::core::scoring::resolve_outcome;
use crate::models::{Match, MatchId, MatchReply, MatchScores, MatchStatus, NewMatch, UserId};
use crate::services::{FaceScorer, MatchStore, ScorerError, StoreError, UserStore};

/// Errors from match lifecycle operations
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("{0}")]
    NotFound(String),

    #[error("Not authorized")]
    Forbidden,

    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Scorer(#[from] ScorerError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

const NOT_FOUND: &str = "Match not found";
const NOT_READY: &str = "Match not ready for comparison";
const ALREADY_ANSWERED: &str = "Match has already been answered";
const NO_PHOTO: &str = "No photo uploaded";

/// Drives matches through `pending -> ready -> completed` (or `declined`)
///
/// # Transitions
/// 1. `create_match` stores a pending match for an existing invitee
/// 2. `respond_to_match` lets the invitee accept with a photo or decline
/// 3. `compare_match` scores both photos and completes the match
///
/// Every transition is applied by the store with a status guard, so a
/// repeated or concurrent request cannot apply it twice.
#[derive(Clone)]
pub struct MatchController {
    matches: Arc<dyn MatchStore>,
    users: Arc<dyn UserStore>,
    scorer: Arc<dyn FaceScorer>,
    inter_call_delay: Duration,
}

impl MatchController {
    pub fn new(
        matches: Arc<dyn MatchStore>,
        users: Arc<dyn UserStore>,
        scorer: Arc<dyn FaceScorer>,
        inter_call_delay: Duration,
    ) -> Self {
        Self {
            matches,
            users,
            scorer,
            inter_call_delay,
        }
    }

    /// Invite `invited_username` to a duel against the creator's photo
    pub async fn create_match(
        &self,
        creator_id: UserId,
        invited_username: &str,
        photo: &[u8],
    ) -> Result<Match, MatchError> {
        if photo.is_empty() {
            return Err(MatchError::BadRequest(NO_PHOTO.into()));
        }

        let invited = self
            .users
            .get_user_by_username(invited_username)
            .await?
            .ok_or_else(|| MatchError::NotFound("Invited user not found".into()))?;

        if invited.id == creator_id {
            return Err(MatchError::BadRequest("You cannot invite yourself".into()));
        }

        let created = self
            .matches
            .create_match(NewMatch {
                creator_id,
                invited_id: invited.id,
                creator_photo: B64.encode(photo),
                created_at: chrono::Utc::now(),
            })
            .await?;

        tracing::info!(
            "Match {} created by user {} inviting user {}",
            created.id,
            creator_id,
            invited.id
        );

        Ok(created)
    }

    /// Accept with a photo (`pending -> ready`) or decline (`pending -> declined`)
    pub async fn respond_to_match(
        &self,
        match_id: MatchId,
        responder_id: UserId,
        accept: bool,
        photo: Option<&[u8]>,
    ) -> Result<MatchStatus, MatchError> {
        let m = self.load(match_id).await?;

        if m.invited_id != responder_id {
            return Err(MatchError::Forbidden);
        }
        if m.status != MatchStatus::Pending {
            return Err(MatchError::BadRequest(ALREADY_ANSWERED.into()));
        }

        let reply = if accept {
            match photo {
                Some(bytes) if !bytes.is_empty() => MatchReply::Accepted {
                    invited_photo: B64.encode(bytes),
                },
                _ => return Err(MatchError::BadRequest(NO_PHOTO.into())),
            }
        } else {
            MatchReply::Declined
        };

        let status = reply.resulting_status();
        if !self.matches.record_reply(match_id, reply).await? {
            // Lost a race with another reply
            return Err(MatchError::BadRequest(ALREADY_ANSWERED.into()));
        }

        tracing::info!("Match {} answered by user {}: {}", match_id, responder_id, status);
        Ok(status)
    }

    /// Score both photos and complete the match, crediting the winner.
    ///
    /// The scorer is called for the creator first, then after the configured
    /// delay for the invitee. If either call fails nothing is persisted and the
    /// match stays `ready`.
    pub async fn compare_match(
        &self,
        match_id: MatchId,
        requester_id: UserId,
    ) -> Result<MatchScores, MatchError> {
        let m = self.load(match_id).await?;

        if m.creator_id != requester_id {
            return Err(MatchError::Forbidden);
        }
        if m.status != MatchStatus::Ready {
            return Err(MatchError::BadRequest(NOT_READY.into()));
        }
        let invited_photo = m
            .invited_photo
            .as_deref()
            .ok_or_else(|| MatchError::BadRequest(NOT_READY.into()))?;

        tracing::info!("Analyzing creator photo for match {}", match_id);
        let creator_score = self.score(match_id, &m.creator_photo).await?;

        if !self.inter_call_delay.is_zero() {
            tokio::time::sleep(self.inter_call_delay).await;
        }

        tracing::info!("Analyzing invited photo for match {}", match_id);
        let invited_score = self.score(match_id, invited_photo).await?;

        let outcome = resolve_outcome(&m, creator_score, invited_score);

        if !self.matches.complete_match(match_id, outcome).await? {
            // Another compare completed the match while we were scoring
            return Err(MatchError::BadRequest(NOT_READY.into()));
        }

        tracing::info!(
            "Match {} completed: creator {} vs invited {}, winner user {}",
            match_id,
            creator_score,
            invited_score,
            outcome.winner_id
        );

        Ok(MatchScores {
            creator_score,
            invited_score,
        })
    }

    /// A single match, visible only to its two participants
    pub async fn get_match(&self, match_id: MatchId, requester_id: UserId) -> Result<Match, MatchError> {
        let m = self.load(match_id).await?;
        if !m.involves(requester_id) {
            return Err(MatchError::Forbidden);
        }
        Ok(m)
    }

    pub async fn get_user_matches(&self, user_id: UserId) -> Result<Vec<Match>, MatchError> {
        Ok(self.matches.get_user_matches(user_id).await?)
    }

    /// Irreversibly delete every match the user takes part in
    pub async fn delete_user_matches(&self, user_id: UserId) -> Result<u64, MatchError> {
        Ok(self.matches.delete_user_matches(user_id).await?)
    }

    async fn load(&self, match_id: MatchId) -> Result<Match, MatchError> {
        self.matches
            .get_match(match_id)
            .await?
            .ok_or_else(|| MatchError::NotFound(NOT_FOUND.into()))
    }

    async fn score(&self, match_id: MatchId, photo: &str) -> Result<f64, MatchError> {
        self.scorer.analyze_face(photo).await.map_err(|e| {
            tracing::error!("Face analysis failed for match {}: {}", match_id, e);
            MatchError::Scorer(e)
        })
    }
}
