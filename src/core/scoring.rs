use crate::models::{Match, MatchOutcome};

/// Which participant of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Creator,
    Invited,
}

/// The creator wins only with a strictly greater score; a tie goes to the invitee.
pub fn decide_winner(creator_score: f64, invited_score: f64) -> Side {
    if creator_score > invited_score {
        Side::Creator
    } else {
        Side::Invited
    }
}

/// Build the completion record for a match from both photo scores
pub fn resolve_outcome(m: &Match, creator_score: f64, invited_score: f64) -> MatchOutcome {
    let winner_id = match decide_winner(creator_score, invited_score) {
        Side::Creator => m.creator_id,
        Side::Invited => m.invited_id,
    };

    MatchOutcome {
        creator_score,
        invited_score,
        winner_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MatchStatus;

    fn ready_match() -> Match {
        Match {
            id: 1,
            creator_id: 10,
            invited_id: 20,
            creator_photo: "cDE=".to_string(),
            invited_photo: Some("cDI=".to_string()),
            creator_score: None,
            invited_score: None,
            status: MatchStatus::Ready,
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_higher_score_wins() {
        assert_eq!(decide_winner(90.0, 10.0), Side::Creator);
        assert_eq!(decide_winner(10.0, 90.0), Side::Invited);
    }

    #[test]
    fn test_tie_goes_to_invitee() {
        assert_eq!(decide_winner(75.5, 75.5), Side::Invited);
        let outcome = resolve_outcome(&ready_match(), 75.5, 75.5);
        assert_eq!(outcome.winner_id, 20);
    }

    #[test]
    fn test_outcome_keeps_both_scores() {
        let outcome = resolve_outcome(&ready_match(), 80.0, 82.5);
        assert_eq!(outcome.creator_score, 80.0);
        assert_eq!(outcome.invited_score, 82.5);
        assert_eq!(outcome.winner_id, 20);
    }
}
