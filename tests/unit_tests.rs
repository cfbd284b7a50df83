// Unit tests for Faceoff

use faceoff::auth::{hash_password, verify_password, TokenIssuer};
use faceoff::core::{decide_winner, resolve_outcome, Side, UploadError, UploadPolicy};
use faceoff::models::{Match, MatchReply, MatchScores, MatchStatus, User};

fn sample_match(status: MatchStatus) -> Match {
    Match {
        id: 1,
        creator_id: 100,
        invited_id: 200,
        creator_photo: "Y3JlYXRvcg==".to_string(),
        invited_photo: None,
        creator_score: None,
        invited_score: None,
        status,
        created_at: chrono::Utc::now(),
    }
}

#[test]
fn test_creator_wins_only_when_strictly_greater() {
    assert_eq!(decide_winner(82.5, 80.0), Side::Creator);
    assert_eq!(decide_winner(80.0, 82.5), Side::Invited);
    assert_eq!(decide_winner(80.0, 80.0), Side::Invited);
    assert_eq!(decide_winner(0.0, 0.0), Side::Invited);
}

#[test]
fn test_outcome_winner_ids() {
    let m = sample_match(MatchStatus::Ready);
    assert_eq!(resolve_outcome(&m, 90.0, 10.0).winner_id, 100);
    assert_eq!(resolve_outcome(&m, 10.0, 90.0).winner_id, 200);
    assert_eq!(resolve_outcome(&m, 50.0, 50.0).winner_id, 200);
}

#[test]
fn test_reply_target_status() {
    assert_eq!(MatchReply::Declined.resulting_status(), MatchStatus::Declined);
    let accepted = MatchReply::Accepted { invited_photo: "cA==".to_string() };
    assert_eq!(accepted.resulting_status(), MatchStatus::Ready);
}

#[test]
fn test_match_participants() {
    let m = sample_match(MatchStatus::Pending);
    assert!(m.involves(100));
    assert!(m.involves(200));
    assert!(!m.involves(300));
}

#[test]
fn test_scores_json_shape() {
    let scores = MatchScores { creator_score: 80.0, invited_score: 82.5 };
    let json = serde_json::to_value(scores).unwrap();
    assert_eq!(json, serde_json::json!({ "creatorScore": 80.0, "invitedScore": 82.5 }));
}

#[test]
fn test_match_json_uses_lowercase_status() {
    let json = serde_json::to_value(sample_match(MatchStatus::Completed)).unwrap();
    assert_eq!(json["status"], "completed");
    assert_eq!(json["creatorPhoto"], "Y3JlYXRvcg==");
}

#[test]
fn test_upload_policy_types() {
    let policy = UploadPolicy::new(10);
    assert!(policy.check_type("a.jpg", "image/jpeg").is_ok());
    assert!(policy.check_type("a.png", "image/png").is_ok());
    assert_eq!(policy.check_type("a.webp", "image/webp"), Err(UploadError::UnsupportedType));
    assert_eq!(policy.check_type("a.exe", "image/png"), Err(UploadError::UnsupportedType));
}

#[test]
fn test_upload_policy_size() {
    let policy = UploadPolicy::new(2 * 1024 * 1024);
    assert!(policy.check_size(2 * 1024 * 1024).is_ok());
    assert_eq!(
        policy.check_size(2 * 1024 * 1024 + 1),
        Err(UploadError::TooLarge { limit_mb: 2 })
    );
}

#[test]
fn test_password_hashes_are_salted() {
    let a = hash_password("same password").unwrap();
    let b = hash_password("same password").unwrap();
    assert_ne!(a, b);
    assert!(verify_password("same password", &a).is_ok());
    assert!(verify_password("same password", &b).is_ok());
}

#[test]
fn test_session_token_round_trip() {
    let issuer = TokenIssuer::new("unit-secret", 24);
    let user = User {
        id: 5,
        username: "bob".to_string(),
        password_hash: String::new(),
        score: 0,
    };

    let claims = issuer.verify(&issuer.issue(&user).unwrap()).unwrap();
    assert_eq!(claims.sub, 5);
    assert_eq!(claims.username, "bob");
    assert!(issuer.verify("garbage").is_err());
}
