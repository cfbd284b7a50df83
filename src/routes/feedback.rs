use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::auth::AuthUser;
use crate::error::AppError;
use crate::models::{FeedbackRequest, MessageResponse};
use crate::routes::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/feedback", web::post().to(submit_feedback));
}

/// POST /api/feedback
async fn submit_feedback(
    state: web::Data<AppState>,
    user: AuthUser,
    req: web::Json<FeedbackRequest>,
) -> Result<HttpResponse, AppError> {
    if req.validate().is_err() || req.feedback.trim().is_empty() {
        return Err(AppError::BadRequest("Feedback is required".into()));
    }

    state.users.save_feedback(user.id, &req.feedback).await?;
    tracing::info!("Feedback received from user {}", user.id);

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Feedback submitted successfully".to_string(),
    }))
}
