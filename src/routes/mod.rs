// Route exports
pub mod accounts;
pub mod feedback;
pub mod forms;
pub mod leaderboard;
pub mod matches;

use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;

use crate::auth::TokenIssuer;
use crate::core::{Leaderboard, MatchController, UploadPolicy};
use crate::models::HealthResponse;
use crate::services::UserStore;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub controller: MatchController,
    pub leaderboard: Leaderboard,
    pub tokens: TokenIssuer,
    pub upload: UploadPolicy,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health_check))
            .configure(accounts::configure)
            .configure(matches::configure)
            .configure(leaderboard::configure)
            .configure(feedback::configure),
    );
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let store_healthy = state.users.health_check().await.unwrap_or(false);

    let status = if store_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}
