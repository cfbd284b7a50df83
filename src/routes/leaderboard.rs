use actix_web::{web, HttpResponse};

use crate::error::AppError;
use crate::models::LeaderboardQuery;
use crate::routes::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/leaderboard", web::get().to(get_leaderboard));
}

/// Users ranked by wins; no session required
///
/// GET /api/leaderboard?limit=N
async fn get_leaderboard(
    state: web::Data<AppState>,
    query: web::Query<LeaderboardQuery>,
) -> Result<HttpResponse, AppError> {
    let entries = state.leaderboard.top(query.limit).await?;
    Ok(HttpResponse::Ok().json(entries))
}
