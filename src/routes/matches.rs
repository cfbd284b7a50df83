use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};

use crate::auth::AuthUser;
use crate::error::AppError;
use crate::models::MatchId;
use crate::routes::forms::{read_photo_form, ACCEPT_FIELD, INVITED_USERNAME_FIELD};
use crate::routes::AppState;

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/matches")
            .route(web::post().to(create_match))
            .route(web::get().to(list_matches))
            .route(web::delete().to(delete_matches)),
    )
    .route("/matches/{id}", web::get().to(get_match))
    .route("/matches/{id}/respond", web::post().to(respond_to_match))
    .route("/matches/{id}/compare", web::post().to(compare_match));
}

/// Create a match
///
/// POST /api/matches (multipart: `photo`, `invitedUsername`)
async fn create_match(
    state: web::Data<AppState>,
    user: AuthUser,
    payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let form = read_photo_form(payload, &state.upload).await?;

    let photo = form
        .photo
        .as_deref()
        .ok_or_else(|| AppError::BadRequest("No photo uploaded".into()))?;
    let invited_username = form.field(INVITED_USERNAME_FIELD).unwrap_or_default();

    let created = state
        .controller
        .create_match(user.id, invited_username, photo)
        .await?;

    Ok(HttpResponse::Ok().json(created))
}

/// Accept or decline an invitation
///
/// POST /api/matches/{id}/respond (multipart: `accept` = "true"/"false", optional `photo`)
async fn respond_to_match(
    state: web::Data<AppState>,
    user: AuthUser,
    path: web::Path<MatchId>,
    payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let match_id = path.into_inner();
    let form = read_photo_form(payload, &state.upload).await?;

    let accept = form.field(ACCEPT_FIELD) == Some("true");

    state
        .controller
        .respond_to_match(match_id, user.id, accept, form.photo.as_deref())
        .await?;

    Ok(HttpResponse::Ok().finish())
}

/// Score both photos and settle the match
///
/// POST /api/matches/{id}/compare
async fn compare_match(
    state: web::Data<AppState>,
    user: AuthUser,
    path: web::Path<MatchId>,
) -> Result<HttpResponse, AppError> {
    let scores = state
        .controller
        .compare_match(path.into_inner(), user.id)
        .await?;

    Ok(HttpResponse::Ok().json(scores))
}

/// GET /api/matches
async fn list_matches(
    state: web::Data<AppState>,
    user: AuthUser,
) -> Result<HttpResponse, AppError> {
    let matches = state.controller.get_user_matches(user.id).await?;
    Ok(HttpResponse::Ok().json(matches))
}

/// DELETE /api/matches
async fn delete_matches(
    state: web::Data<AppState>,
    user: AuthUser,
) -> Result<HttpResponse, AppError> {
    let deleted = state.controller.delete_user_matches(user.id).await?;
    tracing::info!("User {} deleted {} matches", user.id, deleted);
    Ok(HttpResponse::Ok().finish())
}

/// GET /api/matches/{id}
async fn get_match(
    state: web::Data<AppState>,
    user: AuthUser,
    path: web::Path<MatchId>,
) -> Result<HttpResponse, AppError> {
    let found = state.controller.get_match(path.into_inner(), user.id).await?;
    Ok(HttpResponse::Ok().json(found))
}
