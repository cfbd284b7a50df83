use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::auth::{hash_password, verify_password, AuthUser};
use crate::error::AppError;
use crate::models::{AuthResponse, LoginRequest, RegisterRequest, UserSummary};
use crate::routes::AppState;
use crate::services::StoreError;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/register", web::post().to(register))
        .route("/login", web::post().to(login))
        .route("/user", web::get().to(current_user));
}

/// Register endpoint
///
/// POST /api/register
///
/// Request body:
/// ```json
/// { "username": "alice", "password": "secret", "acceptPolicy": true }
/// ```
async fn register(
    state: web::Data<AppState>,
    req: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    if let Err(errors) = req.validate() {
        return Err(AppError::BadRequest(errors.to_string()));
    }
    if !req.accept_policy {
        return Err(AppError::BadRequest("You must accept the privacy policy".into()));
    }

    let password_hash = hash_password(&req.password)?;

    let user = state
        .users
        .create_user(&req.username, &password_hash)
        .await
        .map_err(|e| match e {
            StoreError::Conflict(_) => AppError::BadRequest("Username already exists".into()),
            other => other.into(),
        })?;

    tracing::info!("Registered user {} ({})", user.id, user.username);

    let token = state.tokens.issue(&user)?;
    Ok(HttpResponse::Created().json(AuthResponse {
        user: UserSummary::from(&user),
        token,
    }))
}

/// POST /api/login
async fn login(
    state: web::Data<AppState>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    if let Err(errors) = req.validate() {
        return Err(AppError::BadRequest(errors.to_string()));
    }

    let user = state
        .users
        .get_user_by_username(&req.username)
        .await?
        .ok_or(AppError::Unauthenticated)?;

    verify_password(&req.password, &user.password_hash)?;

    let token = state.tokens.issue(&user)?;
    Ok(HttpResponse::Ok().json(AuthResponse {
        user: UserSummary::from(&user),
        token,
    }))
}

/// GET /api/user
async fn current_user(
    state: web::Data<AppState>,
    auth: AuthUser,
) -> Result<HttpResponse, AppError> {
    // A token can outlive its account
    let user = state
        .users
        .get_user(auth.id)
        .await?
        .ok_or(AppError::Unauthenticated)?;

    Ok(HttpResponse::Ok().json(UserSummary::from(&user)))
}
