use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use faceoff::auth::TokenIssuer;
use faceoff::config::{LoggingSettings, Settings};
use faceoff::core::{Leaderboard, MatchController, UploadPolicy};
use faceoff::error::{handle_json_payload_error, handle_path_error, handle_query_payload_error};
use faceoff::routes::{self, AppState};
use faceoff::services::{FaceScorer, FaceppClient, MatchStore, PostgresStore, UserStore};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// LOG_LEVEL and LOG_FORMAT take precedence over the config file
fn init_logging(logging: &LoggingSettings) {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| logging.format.clone());

    let filter = EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}

fn startup_error(what: &str, e: impl std::fmt::Display) -> std::io::Error {
    error!("{}: {}", what, e);
    std::io::Error::new(std::io::ErrorKind::Other, format!("{}: {}", what, e))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| startup_error("Failed to load configuration", e))?;

    init_logging(&settings.logging);

    info!("Starting Faceoff service...");

    let db_max_conn = settings.database.max_connections.unwrap_or(10);

    let store = Arc::new(
        PostgresStore::from_settings(
            &settings.database.url,
            Some(db_max_conn),
            settings.database.min_connections,
            settings.database.acquire_timeout_secs,
            settings.database.idle_timeout_secs,
        )
        .await
        .map_err(|e| startup_error("Failed to connect to PostgreSQL", e))?,
    );

    info!("PostgreSQL store initialized (max: {} connections)", db_max_conn);

    let scorer = FaceppClient::new(
        settings.scorer.endpoint.clone(),
        settings.scorer.api_key.clone(),
        settings.scorer.api_secret.clone(),
        Duration::from_secs(settings.scorer.timeout_secs),
    )
    .map_err(|e| startup_error("Failed to create Face++ client", e))?;

    if settings.scorer.api_key.is_empty() || settings.scorer.api_secret.is_empty() {
        error!("Face++ credentials are not configured; comparisons will fail");
    }

    let users: Arc<dyn UserStore> = store.clone();
    let matches: Arc<dyn MatchStore> = store;
    let scorer: Arc<dyn FaceScorer> = Arc::new(scorer);

    let controller = MatchController::new(
        matches,
        users.clone(),
        scorer,
        settings.scorer.inter_call_delay(),
    );

    info!(
        "Match controller initialized (scorer delay: {}ms)",
        settings.scorer.inter_call_delay_ms
    );

    let app_state = AppState {
        leaderboard: Leaderboard::new(
            users.clone(),
            settings.leaderboard.default_limit,
            settings.leaderboard.max_limit,
        ),
        users,
        controller,
        tokens: TokenIssuer::new(settings.auth.jwt_secret.clone(), settings.auth.token_ttl_hours),
        upload: UploadPolicy::new(settings.upload.max_photo_bytes),
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .app_data(web::PathConfig::default().error_handler(handle_path_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
