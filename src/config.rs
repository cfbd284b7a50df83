use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub scorer: ScorerSettings,
    pub auth: AuthSettings,
    #[serde(default)]
    pub upload: UploadSettings,
    #[serde(default)]
    pub leaderboard: LeaderboardSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

/// Face++ credentials and call pacing
#[derive(Debug, Clone, Deserialize)]
pub struct ScorerSettings {
    #[serde(default = "default_scorer_endpoint")]
    pub endpoint: String,
    pub api_key: String,
    pub api_secret: String,
    #[serde(default = "default_scorer_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_inter_call_delay")]
    pub inter_call_delay_ms: u64,
}

impl ScorerSettings {
    pub fn inter_call_delay(&self) -> Duration {
        Duration::from_millis(self.inter_call_delay_ms)
    }
}

fn default_scorer_endpoint() -> String {
    "https://api-us.faceplusplus.com/facepp/v3/detect".to_string()
}
fn default_scorer_timeout() -> u64 { 30 }
fn default_inter_call_delay() -> u64 { 500 }

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl")]
    pub token_ttl_hours: i64,
}

fn default_token_ttl() -> i64 { 24 * 30 }

#[derive(Debug, Clone, Deserialize)]
pub struct UploadSettings {
    #[serde(default = "default_max_photo_bytes")]
    pub max_photo_bytes: usize,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            max_photo_bytes: default_max_photo_bytes(),
        }
    }
}

fn default_max_photo_bytes() -> usize { 50 * 1024 * 1024 }

#[derive(Debug, Clone, Deserialize)]
pub struct LeaderboardSettings {
    #[serde(default = "default_leaderboard_limit")]
    pub default_limit: u32,
    #[serde(default = "default_leaderboard_max")]
    pub max_limit: u32,
}

impl Default for LeaderboardSettings {
    fn default() -> Self {
        Self {
            default_limit: default_leaderboard_limit(),
            max_limit: default_leaderboard_max(),
        }
    }
}

fn default_leaderboard_limit() -> u32 { 100 }
fn default_leaderboard_max() -> u32 { 1000 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with FACEOFF_)
    /// 4. Well-known deployment variables (DATABASE_URL, FACEPP_API_KEY, ...)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            // Local overrides for development
            .add_source(File::with_name("config/local").required(false))
            // e.g., FACEOFF__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("FACEOFF")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = apply_deployment_overrides(settings)?;

        settings.try_deserialize()
    }
}

/// Layer the conventional deployment variables on top of the parsed config
fn apply_deployment_overrides(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    const OVERRIDES: [(&str, &str); 4] = [
        ("DATABASE_URL", "database.url"),
        ("FACEPP_API_KEY", "scorer.api_key"),
        ("FACEPP_API_SECRET", "scorer.api_secret"),
        ("SESSION_SECRET", "auth.jwt_secret"),
    ];

    let mut builder = Config::builder().add_source(settings);

    for (var, key) in OVERRIDES {
        if let Ok(value) = env::var(var) {
            builder = builder.set_override(key, value)?;
        }
    }

    builder.build()
}
