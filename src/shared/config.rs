//! Process-wide configuration, assembled once at startup from the environment.
//!
//! Extends the teacher's inline `env::var(..).expect(..)` calls in `main.rs` into one
//! struct so every constructor takes configuration by value/reference instead of
//! reaching into the environment itself.

use std::env;
use std::fmt;
use std::time::Duration;

#[derive(Debug)]
pub enum ConfigError {
    MissingVar(&'static str),
    InvalidVar(&'static str, String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingVar(name) => write!(f, "missing required env var: {name}"),
            ConfigError::InvalidVar(name, reason) => {
                write!(f, "invalid value for env var {name}: {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn is_production(self) -> bool {
        matches!(self, Environment::Production)
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub host: String,
    pub port: String,

    pub database_url: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,

    /// Job broker; the broker itself is an external collaborator per spec §1 —
    /// this crate only needs an at-least-once enqueue/dequeue channel, backed
    /// by Redis the way the teacher already depends on it for token state.
    pub broker_redis_url: String,

    /// Identity-verifier project/credentials; black-box per spec §1. Only the
    /// shared secret used by our own JWT-shaped adapter is required in dev.
    pub identity_project: Option<String>,
    pub identity_credentials: Option<String>,
    pub jwt_secret: String,

    pub payments_secret: Option<String>,
    pub payments_webhook_secret: Option<String>,

    pub storage_endpoint: Option<String>,
    pub storage_bucket: String,
    pub storage_access_key: Option<String>,
    pub storage_secret_key: Option<String>,
    pub storage_region: Option<String>,
    pub presign_put_ttl: Duration,
    pub presign_get_ttl: Duration,

    pub chat_provider: String,
    pub embedding_provider: String,
    pub chat_api_key: Option<String>,
    pub embedding_api_key: Option<String>,
    pub speech_api_key: Option<String>,
    pub speech_fallback_api_key: Option<String>,
    pub vision_api_key: Option<String>,
    pub vision_fallback_api_key: Option<String>,

    pub enable_embeddings: bool,

    pub worker_concurrency: usize,
    pub worker_recycle_after_tasks: u32,
    pub job_hard_timeout: Duration,
    pub job_soft_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") => Environment::Production,
            _ => Environment::Development,
        };

        let database_url = require("DATABASE_URL")?;
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT").unwrap_or_else(|_| "8080".to_string());

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            if environment.is_production() {
                String::new()
            } else {
                "FAKE_JWT_SECRET_DO_NOT_USE".to_string()
            }
        });
        if environment.is_production() && jwt_secret.is_empty() {
            return Err(ConfigError::MissingVar("JWT_SECRET"));
        }

        let storage_bucket = require("STORAGE_BUCKET")?;

        Ok(Self {
            environment,
            host,
            port,
            db_max_connections: parse_or("DB_MAX_CONNECTIONS", 50)?,
            db_min_connections: parse_or("DB_MIN_CONNECTIONS", 10)?,
            database_url,
            broker_redis_url: env::var("BROKER_URL")
                .unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string()),
            identity_project: env::var("IDENTITY_PROJECT").ok(),
            identity_credentials: env::var("IDENTITY_CREDENTIALS").ok(),
            jwt_secret,
            payments_secret: env::var("PAYMENTS_SECRET").ok(),
            payments_webhook_secret: env::var("PAYMENTS_WEBHOOK_SECRET").ok(),
            storage_endpoint: env::var("STORAGE_ENDPOINT").ok(),
            storage_bucket,
            storage_access_key: env::var("STORAGE_ACCESS_KEY").ok(),
            storage_secret_key: env::var("STORAGE_SECRET_KEY").ok(),
            storage_region: env::var("STORAGE_REGION").ok(),
            presign_put_ttl: Duration::from_secs(parse_or("PRESIGN_PUT_TTL_SECS", 600)?),
            presign_get_ttl: Duration::from_secs(parse_or("PRESIGN_GET_TTL_SECS", 3600)?),
            chat_provider: env::var("AI_PROVIDER").unwrap_or_else(|_| "openai".to_string()),
            embedding_provider: env::var("EMBEDDING_PROVIDER")
                .unwrap_or_else(|_| "openai".to_string()),
            chat_api_key: env::var("CHAT_API_KEY").ok(),
            embedding_api_key: env::var("EMBEDDING_API_KEY").ok(),
            speech_api_key: env::var("SPEECH_API_KEY").ok(),
            speech_fallback_api_key: env::var("SPEECH_FALLBACK_API_KEY").ok(),
            vision_api_key: env::var("VISION_API_KEY").ok(),
            vision_fallback_api_key: env::var("VISION_FALLBACK_API_KEY").ok(),
            enable_embeddings: parse_or("ENABLE_EMBEDDINGS", true)?,
            worker_concurrency: parse_or("WORKER_CONCURRENCY", 4usize)?,
            worker_recycle_after_tasks: parse_or("WORKER_RECYCLE_AFTER_TASKS", 50)?,
            job_hard_timeout: Duration::from_secs(parse_or("JOB_HARD_TIMEOUT_SECS", 30 * 60)?),
            job_soft_timeout: Duration::from_secs(parse_or("JOB_SOFT_TIMEOUT_SECS", 25 * 60)?),
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::MissingVar(name))
}

fn parse_or<T>(name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| ConfigError::InvalidVar(name, raw)),
        Err(_) => Ok(default),
    }
}
