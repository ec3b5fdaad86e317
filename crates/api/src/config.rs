//! Application configuration

use std::env;

use storefront_auth::TokenLifetimes;
use time::Duration;

const MIN_SECRET_LEN: usize = 32;
const DEFAULT_SESSION_TTL_SECS: i64 = 2 * 60 * 60;
const MAX_TTL_SECS: i64 = 10 * 366 * 24 * 60 * 60;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Configuration loaded from environment variables
#[derive(Clone)]
pub struct Config {
    // Server
    pub bind_address: String,
    pub log_format: LogFormat,

    // Database
    pub database_url: String,
    pub database_max_connections: u32,

    // Authentication
    pub jwt_secret: String,
    pub session_ttl_secs: i64,
    pub refresh_ttl_secs: i64,
    pub token_leeway_secs: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let (session_ttl_secs, refresh_ttl_secs) = ttl_secs_from_env()?;

        Ok(Self {
            bind_address: env::var("BIND_ADDRESS")
                .unwrap_or_else(|_| "127.0.0.1:8002".to_string()),
            log_format: match env::var("LOG_FORMAT").as_deref() {
                Ok("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },

            database_url: env::var("DATABASE_URL")
                .map_err(|_| ConfigError::Missing("DATABASE_URL"))?,
            database_max_connections: match env::var("DATABASE_MAX_CONNECTIONS") {
                Ok(raw) => match raw.parse::<u32>() {
                    Ok(n) if n > 0 => n,
                    _ => return Err(ConfigError::Invalid("DATABASE_MAX_CONNECTIONS")),
                },
                Err(_) => DEFAULT_MAX_CONNECTIONS,
            },

            jwt_secret: jwt_secret_from_env()?,
            session_ttl_secs,
            refresh_ttl_secs,
            token_leeway_secs: match env::var("TOKEN_LEEWAY_SECS") {
                Ok(raw) => raw
                    .parse()
                    .map_err(|_| ConfigError::Invalid("TOKEN_LEEWAY_SECS"))?,
                Err(_) => 0,
            },
        })
    }

    pub fn token_lifetimes(&self) -> TokenLifetimes {
        TokenLifetimes {
            session_ttl: Duration::seconds(self.session_ttl_secs),
            refresh_ttl: Duration::seconds(self.refresh_ttl_secs),
        }
    }
}

/// Read and check `JWT_SECRET` on its own, for tools that only need to sign.
pub fn jwt_secret_from_env() -> Result<String, ConfigError> {
    let secret = env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?;
    if secret.len() < MIN_SECRET_LEN {
        return Err(ConfigError::WeakSecret(
            "JWT_SECRET must be at least 32 characters",
        ));
    }
    Ok(secret)
}

/// `(SESSION_TTL_SECS, REFRESH_TTL_SECS)`. The refresh TTL defaults to the
/// session TTL. Both must lie in `1..=MAX_TTL_SECS` (ten years).
pub fn ttl_secs_from_env() -> Result<(i64, i64), ConfigError> {
    let session = positive_secs("SESSION_TTL_SECS", DEFAULT_SESSION_TTL_SECS)?;
    let refresh = positive_secs("REFRESH_TTL_SECS", session)?;
    Ok((session, refresh))
}

fn positive_secs(name: &'static str, default: i64) -> Result<i64, ConfigError> {
    let Ok(raw) = env::var(name) else {
        return Ok(default);
    };
    match raw.parse::<i64>() {
        Ok(secs) if (1..=MAX_TTL_SECS).contains(&secs) => Ok(secs),
        _ => Err(ConfigError::Invalid(name)),
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("bind_address", &self.bind_address)
            .field("log_format", &self.log_format)
            .field("database_max_connections", &self.database_max_connections)
            .field("session_ttl_secs", &self.session_ttl_secs)
            .field("refresh_ttl_secs", &self.refresh_ttl_secs)
            .field("token_leeway_secs", &self.token_leeway_secs)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
    #[error("Weak secret: {0}")]
    WeakSecret(&'static str),
    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
