//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_DATABASE_URL, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, DEFAULT_SESSION_TTL_HOURS,
    DEFAULT_WEATHER_BASE_URL, DEFAULT_WEATHER_TIMEOUT_SECS, DEV_SECRET_KEY,
    MIN_SECRET_KEY_LENGTH,
};
use crate::errors::{AppError, AppResult};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    secret_key: String,
    pub session_ttl_hours: i64,
    weather_api_key: Option<String>,
    pub weather_base_url: String,
    pub weather_timeout_secs: u64,
    pub server_host: String,
    pub server_port: u16,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("secret_key", &"[REDACTED]")
            .field("session_ttl_hours", &self.session_ttl_hours)
            .field(
                "weather_api_key",
                &self.weather_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("weather_base_url", &self.weather_base_url)
            .field("weather_timeout_secs", &self.weather_timeout_secs)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    /// Fails if SECRET_KEY is shorter than the minimum length.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let secret_key = env::var("SECRET_KEY").unwrap_or_else(|_| {
            tracing::warn!("SECRET_KEY not set, using insecure development default");
            DEV_SECRET_KEY.to_string()
        });

        let weather_api_key = env::var("WEATHER_API_KEY")
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            secret_key,
            session_ttl_hours: env::var("SESSION_TTL_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SESSION_TTL_HOURS),
            weather_api_key,
            weather_base_url: env::var("WEATHER_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_WEATHER_BASE_URL.to_string()),
            weather_timeout_secs: env::var("WEATHER_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_WEATHER_TIMEOUT_SECS),
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
        }
        .validated()
    }

    /// Build a configuration for tests and embedding, bypassing the environment.
    pub fn new(database_url: impl Into<String>, secret_key: impl Into<String>) -> AppResult<Self> {
        Self {
            database_url: database_url.into(),
            secret_key: secret_key.into(),
            session_ttl_hours: DEFAULT_SESSION_TTL_HOURS,
            weather_api_key: None,
            weather_base_url: DEFAULT_WEATHER_BASE_URL.to_string(),
            weather_timeout_secs: DEFAULT_WEATHER_TIMEOUT_SECS,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
        }
        .validated()
    }

    /// Replace the weather API credential.
    pub fn with_weather_api_key(mut self, key: Option<String>) -> Self {
        self.weather_api_key = key;
        self
    }

    fn validated(self) -> AppResult<Self> {
        if self.secret_key.len() < MIN_SECRET_KEY_LENGTH {
            return Err(AppError::internal(format!(
                "SECRET_KEY must be at least {} characters long",
                MIN_SECRET_KEY_LENGTH
            )));
        }
        Ok(self)
    }

    /// Get secret bytes for session token signing/verification.
    pub fn secret_key_bytes(&self) -> &[u8] {
        self.secret_key.as_bytes()
    }

    /// Weather API credential, if one is configured.
    pub fn weather_api_key(&self) -> Option<&str> {
        self.weather_api_key.as_deref()
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
