//! Data layer configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `LUNCHLY_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//!
//! ## Optional
//! - `LUNCHLY_DB_MAX_CONNECTIONS` - Pool ceiling (default: 10)
//! - `LUNCHLY_DB_MIN_CONNECTIONS` - Idle connections kept open (default: 2)
//! - `LUNCHLY_DB_ACQUIRE_TIMEOUT_SECS` - Seconds to wait for a pooled connection (default: 10)

use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

const DATABASE_URL_KEY: &str = "LUNCHLY_DATABASE_URL";
const FALLBACK_DATABASE_URL_KEY: &str = "DATABASE_URL";
const MAX_CONNECTIONS_KEY: &str = "LUNCHLY_DB_MAX_CONNECTIONS";
const MIN_CONNECTIONS_KEY: &str = "LUNCHLY_DB_MIN_CONNECTIONS";
const ACQUIRE_TIMEOUT_KEY: &str = "LUNCHLY_DB_ACQUIRE_TIMEOUT_SECS";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Connection settings for the reservation store.
#[derive(Clone)]
pub struct LunchlyConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// Maximum number of pooled connections
    pub max_connections: u32,
    /// Minimum number of idle connections
    pub min_connections: u32,
    /// How long to wait for a connection before failing
    pub acquire_timeout: Duration,
}

impl std::fmt::Debug for LunchlyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LunchlyConfig")
            .field("database_url", &"[REDACTED]")
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("acquire_timeout", &self.acquire_timeout)
            .finish()
    }
}

impl LunchlyConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the database URL is missing or a numeric
    /// setting does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// See [`LunchlyConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup(DATABASE_URL_KEY)
            .or_else(|| lookup(FALLBACK_DATABASE_URL_KEY))
            .map(SecretString::from)
            .ok_or_else(|| ConfigError::MissingEnvVar(DATABASE_URL_KEY.to_string()))?;

        let max_connections = parse_or_default(&lookup, MAX_CONNECTIONS_KEY, 10)?;
        let min_connections = parse_or_default(&lookup, MIN_CONNECTIONS_KEY, 2)?;
        let acquire_timeout_secs = parse_or_default(&lookup, ACQUIRE_TIMEOUT_KEY, 10)?;

        if min_connections > max_connections {
            return Err(ConfigError::InvalidEnvVar(
                MIN_CONNECTIONS_KEY.to_string(),
                format!("must not exceed {MAX_CONNECTIONS_KEY} ({max_connections})"),
            ));
        }

        Ok(Self {
            database_url,
            max_connections,
            min_connections,
            acquire_timeout: Duration::from_secs(acquire_timeout_secs),
        })
    }
}

/// Parse an optional variable, falling back to `default` when unset.
fn parse_or_default<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key).map_or(Ok(default), |raw| {
        raw.trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}
