//! Database operations for the Lunchly `PostgreSQL` store.
//!
//! ## Tables
//!
//! - `customers` - People who can book a table
//! - `reservations` - Booked parties, each referencing one customer
//!
//! Queries alias snake_case columns to camelCase names (`firstName`,
//! `customerId`, `numGuests`, `startAt`) and the row types decode by those
//! aliases.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/lunchly/migrations/` and run via:
//! ```bash
//! cargo run -p lunchly-cli -- migrate
//! ```

pub mod customers;
pub mod reservations;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use lunchly_core::GuestCountError;

use crate::config::LunchlyConfig;

pub use customers::{CustomerRepository, DEFAULT_TOP_LIMIT};
pub use reservations::ReservationRepository;

/// Embedded schema migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Requested entity was not found.
    #[error("No such {entity}: {id}")]
    NotFound {
        /// Entity kind, e.g. `"customer"`.
        entity: &'static str,
        /// The id that was looked up.
        id: i32,
    },

    /// The record has never been saved, so there is no row to look up from.
    #[error("{entity} has not been saved yet")]
    NotPersisted {
        /// Entity kind, e.g. `"customer"`.
        entity: &'static str,
    },

    /// A value failed domain validation.
    #[error("validation error: {0}")]
    Validation(#[from] GuestCountError),

    /// Database error from sqlx, passed through unchanged.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl RepositoryError {
    /// HTTP-style status for callers that surface errors to users.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } | Self::NotPersisted { .. } => 404,
            Self::Validation(_) => 400,
            Self::Database(_) => 500,
        }
    }

    /// Whether this is a not-found error, including lookups on unsaved records.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::NotPersisted { .. })
    }
}

/// Create a `PostgreSQL` connection pool from configuration.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(config: &LunchlyConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(config.database_url.expose_secret())
        .await
}

/// Apply any pending schema migrations.
///
/// # Errors
///
/// Returns `MigrateError` if a migration fails or the history is inconsistent.
pub async fn migrate(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await
}
