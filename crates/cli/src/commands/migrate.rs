//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! lunchly migrate
//! ```
//!
//! # Migration Files
//!
//! Migrations live in `crates/lunchly/migrations/` and are embedded into the
//! binary at build time:
//! ```text
//! migrations/
//! ├── 20260101000001_create_customers.sql
//! └── 20260101000002_create_reservations.sql
//! ```

use tracing::info;

use lunchly::db;

/// Run all pending migrations.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;

    info!("Running migrations...");
    db::migrate(&pool).await?;

    info!("Migrations complete!");
    Ok(())
}
