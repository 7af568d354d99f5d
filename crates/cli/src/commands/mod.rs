//! Subcommand implementations.
//!
//! # Environment Variables
//!
//! - `LUNCHLY_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)

pub mod customers;
pub mod migrate;
pub mod reservations;
pub mod seed;

use serde::Serialize;
use sqlx::PgPool;
use tracing::info;

use lunchly::config::LunchlyConfig;
use lunchly::db;
use lunchly::models::{Customer, Reservation};

/// How command results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    /// One human-readable line per record.
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Load configuration and open a connection pool.
///
/// # Errors
///
/// Returns an error if configuration is missing or the database is unreachable.
pub async fn connect() -> Result<PgPool, Box<dyn std::error::Error>> {
    let config = LunchlyConfig::from_env()?;
    let pool = db::create_pool(&config).await?;
    info!("Connected to database");
    Ok(pool)
}

/// Write a value as JSON or as the given text lines.
fn emit<T: Serialize>(
    output: Output,
    value: &T,
    lines: impl IntoIterator<Item = String>,
) -> Result<(), serde_json::Error> {
    #[allow(clippy::print_stdout)]
    match output {
        Output::Json => println!("{}", serde_json::to_string_pretty(value)?),
        Output::Text => {
            for line in lines {
                println!("{line}");
            }
        }
    }
    Ok(())
}

/// One-line text rendering of a customer.
fn customer_line(customer: &Customer) -> String {
    let id = customer
        .id()
        .map_or_else(|| "-".to_owned(), |id| id.to_string());
    let mut line = format!("#{id} {}", customer.full_name());
    if let Some(phone) = &customer.phone {
        line.push_str(&format!(" ({phone})"));
    }
    line
}

/// One-line text rendering of a reservation.
fn reservation_line(reservation: &Reservation) -> String {
    let id = reservation
        .id()
        .map_or_else(|| "-".to_owned(), |id| id.to_string());
    let mut line = format!(
        "#{id} {} - party of {} (customer #{})",
        reservation.formatted_start_at(),
        reservation.num_guests(),
        reservation.customer_id()
    );
    if !reservation.notes().is_empty() {
        line.push_str(&format!(" - {}", reservation.notes()));
    }
    line
}
