//! Lunchly - restaurant customer and reservation data layer.
//!
//! Stores customers and the parties they book, and answers the lookups the
//! front-of-house needs: full listing, id lookup, name search, and a
//! "most reservations" leaderboard.
//!
//! # Architecture
//!
//! - [`models`] - `Customer` and `Reservation` with their validation rules
//! - [`db`] - Repositories over an explicit `PgPool`; no global handle
//! - [`config`] - Connection settings from the environment
//!
//! Both entities start transient (no id) and become persisted on their first
//! save. There is no delete.
//!
//! ```rust,no_run
//! use lunchly::config::LunchlyConfig;
//! use lunchly::db::{self, CustomerRepository};
//! use lunchly::models::Customer;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let config = LunchlyConfig::from_env()?;
//! let pool = db::create_pool(&config).await?;
//! let customers = CustomerRepository::new(&pool);
//!
//! let mut ana = Customer::new("Ana", "Diaz", None, None);
//! customers.save(&mut ana).await?;
//! assert!(ana.is_persisted());
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod models;

pub use db::RepositoryError;
pub use lunchly_core::{CustomerId, GuestCount, GuestCountError, Notes, ReservationId};
