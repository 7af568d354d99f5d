//! Domain models for customers and their reservations.
//!
//! These types hold validated in-memory state. Row types used to decode query
//! results stay crate-private; the repositories in [`crate::db`] convert them.

pub mod customer;
pub mod reservation;

pub use customer::Customer;
pub use reservation::Reservation;
