//! Core types for Lunchly.
//!
//! This module provides type-safe wrappers for the reservation domain.

pub mod guests;
pub mod id;
pub mod notes;

pub use guests::{GuestCount, GuestCountError};
pub use id::*;
pub use notes::Notes;
