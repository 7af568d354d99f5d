//! Lunchly Core - Shared types library.
//!
//! This crate provides the domain types used across Lunchly components:
//! - `lunchly` - Customer and reservation data layer
//! - `lunchly-cli` - Command-line tools for migrations and management
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access. Enable the
//! `postgres` feature to bind these types directly in sqlx queries.
//!
//! # Modules
//!
//! - [`types`] - Typed IDs, the validated guest count, and normalized notes

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
