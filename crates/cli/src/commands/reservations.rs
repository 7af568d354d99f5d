//! Reservation commands.
//!
//! # Usage
//!
//! ```bash
//! lunchly reservations list 3
//! lunchly reservations show 12
//! lunchly reservations add 3 -s 2026-10-16T19:30:00Z -g 4 -n "window seat"
//! lunchly reservations update 12 -g 6
//! ```

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::info;

use lunchly::db::{CustomerRepository, ReservationRepository};
use lunchly::models::Reservation;
use lunchly::{CustomerId, GuestCountError, ReservationId};

use super::{Output, emit, reservation_line};

/// Fields to overwrite on an existing reservation; `None` keeps the current value.
#[derive(Debug, Default)]
pub struct ReservationChanges {
    pub start_at: Option<DateTime<Utc>>,
    pub guests: Option<i32>,
    pub notes: Option<String>,
}

impl ReservationChanges {
    fn apply(self, reservation: &mut Reservation) -> Result<(), GuestCountError> {
        if let Some(guests) = self.guests {
            reservation.set_num_guests(guests)?;
        }
        if let Some(start_at) = self.start_at {
            reservation.set_start_at(start_at);
        }
        if let Some(notes) = self.notes {
            reservation.set_notes(Some(notes));
        }
        Ok(())
    }
}

/// List a customer's reservations.
///
/// # Errors
///
/// Returns an error if the customer does not exist or a query fails.
pub async fn list(
    pool: &PgPool,
    customer_id: CustomerId,
    output: Output,
) -> Result<(), Box<dyn std::error::Error>> {
    let customers = CustomerRepository::new(pool);
    let customer = customers.get(customer_id).await?;
    let reservations = customers.reservations(&customer).await?;

    info!(
        customer = %customer.full_name(),
        count = reservations.len(),
        "Loaded reservations"
    );
    emit(output, &reservations, reservations.iter().map(reservation_line))?;
    Ok(())
}

/// Show one reservation.
///
/// # Errors
///
/// Returns an error if the reservation does not exist or the query fails.
pub async fn show(
    pool: &PgPool,
    id: ReservationId,
    output: Output,
) -> Result<(), Box<dyn std::error::Error>> {
    let reservation = ReservationRepository::new(pool).get(id).await?;
    emit(output, &reservation, [reservation_line(&reservation)])?;
    Ok(())
}

/// Book a table for an existing customer.
///
/// # Errors
///
/// Returns an error if the party size is invalid, the customer does not
/// exist, or the insert fails.
pub async fn add(
    pool: &PgPool,
    customer_id: CustomerId,
    start_at: DateTime<Utc>,
    guests: i32,
    notes: Option<String>,
    output: Output,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut reservation = Reservation::new(customer_id, start_at, guests, notes)?;

    // Fail with a not-found error rather than a foreign key violation.
    CustomerRepository::new(pool).get(customer_id).await?;

    ReservationRepository::new(pool)
        .save(&mut reservation)
        .await?;
    info!(id = ?reservation.id(), %customer_id, "Reservation created");
    emit(output, &reservation, [reservation_line(&reservation)])?;
    Ok(())
}

/// Apply changes to an existing reservation.
///
/// # Errors
///
/// Returns an error if the reservation does not exist, the new party size is
/// invalid, or the update fails.
pub async fn update(
    pool: &PgPool,
    id: ReservationId,
    changes: ReservationChanges,
    output: Output,
) -> Result<(), Box<dyn std::error::Error>> {
    let repo = ReservationRepository::new(pool);
    let mut reservation = repo.get(id).await?;
    changes.apply(&mut reservation)?;
    repo.save(&mut reservation).await?;
    info!(%id, "Reservation updated");
    emit(output, &reservation, [reservation_line(&reservation)])?;
    Ok(())
}
