//! Reservation repository for database operations.
//!
//! Queries are checked at runtime (`query_as` + `bind`) so the crate builds
//! without a live database.

use sqlx::PgPool;
use tracing::{debug, instrument};

use lunchly_core::{CustomerId, ReservationId};

use super::RepositoryError;
use crate::models::reservation::{Reservation, ReservationRow};

/// Repository for reservation database operations.
pub struct ReservationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ReservationRepository<'a> {
    /// Create a new reservation repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a reservation by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no reservation has this id.
    /// Returns `RepositoryError::Validation` if the stored row is invalid.
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn get(&self, id: ReservationId) -> Result<Reservation, RepositoryError> {
        let row: Option<ReservationRow> = sqlx::query_as(
            r#"
            SELECT id,
                   customer_id AS "customerId",
                   num_guests  AS "numGuests",
                   start_at    AS "startAt",
                   notes
            FROM reservations
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        let row = row.ok_or(RepositoryError::NotFound {
            entity: "reservation",
            id: id.as_i32(),
        })?;

        Ok(Reservation::try_from(row)?)
    }

    /// Get every reservation belonging to a customer.
    ///
    /// A customer with no reservations yields an empty list. Order is
    /// whatever the store returns.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Validation` if a stored row is invalid.
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Reservation>, RepositoryError> {
        let rows: Vec<ReservationRow> = sqlx::query_as(
            r#"
            SELECT id,
                   customer_id AS "customerId",
                   num_guests  AS "numGuests",
                   start_at    AS "startAt",
                   notes       AS "notes"
            FROM reservations
            WHERE customer_id = $1
            "#,
        )
        .bind(customer_id)
        .fetch_all(self.pool)
        .await?;

        debug!(count = rows.len(), "Loaded reservations for customer");

        rows.into_iter()
            .map(|row| Reservation::try_from(row).map_err(RepositoryError::from))
            .collect()
    }

    /// Get the reservation with the latest start time for a customer.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the customer has no reservations.
    /// Returns `RepositoryError::Validation` if the stored row is invalid.
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn most_recent_for_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Reservation, RepositoryError> {
        let row: Option<ReservationRow> = sqlx::query_as(
            r#"
            SELECT id,
                   customer_id AS "customerId",
                   num_guests  AS "numGuests",
                   start_at    AS "startAt",
                   notes       AS "notes"
            FROM reservations
            WHERE customer_id = $1
            ORDER BY start_at DESC
            LIMIT 1
            "#,
        )
        .bind(customer_id)
        .fetch_optional(self.pool)
        .await?;

        let row = row.ok_or(RepositoryError::NotFound {
            entity: "reservation for customer",
            id: customer_id.as_i32(),
        })?;

        Ok(Reservation::try_from(row)?)
    }

    /// Insert a transient reservation or update a persisted one.
    ///
    /// An insert writes `customer_id` and captures the generated id. An
    /// update rewrites only `start_at`, `num_guests` and `notes`; the
    /// customer link is never changed after creation.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if an update matches no row.
    /// Returns `RepositoryError::Database` if the statement fails (for
    /// example an unknown customer id).
    #[instrument(skip(self, reservation), fields(id = ?reservation.id(), customer_id = %reservation.customer_id()))]
    pub async fn save(&self, reservation: &mut Reservation) -> Result<(), RepositoryError> {
        match reservation.id() {
            None => {
                let (id,): (i32,) = sqlx::query_as(
                    r"
                    INSERT INTO reservations (customer_id, start_at, num_guests, notes)
                    VALUES ($1, $2, $3, $4)
                    RETURNING id
                    ",
                )
                .bind(reservation.customer_id())
                .bind(reservation.start_at())
                .bind(reservation.guest_count())
                .bind(reservation.notes_value())
                .fetch_one(self.pool)
                .await?;

                reservation.assign_id(ReservationId::new(id));
                debug!(id, "Inserted reservation");
            }
            Some(id) => {
                let result = sqlx::query(
                    r"
                    UPDATE reservations
                    SET start_at = $1,
                        num_guests = $2,
                        notes = $3
                    WHERE id = $4
                    ",
                )
                .bind(reservation.start_at())
                .bind(reservation.guest_count())
                .bind(reservation.notes_value())
                .bind(id)
                .execute(self.pool)
                .await?;

                if result.rows_affected() == 0 {
                    return Err(RepositoryError::NotFound {
                        entity: "reservation",
                        id: id.as_i32(),
                    });
                }

                debug!(%id, "Updated reservation");
            }
        }

        Ok(())
    }
}
