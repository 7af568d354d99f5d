//! Customer repository for database operations.
//!
//! Queries are checked at runtime (`query_as` + `bind`) so the crate builds
//! without a live database.

use sqlx::PgPool;
use tracing::{debug, instrument};

use lunchly_core::CustomerId;

use super::{RepositoryError, ReservationRepository};
use crate::models::customer::{Customer, CustomerRow};
use crate::models::reservation::Reservation;

/// Number of customers returned by [`CustomerRepository::top_ten`].
pub const DEFAULT_TOP_LIMIT: i64 = 10;

/// Repository for customer database operations.
pub struct CustomerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CustomerRepository<'a> {
    /// Create a new customer repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get all customers, ordered by last name then first name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn all(&self) -> Result<Vec<Customer>, RepositoryError> {
        let rows: Vec<CustomerRow> = sqlx::query_as(
            r#"
            SELECT id,
                   first_name AS "firstName",
                   last_name  AS "lastName",
                   phone,
                   notes
            FROM customers
            ORDER BY last_name, first_name
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Customer::from).collect())
    }

    /// Get a customer by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no customer has this id.
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn get(&self, id: CustomerId) -> Result<Customer, RepositoryError> {
        let row: Option<CustomerRow> = sqlx::query_as(
            r#"
            SELECT id,
                   first_name AS "firstName",
                   last_name  AS "lastName",
                   phone,
                   notes
            FROM customers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(Customer::from).ok_or(RepositoryError::NotFound {
            entity: "customer",
            id: id.as_i32(),
        })
    }

    /// Find customers whose first or last name contains `term`, ignoring case.
    ///
    /// The term is wrapped in `%` wildcards, so an empty term matches every
    /// customer.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn search(&self, term: &str) -> Result<Vec<Customer>, RepositoryError> {
        let rows: Vec<CustomerRow> = sqlx::query_as(
            r#"
            SELECT id,
                   first_name AS "firstName",
                   last_name  AS "lastName",
                   phone,
                   notes
            FROM customers
            WHERE first_name ILIKE $1 OR last_name ILIKE $1
            ORDER BY last_name, first_name
            "#,
        )
        .bind(search_pattern(term))
        .fetch_all(self.pool)
        .await?;

        debug!(matches = rows.len(), "Customer search complete");
        Ok(rows.into_iter().map(Customer::from).collect())
    }

    /// Get up to `limit` customers ranked by how many reservations they hold.
    ///
    /// Customers without reservations never appear. Ties are broken by
    /// customer id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn top_ranked(&self, limit: i64) -> Result<Vec<Customer>, RepositoryError> {
        let rows: Vec<CustomerRow> = sqlx::query_as(
            r#"
            SELECT c.id,
                   c.first_name AS "firstName",
                   c.last_name  AS "lastName",
                   c.phone,
                   c.notes,
                   COUNT(*)     AS "reservationCount"
            FROM reservations r
            JOIN customers c ON r.customer_id = c.id
            GROUP BY c.id, c.first_name, c.last_name, c.phone, c.notes
            ORDER BY COUNT(*) DESC, c.id
            LIMIT $1
            "#,
        )
        .bind(limit.max(0))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Customer::from).collect())
    }

    /// Get the ten customers with the most reservations.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn top_ten(&self) -> Result<Vec<Customer>, RepositoryError> {
        self.top_ranked(DEFAULT_TOP_LIMIT).await
    }

    /// Get all reservations for this customer.
    ///
    /// A transient customer has no reservations.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Validation` if a stored row is invalid.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn reservations(
        &self,
        customer: &Customer,
    ) -> Result<Vec<Reservation>, RepositoryError> {
        let Some(id) = customer.id() else {
            return Ok(Vec::new());
        };
        ReservationRepository::new(self.pool).for_customer(id).await
    }

    /// Get this customer's reservation with the latest start time.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotPersisted` if the customer is transient.
    /// Returns `RepositoryError::NotFound` if the customer has no reservations.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn most_recent_reservation(
        &self,
        customer: &Customer,
    ) -> Result<Reservation, RepositoryError> {
        let Some(id) = customer.id() else {
            return Err(RepositoryError::NotPersisted { entity: "customer" });
        };
        ReservationRepository::new(self.pool)
            .most_recent_for_customer(id)
            .await
    }

    /// Insert a transient customer or update a persisted one.
    ///
    /// An insert captures the generated id on `customer`. Every call on a
    /// transient customer inserts a new row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if an update matches no row.
    /// Returns `RepositoryError::Database` if the statement fails.
    #[instrument(skip(self, customer), fields(id = ?customer.id()))]
    pub async fn save(&self, customer: &mut Customer) -> Result<(), RepositoryError> {
        match customer.id() {
            None => {
                let (id,): (i32,) = sqlx::query_as(
                    r"
                    INSERT INTO customers (first_name, last_name, phone, notes)
                    VALUES ($1, $2, $3, $4)
                    RETURNING id
                    ",
                )
                .bind(&customer.first_name)
                .bind(&customer.last_name)
                .bind(&customer.phone)
                .bind(&customer.notes)
                .fetch_one(self.pool)
                .await?;

                customer.assign_id(CustomerId::new(id));
                debug!(id, "Inserted customer");
            }
            Some(id) => {
                let result = sqlx::query(
                    r"
                    UPDATE customers
                    SET first_name = $1,
                        last_name = $2,
                        phone = $3,
                        notes = $4
                    WHERE id = $5
                    ",
                )
                .bind(&customer.first_name)
                .bind(&customer.last_name)
                .bind(&customer.phone)
                .bind(&customer.notes)
                .bind(id)
                .execute(self.pool)
                .await?;

                if result.rows_affected() == 0 {
                    return Err(RepositoryError::NotFound {
                        entity: "customer",
                        id: id.as_i32(),
                    });
                }

                debug!(%id, "Updated customer");
            }
        }

        Ok(())
    }
}

/// Wrap a search term in `ILIKE` wildcards.
fn search_pattern(term: &str) -> String {
    format!("%{term}%")
}
