//! Customer commands.
//!
//! # Usage
//!
//! ```bash
//! lunchly customers list
//! lunchly customers search an
//! lunchly customers top --limit 5
//! lunchly customers show 3
//! lunchly customers add -f Ana -l Diaz -p 555-0100
//! lunchly customers update 3 --notes "prefers patio"
//! ```

use serde::Serialize;
use sqlx::PgPool;
use tracing::info;

use lunchly::CustomerId;
use lunchly::db::CustomerRepository;
use lunchly::models::{Customer, Reservation};

use super::{Output, customer_line, emit, reservation_line};

/// Fields to overwrite on an existing customer; `None` keeps the current value.
///
/// An empty phone or notes value clears the stored field.
#[derive(Debug, Default)]
pub struct CustomerChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

impl CustomerChanges {
    fn apply(self, customer: &mut Customer) {
        if let Some(first_name) = self.first_name {
            customer.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            customer.last_name = last_name;
        }
        if let Some(phone) = self.phone {
            customer.phone = non_empty(phone);
        }
        if let Some(notes) = self.notes {
            customer.notes = non_empty(notes);
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    Some(value).filter(|v| !v.is_empty())
}

/// Customer detail view with reservations attached.
#[derive(Debug, Serialize)]
struct CustomerDetail {
    #[serde(flatten)]
    customer: Customer,
    full_name: String,
    reservations: Vec<Reservation>,
}

/// List every customer.
///
/// # Errors
///
/// Returns an error if the query fails.
pub async fn list(pool: &PgPool, output: Output) -> Result<(), Box<dyn std::error::Error>> {
    let customers = CustomerRepository::new(pool).all().await?;
    emit(output, &customers, customers.iter().map(customer_line))?;
    Ok(())
}

/// Search customers by name fragment.
///
/// # Errors
///
/// Returns an error if the query fails.
pub async fn search(
    pool: &PgPool,
    term: &str,
    output: Output,
) -> Result<(), Box<dyn std::error::Error>> {
    let customers = CustomerRepository::new(pool).search(term).await?;
    info!(term, matches = customers.len(), "Search complete");
    emit(output, &customers, customers.iter().map(customer_line))?;
    Ok(())
}

/// Show the customers with the most reservations.
///
/// # Errors
///
/// Returns an error if the query fails.
pub async fn top(
    pool: &PgPool,
    limit: i64,
    output: Output,
) -> Result<(), Box<dyn std::error::Error>> {
    let customers = CustomerRepository::new(pool).top_ranked(limit).await?;
    let lines = customers
        .iter()
        .enumerate()
        .map(|(rank, c)| format!("{:>2}. {}", rank + 1, customer_line(c)));
    emit(output, &customers, lines)?;
    Ok(())
}

/// Show one customer and their reservations.
///
/// # Errors
///
/// Returns an error if the customer does not exist or a query fails.
pub async fn show(
    pool: &PgPool,
    id: CustomerId,
    output: Output,
) -> Result<(), Box<dyn std::error::Error>> {
    let repo = CustomerRepository::new(pool);
    let customer = repo.get(id).await?;
    let reservations = repo.reservations(&customer).await?;

    let mut lines = vec![customer_line(&customer)];
    if let Some(notes) = customer.notes.as_deref().filter(|n| !n.is_empty()) {
        lines.push(format!("  notes: {notes}"));
    }
    lines.extend(
        reservations
            .iter()
            .map(|r| format!("  {}", reservation_line(r))),
    );

    let detail = CustomerDetail {
        full_name: customer.full_name(),
        customer,
        reservations,
    };
    emit(output, &detail, lines)?;
    Ok(())
}

/// Insert a new customer.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub async fn add(
    pool: &PgPool,
    mut customer: Customer,
    output: Output,
) -> Result<(), Box<dyn std::error::Error>> {
    CustomerRepository::new(pool).save(&mut customer).await?;
    info!(id = ?customer.id(), "Customer created");
    emit(output, &customer, [customer_line(&customer)])?;
    Ok(())
}

/// Apply changes to an existing customer.
///
/// # Errors
///
/// Returns an error if the customer does not exist or the update fails.
pub async fn update(
    pool: &PgPool,
    id: CustomerId,
    changes: CustomerChanges,
    output: Output,
) -> Result<(), Box<dyn std::error::Error>> {
    let repo = CustomerRepository::new(pool);
    let mut customer = repo.get(id).await?;
    changes.apply(&mut customer);
    repo.save(&mut customer).await?;
    info!(%id, "Customer updated");
    emit(output, &customer, [customer_line(&customer)])?;
    Ok(())
}
