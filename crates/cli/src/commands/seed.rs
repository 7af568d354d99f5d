//! Seed the database with demo customers and reservations.
//!
//! Seeding is skipped when any customer already exists, so running it twice
//! does not duplicate rows.

use chrono::{DateTime, Duration, TimeZone, Utc};
use tracing::info;

use lunchly::db::{CustomerRepository, ReservationRepository};
use lunchly::models::{Customer, Reservation};

/// A demo customer and the reservations they hold.
struct SeedCustomer {
    first_name: &'static str,
    last_name: &'static str,
    phone: Option<&'static str>,
    notes: Option<&'static str>,
    /// (days after the base date, hour, guests, notes)
    reservations: &'static [(i64, u32, i32, &'static str)],
}

const SEED_CUSTOMERS: &[SeedCustomer] = &[
    SeedCustomer {
        first_name: "Ana",
        last_name: "Diaz",
        phone: Some("555-0100"),
        notes: Some("Allergic to shellfish"),
        reservations: &[(0, 19, 2, ""), (7, 20, 4, "Anniversary"), (14, 18, 2, "")],
    },
    SeedCustomer {
        first_name: "Bo",
        last_name: "Chen",
        phone: Some("555-0101"),
        notes: None,
        reservations: &[(3, 12, 6, "High chair"), (10, 13, 5, "")],
    },
    SeedCustomer {
        first_name: "Carla",
        last_name: "Okafor",
        phone: None,
        notes: Some("Prefers the patio"),
        reservations: &[(5, 19, 3, "Patio if possible")],
    },
    SeedCustomer {
        first_name: "Dmitri",
        last_name: "Anand",
        phone: Some("555-0103"),
        notes: None,
        reservations: &[],
    },
];

/// Insert the demo data set.
///
/// # Errors
///
/// Returns an error if the database is unreachable or an insert fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;
    let customers = CustomerRepository::new(&pool);
    let reservations = ReservationRepository::new(&pool);

    if !customers.all().await?.is_empty() {
        info!("Customers already present, skipping seed");
        return Ok(());
    }

    let base = base_date();
    let mut inserted_reservations = 0_usize;

    for seed in SEED_CUSTOMERS {
        let mut customer = Customer::new(
            seed.first_name,
            seed.last_name,
            seed.phone.map(str::to_owned),
            seed.notes.map(str::to_owned),
        );
        customers.save(&mut customer).await?;

        let Some(customer_id) = customer.id() else {
            continue;
        };

        for &(days, hour, guests, notes) in seed.reservations {
            let start_at = base + Duration::days(days) + Duration::hours(i64::from(hour));
            let mut reservation =
                Reservation::new(customer_id, start_at, guests, Some(notes.to_owned()))?;
            reservations.save(&mut reservation).await?;
            inserted_reservations += 1;
        }
    }

    info!("Seeding complete!");
    info!("  Customers inserted: {}", SEED_CUSTOMERS.len());
    info!("  Reservations inserted: {inserted_reservations}");
    Ok(())
}

/// Midnight UTC of the first day of the seeded calendar.
fn base_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 11, 1, 0, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

#[cfg(test)]
mod tests {
    use lunchly::GuestCount;

    use super::*;

    #[test]
    fn test_seed_parties_are_valid() {
        for seed in SEED_CUSTOMERS {
            for &(_, hour, guests, _) in seed.reservations {
                assert!(GuestCount::new(guests).is_ok(), "{} {}", seed.first_name, guests);
                assert!(hour < 24);
            }
        }
    }

    #[test]
    fn test_seed_includes_customer_without_reservations() {
        assert!(SEED_CUSTOMERS.iter().any(|s| s.reservations.is_empty()));
    }
}
