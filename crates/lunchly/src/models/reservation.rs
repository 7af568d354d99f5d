//! Reservation domain types.

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;

use lunchly_core::{CustomerId, GuestCount, GuestCountError, Notes, ReservationId};

/// A booked party for one customer.
///
/// `customer_id` is fixed at construction. Guest count and notes can only be
/// changed through validating setters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reservation {
    id: Option<ReservationId>,
    customer_id: CustomerId,
    num_guests: GuestCount,
    start_at: DateTime<Utc>,
    notes: Notes,
}

impl Reservation {
    /// Create a new, not yet persisted reservation.
    ///
    /// # Errors
    ///
    /// Returns [`GuestCountError`] if `num_guests` is less than 1.
    pub fn new(
        customer_id: CustomerId,
        start_at: DateTime<Utc>,
        num_guests: i32,
        notes: Option<String>,
    ) -> Result<Self, GuestCountError> {
        Ok(Self {
            id: None,
            customer_id,
            num_guests: GuestCount::new(num_guests)?,
            start_at,
            notes: Notes::from_option(notes),
        })
    }

    /// Store-assigned id, `None` until the first save.
    #[must_use]
    pub const fn id(&self) -> Option<ReservationId> {
        self.id
    }

    /// Whether this reservation has a row in the store.
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// The customer this reservation belongs to.
    #[must_use]
    pub const fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    /// Party size.
    #[must_use]
    pub const fn num_guests(&self) -> i32 {
        self.num_guests.get()
    }

    /// Change the party size.
    ///
    /// # Errors
    ///
    /// Returns [`GuestCountError`] if `num_guests` is less than 1; the
    /// reservation is left unchanged.
    pub fn set_num_guests(&mut self, num_guests: i32) -> Result<(), GuestCountError> {
        self.num_guests = GuestCount::new(num_guests)?;
        Ok(())
    }

    /// When the party arrives.
    #[must_use]
    pub const fn start_at(&self) -> DateTime<Utc> {
        self.start_at
    }

    /// Move the reservation to a new time.
    pub fn set_start_at(&mut self, start_at: DateTime<Utc>) {
        self.start_at = start_at;
    }

    /// Reservation notes, `""` when none were given.
    #[must_use]
    pub fn notes(&self) -> &str {
        self.notes.as_str()
    }

    /// Replace the notes. `None` clears them to `""`.
    pub fn set_notes(&mut self, notes: Option<String>) {
        self.notes = Notes::from_option(notes);
    }

    /// Start time rendered like `January 1st 2026, 7:05 pm`.
    #[must_use]
    pub fn formatted_start_at(&self) -> String {
        format_start_at(self.start_at)
    }

    pub(crate) const fn guest_count(&self) -> GuestCount {
        self.num_guests
    }

    pub(crate) const fn notes_value(&self) -> &Notes {
        &self.notes
    }

    /// Record the id generated by the store. Only the first assignment sticks.
    pub(crate) fn assign_id(&mut self, id: ReservationId) {
        if self.id.is_none() {
            self.id = Some(id);
        }
    }
}

/// Long month, ordinal day, year, then 12-hour clock with lowercase meridiem.
fn format_start_at(at: DateTime<Utc>) -> String {
    let day = at.day();
    format!(
        "{} {day}{} {}",
        at.format("%B"),
        ordinal_suffix(day),
        at.format("%Y, %-I:%M %P")
    )
}

const fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// Reservation row as selected with camelCase column aliases.
#[derive(Debug, sqlx::FromRow)]
#[sqlx(rename_all = "camelCase")]
pub(crate) struct ReservationRow {
    pub id: i32,
    pub customer_id: i32,
    pub num_guests: i32,
    pub start_at: DateTime<Utc>,
    pub notes: Option<String>,
}

impl TryFrom<ReservationRow> for Reservation {
    type Error = GuestCountError;

    fn try_from(row: ReservationRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Some(ReservationId::new(row.id)),
            customer_id: CustomerId::new(row.customer_id),
            num_guests: GuestCount::new(row.num_guests)?,
            start_at: row.start_at,
            notes: Notes::from_option(row.notes),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    fn party_of(n: i32) -> Result<Reservation, GuestCountError> {
        Reservation::new(CustomerId::new(1), at(2026, 3, 14, 19, 30), n, None)
    }

    #[test]
    fn test_new_rejects_empty_party() {
        for n in [0, -1, -100] {
            assert!(party_of(n).is_err());
        }
    }

    #[test]
    fn test_new_accepts_positive_party() {
        for n in [1, 2, 40] {
            assert_eq!(party_of(n).unwrap().num_guests(), n);
        }
    }

    #[test]
    fn test_set_num_guests_validates() {
        let mut reservation = party_of(2).unwrap();
        assert!(reservation.set_num_guests(0).is_err());
        assert_eq!(reservation.num_guests(), 2);

        reservation.set_num_guests(6).unwrap();
        assert_eq!(reservation.num_guests(), 6);
    }

    #[test]
    fn test_notes_default_to_empty() {
        let mut reservation = party_of(2).unwrap();
        assert_eq!(reservation.notes(), "");

        reservation.set_notes(Some("high chair".to_owned()));
        assert_eq!(reservation.notes(), "high chair");

        reservation.set_notes(None);
        assert_eq!(reservation.notes(), "");

        reservation.set_notes(Some(String::new()));
        assert_eq!(reservation.notes(), "");
    }

    #[test]
    fn test_new_reservation_is_transient() {
        let mut reservation = party_of(2).unwrap();
        assert!(!reservation.is_persisted());
        reservation.assign_id(ReservationId::new(5));
        reservation.assign_id(ReservationId::new(6));
        assert_eq!(reservation.id(), Some(ReservationId::new(5)));
    }

    #[test]
    fn test_formatted_start_at() {
        let mut reservation = party_of(2).unwrap();
        assert_eq!(reservation.formatted_start_at(), "March 14th 2026, 7:30 pm");

        reservation.set_start_at(at(2026, 1, 1, 0, 5));
        assert_eq!(reservation.formatted_start_at(), "January 1st 2026, 12:05 am");

        reservation.set_start_at(at(2025, 11, 22, 12, 0));
        assert_eq!(reservation.formatted_start_at(), "November 22nd 2025, 12:00 pm");
    }

    #[test]
    fn test_ordinal_suffix() {
        let cases = [
            (1, "st"),
            (2, "nd"),
            (3, "rd"),
            (4, "th"),
            (11, "th"),
            (12, "th"),
            (13, "th"),
            (21, "st"),
            (22, "nd"),
            (23, "rd"),
            (30, "th"),
            (31, "st"),
        ];
        for (day, suffix) in cases {
            assert_eq!(ordinal_suffix(day), suffix, "day {day}");
        }
    }

    #[test]
    fn test_from_row_normalizes_notes() {
        let reservation = Reservation::try_from(ReservationRow {
            id: 8,
            customer_id: 3,
            num_guests: 4,
            start_at: at(2026, 5, 2, 18, 0),
            notes: None,
        })
        .unwrap();
        assert_eq!(reservation.id(), Some(ReservationId::new(8)));
        assert_eq!(reservation.customer_id(), CustomerId::new(3));
        assert_eq!(reservation.notes(), "");
    }

    #[test]
    fn test_from_row_rejects_invalid_party() {
        let result = Reservation::try_from(ReservationRow {
            id: 8,
            customer_id: 3,
            num_guests: 0,
            start_at: at(2026, 5, 2, 18, 0),
            notes: None,
        });
        assert!(result.is_err());
    }
}
