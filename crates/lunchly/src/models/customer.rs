//! Customer domain types.

use serde::Serialize;

use lunchly_core::CustomerId;

/// A restaurant customer who can make reservations.
///
/// A customer without an id is transient: it exists only in memory until
/// [`CustomerRepository::save`](crate::db::CustomerRepository::save) inserts it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Customer {
    id: Option<CustomerId>,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Free-text notes about the customer.
    pub notes: Option<String>,
}

impl Customer {
    /// Create a new, not yet persisted customer.
    #[must_use]
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        phone: Option<String>,
        notes: Option<String>,
    ) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone,
            notes,
        }
    }

    /// Store-assigned id, `None` until the first save.
    #[must_use]
    pub const fn id(&self) -> Option<CustomerId> {
        self.id
    }

    /// Whether this customer has a row in the store.
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// First and last name joined by a space.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Record the id generated by the store. Only the first assignment sticks.
    pub(crate) fn assign_id(&mut self, id: CustomerId) {
        if self.id.is_none() {
            self.id = Some(id);
        }
    }
}

/// Customer row as selected with camelCase column aliases.
#[derive(Debug, sqlx::FromRow)]
#[sqlx(rename_all = "camelCase")]
pub(crate) struct CustomerRow {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Self {
            id: Some(CustomerId::new(row.id)),
            first_name: row.first_name,
            last_name: row.last_name,
            phone: row.phone,
            notes: row.notes,
        }
    }
}
