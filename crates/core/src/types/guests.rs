//! Party size for a reservation.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when building a [`GuestCount`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuestCountError {
    /// The party has fewer than one guest.
    #[error("number of guests must be >= {min} (got {got})")]
    TooFew {
        /// Smallest accepted party size.
        min: i32,
        /// The rejected value.
        got: i32,
    },
}

/// Number of guests in a booked party.
///
/// ## Constraints
///
/// - At least 1 guest
///
/// The check runs on every construction path, including deserialization, so a
/// `GuestCount` in hand is always valid.
///
/// ## Examples
///
/// ```
/// use lunchly_core::GuestCount;
///
/// assert_eq!(GuestCount::new(4).map(GuestCount::get), Ok(4));
/// assert!(GuestCount::new(0).is_err());
/// assert!(GuestCount::new(-2).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct GuestCount(i32);

impl GuestCount {
    /// Smallest party size accepted.
    pub const MIN: i32 = 1;

    /// Validate and wrap a guest count.
    ///
    /// # Errors
    ///
    /// Returns [`GuestCountError::TooFew`] if `n` is less than 1.
    pub const fn new(n: i32) -> Result<Self, GuestCountError> {
        if n < Self::MIN {
            return Err(GuestCountError::TooFew {
                min: Self::MIN,
                got: n,
            });
        }
        Ok(Self(n))
    }

    /// Returns the number of guests.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for GuestCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i32> for GuestCount {
    type Error = GuestCountError;

    fn try_from(n: i32) -> Result<Self, Self::Error> {
        Self::new(n)
    }
}

impl From<GuestCount> for i32 {
    fn from(count: GuestCount) -> Self {
        count.0
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for GuestCount {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <i32 as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <i32 as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for GuestCount {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <i32 as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}
