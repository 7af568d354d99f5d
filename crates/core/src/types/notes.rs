//! Free-text reservation notes.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Notes attached to a reservation.
///
/// Never null: absent or empty input is normalized to the empty string, so
/// the stored column and the in-memory value always agree.
///
/// ```
/// use lunchly_core::Notes;
///
/// assert_eq!(Notes::from_option(None).as_str(), "");
/// assert_eq!(Notes::from("window seat").as_str(), "window seat");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub struct Notes(String);

impl Notes {
    /// Build notes from optional input, mapping `None` to `""`.
    #[must_use]
    pub fn from_option(value: Option<String>) -> Self {
        Self(value.unwrap_or_default())
    }

    /// Returns the notes as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether there is any note text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the `Notes` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<Option<String>> for Notes {
    fn from(value: Option<String>) -> Self {
        Self::from_option(value)
    }
}

impl From<String> for Notes {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Notes {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<Notes> for String {
    fn from(notes: Notes) -> Self {
        notes.0
    }
}

impl fmt::Display for Notes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Notes {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Notes {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Notes {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_none_becomes_empty() {
        let notes = Notes::from_option(None);
        assert!(notes.is_empty());
        assert_eq!(notes.as_str(), "");
    }

    #[test]
    fn test_text_is_kept() {
        let notes = Notes::from_option(Some("birthday".to_owned()));
        assert_eq!(notes.as_str(), "birthday");
        assert_eq!(notes.to_string(), "birthday");
    }

    #[test]
    fn test_serde_null_becomes_empty() {
        let notes: Notes = serde_json::from_str("null").unwrap();
        assert_eq!(notes, Notes::default());
        assert_eq!(serde_json::to_string(&notes).unwrap(), "\"\"");
    }
}
