//! Database ids
//!
//! Every primary key is a Postgres `BIGINT`. Ids reach the server as decimal
//! strings (route segments, form fields) and are validated here before any
//! query runs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Validated `BIGINT` primary key
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct Id(i64);

impl Id {
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Parse an id from its decimal form.
    ///
    /// Only ASCII digits are accepted: no sign, no whitespace, and the value
    /// must fit in an `i64`.
    ///
    /// # Example
    /// ```
    /// use prairielearn_server::models::Id;
    ///
    /// assert_eq!(Id::parse("42").unwrap().get(), 42);
    /// assert!(Id::parse("-1").is_err());
    /// assert!(Id::parse("12a").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        Self::parse_field(s, "id")
    }

    /// Same as [`Id::parse`], naming the offending field in the error.
    pub fn parse_field(s: &str, field: &'static str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty { field });
        }

        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::InvalidFormat {
                field,
                reason: "must contain only digits",
            });
        }

        s.parse::<i64>()
            .map(Self)
            .map_err(|_| ValidationError::InvalidFormat {
                field,
                reason: "out of range",
            })
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for Id {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Id> for i64 {
    fn from(id: Id) -> Self {
        id.0
    }
}
