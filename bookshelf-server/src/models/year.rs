//! Release year parsing and its UTC interval
//!
//! A civil year `y` covers the half-open interval
//! `[y-01-01T00:00:00Z, (y+1)-01-01T00:00:00Z)`. The upper bound is the start
//! of the next calendar year, so leap years need no special casing and an
//! instant at New Year's midnight belongs to exactly one year.

use chrono::{DateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use super::ValidationError;

/// Four ASCII digits. `\d` would also admit non-ASCII Unicode digits.
static YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}$").expect("invalid year regex"));

/// A validated `YYYY` year with its precomputed bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReleaseYear {
    year: i32,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl ReleaseYear {
    /// Parse a path segment in `YYYY` form.
    ///
    /// # Rules
    /// - Exactly four ASCII digits (`0000` through `9999`)
    /// - No sign, whitespace, or trailing characters
    ///
    /// # Example
    /// ```
    /// use bookshelf_server::models::ReleaseYear;
    ///
    /// assert!(ReleaseYear::parse("1965").is_ok());
    /// assert!(ReleaseYear::parse("19xx").is_err());
    /// assert!(ReleaseYear::parse("+965").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        if !YEAR_RE.is_match(s) {
            return Err(ValidationError::InvalidFormat {
                field: "year",
                reason: "expected four ASCII digits (YYYY)",
            });
        }

        let year: i32 = s.parse().map_err(|_| ValidationError::InvalidFormat {
            field: "year",
            reason: "expected four ASCII digits (YYYY)",
        })?;

        let out_of_range = || ValidationError::OutOfRange {
            field: "year",
            value: s.to_owned(),
        };
        let start = start_of_year(year).ok_or_else(out_of_range)?;
        let end = start_of_year(year + 1).ok_or_else(out_of_range)?;

        Ok(Self { year, start, end })
    }

    pub fn value(&self) -> i32 {
        self.year
    }

    /// Inclusive lower bound: midnight UTC on January 1.
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Exclusive upper bound: midnight UTC on January 1 of the following year.
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }
}

fn start_of_year(year: i32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).single()
}
