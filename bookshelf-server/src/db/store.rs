//! Store gateway contract
//!
//! The narrow capability set handlers need from the document store:
//! insert, find-by-id, find-many, replace-by-id, delete-by-id, plus a ping
//! for health probes. Driver errors never cross this boundary; every backend
//! maps them onto `StoreError`.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{Book, BookId, ReleaseYear};

/// Store error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("not found: book '{0}'")]
    NotFound(String),

    #[error("malformed id: {0}")]
    MalformedId(String),

    #[error("store error: {0}")]
    Transient(String),

    #[error("{operation} exceeded its {}s deadline", .deadline.as_secs_f64())]
    Timeout {
        operation: &'static str,
        deadline: Duration,
    },
}

impl StoreError {
    /// Timeouts and driver failures: worth retrying, never the client's fault.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient(_) | Self::Timeout { .. })
    }
}

/// Queryable book fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BookField {
    Title,
    Author,
    Isbn,
    Released,
}

impl BookField {
    /// Document field name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Author => "author",
            Self::Isbn => "isbn",
            Self::Released => "released",
        }
    }

    fn value_of(&self, book: &Book) -> Option<FilterValue> {
        match self {
            Self::Title => book.title.clone().map(FilterValue::Text),
            Self::Author => book.author.clone().map(FilterValue::Text),
            Self::Isbn => book.isbn.clone().map(FilterValue::Text),
            Self::Released => book.released.map(FilterValue::Timestamp),
        }
    }
}

/// Scalar operand of a filter condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Text(String),
    Timestamp(DateTime<Utc>),
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<DateTime<Utc>> for FilterValue {
    fn from(t: DateTime<Utc>) -> Self {
        Self::Timestamp(t)
    }
}

/// Condition on a single field: equality, or the half-open interval `[gte, lt)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    Eq(FilterValue),
    Range { gte: FilterValue, lt: FilterValue },
}

impl Condition {
    /// Operands of different kinds never compare, so they never match.
    fn matches(&self, value: &FilterValue) -> bool {
        use FilterValue::{Text, Timestamp};

        match self {
            Self::Eq(expected) => value == expected,
            Self::Range { gte, lt } => match (value, gte, lt) {
                (Timestamp(v), Timestamp(lo), Timestamp(hi)) => lo <= v && v < hi,
                (Text(v), Text(lo), Text(hi)) => lo <= v && v < hi,
                _ => false,
            },
        }
    }
}

/// Field → condition mapping. All conditions must hold; empty matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    conditions: BTreeMap<BookField, Condition>,
}

impl BookFilter {
    /// Empty filter
    pub fn all() -> Self {
        Self::default()
    }

    /// Exact, case-sensitive author match
    pub fn by_author(author: impl Into<String>) -> Self {
        Self::all().eq(BookField::Author, author.into())
    }

    /// Books whose `released` instant falls within the civil year
    pub fn released_in(year: &ReleaseYear) -> Self {
        Self::all().range(BookField::Released, year.start(), year.end())
    }

    pub fn eq(mut self, field: BookField, value: impl Into<FilterValue>) -> Self {
        self.conditions.insert(field, Condition::Eq(value.into()));
        self
    }

    pub fn range(
        mut self,
        field: BookField,
        gte: impl Into<FilterValue>,
        lt: impl Into<FilterValue>,
    ) -> Self {
        self.conditions.insert(
            field,
            Condition::Range {
                gte: gte.into(),
                lt: lt.into(),
            },
        );
        self
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn conditions(&self) -> impl Iterator<Item = (BookField, &Condition)> {
        self.conditions.iter().map(|(field, cond)| (*field, cond))
    }

    /// Evaluate against a record. A field absent from the record fails any condition on it.
    pub fn matches(&self, book: &Book) -> bool {
        self.conditions.iter().all(|(field, cond)| {
            field
                .value_of(book)
                .is_some_and(|value| cond.matches(&value))
        })
    }
}

/// Result of an insert: the identifier the store assigned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InsertOutcome {
    pub inserted_id: BookId,
}

/// Result of a whole-document replace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReplaceOutcome {
    pub matched_count: u64,
    pub modified_count: u64,
}

/// Result of a delete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeleteOutcome {
    pub deleted_count: u64,
}

/// Persistence backend for book documents (testable)
///
/// Implementations are shared across concurrent handlers and must be
/// safe for concurrent use.
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Insert a new document; any `id` on `book` is ignored.
    async fn insert(&self, book: Book) -> Result<InsertOutcome, StoreError>;

    /// Fetch one document. Absent ids yield `StoreError::NotFound`.
    async fn find_by_id(&self, id: BookId) -> Result<Book, StoreError>;

    /// Materialize every match in memory.
    async fn find_many(&self, filter: &BookFilter) -> Result<Vec<Book>, StoreError>;

    /// Replace the whole document stored under `id`. Zero matches is not an error here.
    async fn replace_by_id(&self, id: BookId, book: Book) -> Result<ReplaceOutcome, StoreError>;

    async fn delete_by_id(&self, id: BookId) -> Result<DeleteOutcome, StoreError>;

    /// Round-trip to the store without touching data.
    async fn ping(&self) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn released(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> Book {
        Book {
            released: Some(Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()),
            ..Default::default()
        }
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert!(BookFilter::all().matches(&Book::default()));
    }

    #[test]
    fn author_match_is_exact() {
        let book = Book {
            author: Some("Asimov".into()),
            ..Default::default()
        };
        assert!(BookFilter::by_author("Asimov").matches(&book));
        assert!(!BookFilter::by_author("asimov").matches(&book));
        assert!(!BookFilter::by_author("Asimov ").matches(&book));
        assert!(!BookFilter::by_author("Asimov").matches(&Book::default()));
    }

    #[test]
    fn year_range_is_half_open() {
        let y2000 = BookFilter::released_in(&ReleaseYear::parse("2000").unwrap());
        let y2001 = BookFilter::released_in(&ReleaseYear::parse("2001").unwrap());
        let midnight = released(2001, 1, 1, 0, 0, 0);

        assert!(!y2000.matches(&midnight));
        assert!(y2001.matches(&midnight));
        assert!(y2000.matches(&released(2000, 12, 31, 23, 59, 59)));
    }

    #[test]
    fn missing_released_never_matches_a_year() {
        let y = BookFilter::released_in(&ReleaseYear::parse("1965").unwrap());
        assert!(!y.matches(&Book::default()));
    }

    #[test]
    fn mismatched_operand_kinds_never_match() {
        let filter = BookFilter::all().eq(BookField::Released, "1965");
        assert!(!filter.matches(&released(1965, 8, 1, 0, 0, 0)));
    }

    #[test]
    fn timeout_is_transient() {
        let err = StoreError::Timeout {
            operation: "find_many",
            deadline: Duration::from_secs(30),
        };
        assert!(err.is_transient());
        assert_eq!(err.to_string(), "find_many exceeded its 30s deadline");
        assert!(!StoreError::NotFound("x".into()).is_transient());
    }
}
