//! Book record and its store-assigned identifier

use std::fmt;
use std::str::FromStr;

use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::ValidationError;

/// Opaque book identifier, assigned by the store on insert.
///
/// Rendered on the wire as a 24-character hex string. Handlers never
/// derive meaning from it beyond equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BookId(ObjectId);

impl BookId {
    /// Mint a fresh identifier (used by stores that assign ids client-side).
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }

    /// Parse a hex-encoded identifier taken from a request path.
    ///
    /// # Example
    /// ```
    /// use bookshelf_server::models::BookId;
    ///
    /// assert!(BookId::parse("65a1f0c2e4b0a1b2c3d4e5f6").is_ok());
    /// assert!(BookId::parse("author").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        ObjectId::parse_str(s)
            .map(Self)
            .map_err(|_| ValidationError::InvalidFormat {
                field: "book id",
                reason: "must be a 24-character hex string",
            })
    }

    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }

    pub fn as_object_id(&self) -> ObjectId {
        self.0
    }
}

impl From<ObjectId> for BookId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl FromStr for BookId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for BookId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for BookId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// A book document as seen on the HTTP wire.
///
/// Every field is optional and absent fields are omitted on output.
/// `_id` is output-only: a client-supplied `_id` is ignored on decode so that
/// create and replace bodies can never pick or change a record's identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Book {
    #[serde(rename = "_id", skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub id: Option<BookId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,

    /// Release instant, RFC-3339 on the wire, normalised to UTC.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub released: Option<DateTime<Utc>>,
}

impl Book {
    /// Same record with the identity cleared, as a store expects it on write.
    pub fn without_id(mut self) -> Self {
        self.id = None;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn book_id_round_trips_through_hex() {
        let id = BookId::generate();
        assert_eq!(BookId::parse(&id.to_hex()).unwrap(), id);
        assert_eq!(id.to_string().len(), 24);
    }

    #[test]
    fn book_id_rejects_non_hex() {
        assert!(BookId::parse("").is_err());
        assert!(BookId::parse("author").is_err());
        assert!(BookId::parse("zzzzzzzzzzzzzzzzzzzzzzzz").is_err());
        assert!(BookId::parse("65a1f0c2e4b0a1b2c3d4e5f6aa").is_err());
    }

    #[test]
    fn decode_ignores_id_and_unknown_fields() {
        let book: Book = serde_json::from_value(json!({
            "_id": "65a1f0c2e4b0a1b2c3d4e5f6",
            "title": "Dune",
            "publisher": "Chilton",
        }))
        .unwrap();

        assert_eq!(book.id, None);
        assert_eq!(book.title.as_deref(), Some("Dune"));
    }

    #[test]
    fn decode_normalises_offset_to_utc() {
        let book: Book = serde_json::from_value(json!({
            "released": "1965-08-01T02:00:00+02:00",
        }))
        .unwrap();

        assert_eq!(
            book.released,
            Some(Utc.with_ymd_and_hms(1965, 8, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn encode_omits_absent_fields() {
        let id = BookId::parse("65a1f0c2e4b0a1b2c3d4e5f6").unwrap();
        let book = Book {
            id: Some(id),
            author: Some("Herbert".into()),
            released: Some(Utc.with_ymd_and_hms(1965, 8, 1, 0, 0, 0).unwrap()),
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(&book).unwrap(),
            json!({
                "_id": "65a1f0c2e4b0a1b2c3d4e5f6",
                "author": "Herbert",
                "released": "1965-08-01T00:00:00Z",
            })
        );
    }
}
