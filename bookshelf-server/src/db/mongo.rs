//! MongoDB book store
//!
//! - One process-wide `Client`; the driver owns the connection pool
//! - Lookups, replaces and deletes filter explicitly on `{ _id: k }`
//! - `find_many` drains the cursor before returning; dropping it closes it

use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{doc, Bson, DateTime as BsonDateTime, Document};
use futures::TryStreamExt;
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};

use super::store::{
    BookFilter, BookStore, Condition, DeleteOutcome, FilterValue, InsertOutcome, ReplaceOutcome,
    StoreError,
};
use crate::models::{Book, BookId};

pub const DEFAULT_URI: &str = "mongodb://localhost:27017";
pub const DEFAULT_DATABASE: &str = "books";
pub const DEFAULT_COLLECTION: &str = "books";

/// Where the book collection lives
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub uri: String,
    pub database: String,
    pub collection: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            uri: DEFAULT_URI.to_string(),
            database: DEFAULT_DATABASE.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
        }
    }
}

/// Stored shape of a book: ObjectId key, BSON datetime, absent fields omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct BookDocument {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    author: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    isbn: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    released: Option<BsonDateTime>,
}

impl From<Book> for BookDocument {
    /// The key is never written from a request body; the store assigns it on
    /// insert and replace keeps the stored one.
    fn from(book: Book) -> Self {
        Self {
            id: None,
            title: book.title,
            author: book.author,
            isbn: book.isbn,
            released: book.released.map(BsonDateTime::from_chrono),
        }
    }
}

impl From<BookDocument> for Book {
    fn from(doc: BookDocument) -> Self {
        Self {
            id: doc.id.map(BookId::from),
            title: doc.title,
            author: doc.author,
            isbn: doc.isbn,
            released: doc.released.map(BsonDateTime::to_chrono),
        }
    }
}

/// Book store backed by a MongoDB collection
#[derive(Clone)]
pub struct MongoBookStore {
    client: Client,
    database: String,
    collection: Collection<BookDocument>,
}

impl MongoBookStore {
    /// Build a client for `config.uri`.
    ///
    /// The driver connects lazily; call `ping` to confirm the deployment is reachable.
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(&config.uri).await.map_err(transient)?;
        let collection = client
            .database(&config.database)
            .collection::<BookDocument>(&config.collection);

        tracing::debug!(
            database = %config.database,
            collection = %config.collection,
            "mongodb client created"
        );

        Ok(Self {
            client,
            database: config.database.clone(),
            collection,
        })
    }
}

#[async_trait]
impl BookStore for MongoBookStore {
    async fn insert(&self, book: Book) -> Result<InsertOutcome, StoreError> {
        let result = self
            .collection
            .insert_one(BookDocument::from(book))
            .await
            .map_err(transient)?;

        let oid = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| StoreError::MalformedId(result.inserted_id.to_string()))?;

        Ok(InsertOutcome {
            inserted_id: BookId::from(oid),
        })
    }

    async fn find_by_id(&self, id: BookId) -> Result<Book, StoreError> {
        self.collection
            .find_one(by_id(id))
            .await
            .map_err(transient)?
            .map(Book::from)
            .ok_or_else(|| StoreError::NotFound(id.to_hex()))
    }

    async fn find_many(&self, filter: &BookFilter) -> Result<Vec<Book>, StoreError> {
        let cursor = self
            .collection
            .find(filter_document(filter))
            .await
            .map_err(transient)?;

        let docs: Vec<BookDocument> = cursor.try_collect().await.map_err(transient)?;
        Ok(docs.into_iter().map(Book::from).collect())
    }

    async fn replace_by_id(&self, id: BookId, book: Book) -> Result<ReplaceOutcome, StoreError> {
        let result = self
            .collection
            .replace_one(by_id(id), BookDocument::from(book))
            .await
            .map_err(transient)?;

        Ok(ReplaceOutcome {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
        })
    }

    async fn delete_by_id(&self, id: BookId) -> Result<DeleteOutcome, StoreError> {
        let result = self
            .collection
            .delete_one(by_id(id))
            .await
            .map_err(transient)?;

        Ok(DeleteOutcome {
            deleted_count: result.deleted_count,
        })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.client
            .database(&self.database)
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(transient)?;
        Ok(())
    }
}

fn transient(err: mongodb::error::Error) -> StoreError {
    StoreError::Transient(err.to_string())
}

fn by_id(id: BookId) -> Document {
    doc! { "_id": id.as_object_id() }
}

/// Translate a gateway filter into a MongoDB query document.
fn filter_document(filter: &BookFilter) -> Document {
    let mut query = Document::new();
    for (field, condition) in filter.conditions() {
        let value = match condition {
            Condition::Eq(v) => filter_value(v),
            Condition::Range { gte, lt } => Bson::Document(doc! {
                "$gte": filter_value(gte),
                "$lt": filter_value(lt),
            }),
        };
        query.insert(field.as_str(), value);
    }
    query
}

fn filter_value(value: &FilterValue) -> Bson {
    match value {
        FilterValue::Text(s) => Bson::String(s.clone()),
        FilterValue::Timestamp(t) => Bson::DateTime(BsonDateTime::from_chrono(*t)),
    }
}
