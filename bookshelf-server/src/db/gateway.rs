//! Deadline-bounded access to the book store
//!
//! Every store call runs under `tokio::time::timeout`. When the deadline
//! fires the in-flight store future is dropped, which cancels the operation
//! and releases anything it held (cursors, pooled connections) before the
//! handler returns.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use super::store::{
    BookFilter, BookStore, DeleteOutcome, InsertOutcome, ReplaceOutcome, StoreError,
};
use crate::models::{Book, BookId};

/// Deadline for create, replace and delete
pub const WRITE_DEADLINE: Duration = Duration::from_secs(5);

/// Deadline for find-by-id and every find-many variant
pub const READ_DEADLINE: Duration = Duration::from_secs(30);

/// Per-class operation deadlines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadlines {
    pub write: Duration,
    pub read: Duration,
}

impl Default for Deadlines {
    fn default() -> Self {
        Self {
            write: WRITE_DEADLINE,
            read: READ_DEADLINE,
        }
    }
}

/// Process-wide handle to the book store, cheap to clone into handlers
#[derive(Clone)]
pub struct BookGateway {
    store: Arc<dyn BookStore>,
    deadlines: Deadlines,
}

impl BookGateway {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self {
            store,
            deadlines: Deadlines::default(),
        }
    }

    pub fn with_deadlines(mut self, deadlines: Deadlines) -> Self {
        self.deadlines = deadlines;
        self
    }

    pub fn deadlines(&self) -> Deadlines {
        self.deadlines
    }

    pub async fn insert(&self, book: Book) -> Result<InsertOutcome, StoreError> {
        bounded("insert", self.deadlines.write, self.store.insert(book.without_id())).await
    }

    pub async fn find_by_id(&self, id: BookId) -> Result<Book, StoreError> {
        bounded("find_by_id", self.deadlines.read, self.store.find_by_id(id)).await
    }

    pub async fn find_many(&self, filter: &BookFilter) -> Result<Vec<Book>, StoreError> {
        bounded("find_many", self.deadlines.read, self.store.find_many(filter)).await
    }

    /// Whole-document replace. An id that matches nothing is reported as `NotFound`.
    pub async fn replace_by_id(&self, id: BookId, book: Book) -> Result<ReplaceOutcome, StoreError> {
        let outcome = bounded(
            "replace_by_id",
            self.deadlines.write,
            self.store.replace_by_id(id, book.without_id()),
        )
        .await?;

        if outcome.matched_count == 0 {
            return Err(StoreError::NotFound(id.to_hex()));
        }
        Ok(outcome)
    }

    /// Deleting an absent id succeeds with `deleted_count == 0`.
    pub async fn delete_by_id(&self, id: BookId) -> Result<DeleteOutcome, StoreError> {
        bounded("delete_by_id", self.deadlines.write, self.store.delete_by_id(id)).await
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        bounded("ping", self.deadlines.read, self.store.ping()).await
    }
}

async fn bounded<T>(
    operation: &'static str,
    deadline: Duration,
    op: impl Future<Output = Result<T, StoreError>>,
) -> Result<T, StoreError> {
    match tokio::time::timeout(deadline, op).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(
                operation,
                deadline_ms = deadline.as_millis() as u64,
                "store deadline expired"
            );
            Err(StoreError::Timeout {
                operation,
                deadline,
            })
        }
    }
}
