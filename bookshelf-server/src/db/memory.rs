//! In-memory book store
//!
//! Same filter semantics as the MongoDB backend. Used by the test suite and by
//! `bookshelf serve --memory` for local development; nothing survives a restart.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::store::{
    BookFilter, BookStore, DeleteOutcome, InsertOutcome, ReplaceOutcome, StoreError,
};
use crate::models::{Book, BookId};

/// Book store held in a process-local map
#[derive(Default)]
pub struct MemoryBookStore {
    books: RwLock<BTreeMap<BookId, Book>>,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.books.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.books.read().await.is_empty()
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn insert(&self, book: Book) -> Result<InsertOutcome, StoreError> {
        let id = BookId::generate();
        let record = Book {
            id: Some(id),
            ..book
        };

        self.books.write().await.insert(id, record);
        Ok(InsertOutcome { inserted_id: id })
    }

    async fn find_by_id(&self, id: BookId) -> Result<Book, StoreError> {
        self.books
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_hex()))
    }

    async fn find_many(&self, filter: &BookFilter) -> Result<Vec<Book>, StoreError> {
        let books = self.books.read().await;
        Ok(books
            .values()
            .filter(|book| filter.matches(book))
            .cloned()
            .collect())
    }

    async fn replace_by_id(&self, id: BookId, book: Book) -> Result<ReplaceOutcome, StoreError> {
        let mut books = self.books.write().await;
        let Some(slot) = books.get_mut(&id) else {
            return Ok(ReplaceOutcome {
                matched_count: 0,
                modified_count: 0,
            });
        };

        let replacement = Book {
            id: Some(id),
            ..book
        };
        let modified = *slot != replacement;
        *slot = replacement;

        Ok(ReplaceOutcome {
            matched_count: 1,
            modified_count: u64::from(modified),
        })
    }

    async fn delete_by_id(&self, id: BookId) -> Result<DeleteOutcome, StoreError> {
        let removed = self.books.write().await.remove(&id);
        Ok(DeleteOutcome {
            deleted_count: u64::from(removed.is_some()),
        })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
