//! Book endpoints
//!
//! Thin pass-through from HTTP to the store gateway. Literal segments
//! (`author`, `year`) take precedence over the `{id}` parameter, and the bare
//! namespaces are answered with 404 rather than looked up as ids.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{any, get},
    Json, Router,
};
use tracing::info;

use crate::db::{BookFilter, DeleteOutcome, InsertOutcome, ReplaceOutcome};
use crate::http::error::ApiError;
use crate::http::extractors::{JsonBody, ValidBookId, ValidYear};
use crate::http::server::AppState;
use crate::models::Book;

/// POST /books - create a book
async fn create_book(
    State(state): State<Arc<AppState>>,
    JsonBody(book): JsonBody<Book>,
) -> Result<Json<InsertOutcome>, ApiError> {
    info!("received request to create a book");

    let outcome = state
        .books
        .insert(book)
        .await
        .map_err(ApiError::store("Error creating book"))?;

    info!(id = %outcome.inserted_id, "book created");
    Ok(Json(outcome))
}

/// GET /books - list every book
async fn list_books(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Book>>, ApiError> {
    info!("received request to list books");

    let books = state
        .books
        .find_many(&BookFilter::all())
        .await
        .map_err(ApiError::store("Error fetching books"))?;

    info!(count = books.len(), "books fetched");
    Ok(Json(books))
}

/// GET /books/{id} - get a single book
async fn get_book(
    State(state): State<Arc<AppState>>,
    ValidBookId(id): ValidBookId,
) -> Result<Json<Book>, ApiError> {
    info!(%id, "received request to get book");

    let book = state
        .books
        .find_by_id(id)
        .await
        .map_err(ApiError::store("Error fetching book"))?;

    Ok(Json(book))
}

/// PUT /books/{id} - replace the whole document
async fn update_book(
    State(state): State<Arc<AppState>>,
    ValidBookId(id): ValidBookId,
    JsonBody(book): JsonBody<Book>,
) -> Result<Json<ReplaceOutcome>, ApiError> {
    info!(%id, "received request to update book");

    let outcome = state
        .books
        .replace_by_id(id, book)
        .await
        .map_err(ApiError::store("Error updating book"))?;

    info!(%id, modified = outcome.modified_count, "book updated");
    Ok(Json(outcome))
}

/// DELETE /books/{id} - delete a book (idempotent)
async fn delete_book(
    State(state): State<Arc<AppState>>,
    ValidBookId(id): ValidBookId,
) -> Result<Json<DeleteOutcome>, ApiError> {
    info!(%id, "received request to delete book");

    let outcome = state
        .books
        .delete_by_id(id)
        .await
        .map_err(ApiError::store("Error deleting book"))?;

    info!(%id, deleted = outcome.deleted_count, "book deleted");
    Ok(Json(outcome))
}

/// GET /books/author/{author} - exact, case-sensitive author match
async fn list_books_by_author(
    State(state): State<Arc<AppState>>,
    Path(author): Path<String>,
) -> Result<Json<Vec<Book>>, ApiError> {
    info!(%author, "received request to list books by author");

    let books = state
        .books
        .find_many(&BookFilter::by_author(author))
        .await
        .map_err(ApiError::store("Error fetching books by author"))?;

    info!(count = books.len(), "books by author fetched");
    Ok(Json(books))
}

/// GET /books/year/{year} - books released within the civil year (UTC)
async fn list_books_by_year(
    State(state): State<Arc<AppState>>,
    ValidYear(year): ValidYear,
) -> Result<Json<Vec<Book>>, ApiError> {
    info!(year = year.value(), "received request to list books by year");

    let books = state
        .books
        .find_many(&BookFilter::released_in(&year))
        .await
        .map_err(ApiError::store("Error fetching books by year"))?;

    info!(count = books.len(), "books by year fetched");
    Ok(Json(books))
}

/// /books/author and /books/year without a key
async fn bare_namespace() -> ApiError {
    ApiError::NotFound("Not found")
}

/// Book routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/books", get(list_books).post(create_book))
        .route(
            "/books/{id}",
            get(get_book).put(update_book).delete(delete_book),
        )
        .route("/books/author", any(bare_namespace))
        .route("/books/author/{author}", get(list_books_by_author))
        .route("/books/year", any(bare_namespace))
        .route("/books/year/{year}", get(list_books_by_year))
}
