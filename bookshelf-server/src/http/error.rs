//! API error types with IntoResponse
//!
//! Every failure renders as `{"message": "..."}` with an
//! `application/json` content type. Store failures log the underlying
//! error and return only the fixed per-operation message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::StoreError;

pub const BOOK_NOT_FOUND: &str = "Book not found";
pub const INVALID_BOOK_ID: &str = "Invalid book id";
pub const INVALID_BODY: &str = "Invalid request body";
pub const INVALID_YEAR: &str = "Invalid year format. Please provide year in YYYY format";

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Malformed id, year, or body (400)
    BadRequest(&'static str),

    /// No such resource or route (404)
    NotFound(&'static str),

    /// Route exists, method does not (405)
    MethodNotAllowed,

    /// Store operation failed (404 for a missing book, otherwise 500, logged)
    Store {
        context: &'static str,
        source: StoreError,
    },
}

impl ApiError {
    /// Adapter for `map_err` that tags a store failure with its operation message.
    ///
    /// ```ignore
    /// gateway.insert(book).await.map_err(ApiError::store("Error creating book"))?;
    /// ```
    pub fn store(context: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| Self::Store { context, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Store {
                source: StoreError::NotFound(_),
                ..
            } => StatusCode::NOT_FOUND,
            Self::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::BadRequest(msg) | Self::NotFound(msg) => *msg,
            Self::MethodNotAllowed => "Method not allowed",
            Self::Store {
                source: StoreError::NotFound(_),
                ..
            } => BOOK_NOT_FOUND,
            Self::Store { context, .. } => *context,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if let Self::Store { context, source } = &self {
            if status.is_server_error() {
                // Log the actual error, return the fixed message
                tracing::error!(error = %source, "{}", context);
            }
        }

        (status, Json(json!({ "message": self.message() }))).into_response()
    }
}
