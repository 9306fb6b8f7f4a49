//! Custom Axum extractors
//!
//! Rejections come back as `ApiError`, so malformed input still gets the
//! JSON error envelope instead of axum's plain-text defaults.

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use super::error::{ApiError, INVALID_BODY, INVALID_BOOK_ID, INVALID_YEAR};
use crate::models::{BookId, ReleaseYear};

/// Extract and validate a book id from path
pub struct ValidBookId(pub BookId);

impl<S> FromRequestParts<S> for ValidBookId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::BadRequest(INVALID_BOOK_ID))?;

        let id = BookId::parse(&raw).map_err(|err| {
            tracing::warn!(id = %raw, %err, "rejected book id");
            ApiError::BadRequest(INVALID_BOOK_ID)
        })?;

        Ok(Self(id))
    }
}

/// Extract and validate a `YYYY` release year from path
pub struct ValidYear(pub ReleaseYear);

impl<S> FromRequestParts<S> for ValidYear
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::BadRequest(INVALID_YEAR))?;

        let year = ReleaseYear::parse(&raw).map_err(|err| {
            tracing::warn!(year = %raw, %err, "rejected release year");
            ApiError::BadRequest(INVALID_YEAR)
        })?;

        Ok(Self(year))
    }
}

/// JSON request body, decoded regardless of the declared content type.
///
/// Unknown fields are ignored by the target type; syntax or type errors
/// are a 400 rather than a silently zero-valued record.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            tracing::warn!(%rejection, "unreadable request body");
            ApiError::BadRequest(INVALID_BODY)
        })?;

        let value = serde_json::from_slice(&bytes).map_err(|err| {
            tracing::warn!(%err, "undecodable request body");
            ApiError::BadRequest(INVALID_BODY)
        })?;

        Ok(Self(value))
    }
}
