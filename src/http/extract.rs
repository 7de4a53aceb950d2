//! Path extractors shared by every `{id}` route.

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use crate::http::error::ApiError;

/// A positive product id taken from the `{id}` path segment.
///
/// A segment that is not an integer does not name a product route (404);
/// an integer id ≤ 0 is a bad request (400).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductId(pub i64);

impl<S: Send + Sync> FromRequestParts<S> for ProductId {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::Rejected(rejection.status(), rejection.body_text()))?;

        let id: i64 = raw
            .parse()
            .map_err(|_| ApiError::NotFound(format!("No product route matches '{}'.", raw)))?;

        if id <= 0 {
            return Err(ApiError::BadRequest("The id must be greater than 0.".to_string()));
        }

        Ok(ProductId(id))
    }
}
