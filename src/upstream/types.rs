//! Upstream record types and error definitions.

use axum::http::StatusCode;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A product as the catalog API returns it.
///
/// Every field is required; unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ExternalProduct {
    pub id: i64,
    pub title: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub description: String,
    pub category: String,
    pub image: String,
    pub rating: Rating,
}

/// Aggregated review score attached to an upstream product.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Rating {
    #[serde(with = "rust_decimal::serde::float")]
    pub rate: Decimal,
    pub count: i64,
}

/// Errors that can occur while talking to the catalog API.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The API answered with a non-success status.
    #[error("FakeStoreAPI returned {} for /{path}.", status.as_u16())]
    Status { status: StatusCode, path: String },

    /// The API answered with nothing to list.
    #[error("No products found.")]
    NotFound,

    /// The body was not the expected JSON shape.
    #[error("Upstream response for /{path} could not be decoded: {reason}")]
    Decode { path: String, reason: String },

    /// Connection-level failure (DNS, refused, reset).
    #[error("Catalog API is unreachable: {0}")]
    Unavailable(String),

    /// The call did not finish within the configured deadline.
    #[error("Catalog API did not answer within {0} seconds")]
    Timeout(u64),

    /// The client could not be built from its configuration.
    #[error("Invalid upstream configuration: {0}")]
    Config(String),
}

impl UpstreamError {
    /// The upstream status, when the failure carries one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            UpstreamError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for upstream operations.
pub type UpstreamResult<T> = Result<T, UpstreamError>;
