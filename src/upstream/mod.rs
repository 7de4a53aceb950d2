//! Upstream catalog integration.
//!
//! # Data Flow
//! ```text
//! Handler
//!     → client.rs (GET with deadline against the configured base URL)
//!     → types.rs (ExternalProduct / UpstreamError)
//!     → catalog::mapper (reshape into Product)
//! ```
//!
//! # Constraints
//! - One attempt per call, no retries or backoff
//! - Every call has a deadline
//! - Upstream status codes are preserved in errors

pub mod client;
pub mod types;

pub use client::CatalogClient;
pub use types::{ExternalProduct, Rating, UpstreamError, UpstreamResult};
