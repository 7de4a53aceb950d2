//! Catalog domain: products, mapping, local store, querying and validation.
//!
//! # Data Flow
//! ```text
//! Upstream listing:
//!     ExternalProduct[] → mapper.rs → Product[] → query.rs → PagedResponse
//!
//! Local products:
//!     ProductInput → validation.rs → store.rs (id + timestamp) → Product
//! ```
//!
//! # Design Decisions
//! - Upstream-derived products are transient; only the store owns products
//! - Query and mapping are pure functions over owned values
//! - The store is an injected object, never process-global state

pub mod error;
pub mod mapper;
pub mod product;
pub mod query;
pub mod store;
pub mod validation;

pub use error::{CatalogError, CatalogResult};
pub use product::{Product, ProductInput, DEFAULT_BRAND};
pub use query::{PagedResponse, ProductQuery};
pub use store::LocalProductStore;
