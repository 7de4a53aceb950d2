//! Catalog Proxy Library
//!
//! An HTTP backend that reshapes a third-party product catalog and keeps a
//! small in-memory store of locally created products.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client ──▶ http (router, middleware, error translation)
//!                  │
//!                  ├──▶ upstream (catalog API client) ──▶ catalog::mapper ──▶ catalog::query
//!                  │
//!                  └──▶ catalog::validation ──▶ catalog::store (mutex-guarded)
//!
//!     Cross-cutting: config, observability, lifecycle
//! ```

// Core subsystems
pub mod catalog;
pub mod config;
pub mod http;
pub mod upstream;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::schema::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
