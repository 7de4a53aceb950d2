//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, trace span)
//!     → extract.rs (path id validation)
//!     → handlers.rs (upstream catalog / local store)
//!     → error.rs (domain failure → status + JSON body)
//!     → Send to client
//! ```
//!
//! docs.rs serves the OpenAPI document and Swagger UI.

pub mod docs;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod request;
pub mod server;

pub use error::ApiError;
pub use extract::ProductId;
pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
