//! Domain error taxonomy.

use thiserror::Error;

use crate::upstream::UpstreamError;

/// Errors raised by catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A caller-supplied argument is out of range (pagination, id).
    #[error("{0}")]
    InvalidArgument(String),

    /// The requested resource does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The upstream catalog call failed.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// One or more field rules were violated; one message per rule.
    #[error("Validation failed: {}", .0.join(" "))]
    ValidationFailed(Vec<String>),
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CatalogError::NotFound("Local product with ID 7 not found.".into());
        assert_eq!(err.to_string(), "Local product with ID 7 not found.");

        let err: CatalogError = UpstreamError::NotFound.into();
        assert_eq!(err.to_string(), "No products found.");

        let err = CatalogError::ValidationFailed(vec!["a.".into(), "b.".into()]);
        assert_eq!(err.to_string(), "Validation failed: a. b.");
    }
}
