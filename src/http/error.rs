//! Translation of domain failures into HTTP responses.
//!
//! # Mapping
//! - Generic path (`From<CatalogError>`): 400 / 404 / 502 / 500
//! - Single upstream product lookup (`ApiError::from_lookup`): 404 / 503 / 408 / 500
//!
//! Bodies are `{"error": "<message>"}`, except validation failures which are
//! `{"errors": ["<msg>", ...]}`.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::catalog::CatalogError;
use crate::upstream::UpstreamError;

/// An HTTP-level failure ready to be rendered.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    RequestTimeout(String),
    BadGateway(String),
    ServiceUnavailable(String),
    Internal(String),
    /// One message per violated field rule.
    Validation(Vec<String>),
    /// An extractor rejection, keeping the status axum chose.
    Rejected(StatusCode, String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::RequestTimeout(_) => StatusCode::REQUEST_TIMEOUT,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Rejected(status, _) => *status,
        }
    }

    /// Mapping used by the single upstream product lookup, which needs to
    /// tell "missing" from "unreachable" from "slow".
    pub fn from_lookup(error: UpstreamError, id: i64) -> Self {
        match error {
            UpstreamError::Status { status, .. } if status == StatusCode::NOT_FOUND => {
                ApiError::NotFound(format!("Product with ID {} not found.", id))
            }
            UpstreamError::Decode { .. } => {
                ApiError::NotFound("Product data could not be parsed.".to_string())
            }
            UpstreamError::NotFound => ApiError::NotFound(error.to_string()),
            UpstreamError::Unavailable(_) => ApiError::ServiceUnavailable(error.to_string()),
            UpstreamError::Timeout(_) => ApiError::RequestTimeout(error.to_string()),
            UpstreamError::Status { .. } | UpstreamError::Config(_) => {
                ApiError::Internal(error.to_string())
            }
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(error: CatalogError) -> Self {
        match error {
            CatalogError::InvalidArgument(message) => ApiError::BadRequest(message),
            CatalogError::NotFound(message) => ApiError::NotFound(message),
            CatalogError::ValidationFailed(messages) => ApiError::Validation(messages),
            CatalogError::Upstream(upstream) => match upstream {
                UpstreamError::NotFound => ApiError::NotFound(upstream.to_string()),
                UpstreamError::Status { .. } | UpstreamError::Unavailable(_) => {
                    ApiError::BadGateway(upstream.to_string())
                }
                UpstreamError::Timeout(_)
                | UpstreamError::Decode { .. }
                | UpstreamError::Config(_) => ApiError::Internal(upstream.to_string()),
            },
        }
    }
}

impl From<UpstreamError> for ApiError {
    fn from(error: UpstreamError) -> Self {
        CatalogError::from(error).into()
    }
}

impl From<JsonRejection> for ApiError {
    /// Unparseable or mistyped bodies are plain bad requests; content-type
    /// and size rejections keep their own status.
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(e) => ApiError::BadRequest(e.body_text()),
            JsonRejection::JsonSyntaxError(e) => ApiError::BadRequest(e.body_text()),
            other => ApiError::Rejected(other.status(), other.body_text()),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Rejected(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Validation(errors) => {
                tracing::debug!(status = status.as_u16(), ?errors, "Validation failed");
                json!({ "errors": errors })
            }
            ApiError::BadRequest(message)
            | ApiError::NotFound(message)
            | ApiError::RequestTimeout(message)
            | ApiError::BadGateway(message)
            | ApiError::ServiceUnavailable(message)
            | ApiError::Internal(message)
            | ApiError::Rejected(_, message) => {
                if status.is_server_error() {
                    tracing::error!(status = status.as_u16(), error = %message, "Request failed");
                } else {
                    tracing::debug!(status = status.as_u16(), error = %message, "Request rejected");
                }
                json!({ "error": message })
            }
        };
        (status, Json(body)).into_response()
    }
}
