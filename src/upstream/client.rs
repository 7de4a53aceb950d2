//! Catalog API client with timeout and error handling.
//!
//! # Responsibilities
//! - Issue GET requests against the configured base URL
//! - Deserialize JSON bodies into upstream record types
//! - Classify failures (status, transport, deadline, decode)
//!
//! Every call is a single attempt bounded by the configured deadline.

use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use tokio::time::timeout;
use url::Url;

use crate::config::UpstreamConfig;
use crate::observability::metrics;
use crate::upstream::types::{ExternalProduct, UpstreamError, UpstreamResult};

/// HTTP client for the upstream catalog API.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: Url,
    /// Deadline for a whole call, headers and body.
    timeout_duration: Duration,
}

impl CatalogClient {
    /// Create a new client.
    ///
    /// The base URL always ends up with a trailing slash so relative joins
    /// keep any path prefix it carries.
    pub fn new(config: &UpstreamConfig) -> UpstreamResult<Self> {
        let mut raw = config.base_url.clone();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let base_url = Url::parse(&raw).map_err(|e| {
            UpstreamError::Config(format!("invalid base URL '{}': {}", config.base_url, e))
        })?;

        let mut builder =
            reqwest::Client::builder().connect_timeout(Duration::from_secs(config.connect_timeout_secs));
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let http = builder
            .build()
            .map_err(|e| UpstreamError::Config(e.to_string()))?;

        tracing::info!(base_url = %base_url, "Catalog client initialized");

        Ok(Self {
            http,
            base_url,
            timeout_duration: Duration::from_secs(config.request_timeout_secs),
        })
    }

    /// The normalized base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch the full upstream product listing.
    ///
    /// An empty listing (or a `null` body) is reported as [`UpstreamError::NotFound`].
    pub async fn list_products(&self) -> UpstreamResult<Vec<ExternalProduct>> {
        let products: Option<Vec<ExternalProduct>> = self.get_json("products", "products").await?;
        match products {
            Some(products) if !products.is_empty() => Ok(products),
            _ => Err(UpstreamError::NotFound),
        }
    }

    /// Fetch a single upstream product.
    pub async fn get_product(&self, id: i64) -> UpstreamResult<ExternalProduct> {
        let path = format!("products/{}", id);
        let product: Option<ExternalProduct> = self.get_json(&path, "product").await?;
        product.ok_or(UpstreamError::Decode {
            path,
            reason: "body was null".to_string(),
        })
    }

    /// Fetch the upstream category names. A `null` body is an empty list.
    pub async fn list_categories(&self) -> UpstreamResult<Vec<String>> {
        let categories: Option<Vec<String>> =
            self.get_json("products/categories", "categories").await?;
        Ok(categories.unwrap_or_default())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        endpoint: &'static str,
    ) -> UpstreamResult<T> {
        let start = Instant::now();
        let result = match timeout(self.timeout_duration, self.fetch(path)).await {
            Ok(result) => result,
            Err(_) => Err(UpstreamError::Timeout(self.timeout_duration.as_secs())),
        };

        let outcome = match &result {
            Ok(_) => "ok",
            Err(UpstreamError::Status { .. }) => "status",
            Err(UpstreamError::Timeout(_)) => "timeout",
            Err(UpstreamError::Unavailable(_)) => "unavailable",
            Err(_) => "decode",
        };
        metrics::record_upstream_call(endpoint, outcome, start);

        match &result {
            Ok(_) => tracing::debug!(
                path = %path,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Upstream call succeeded"
            ),
            Err(e) => tracing::warn!(
                path = %path,
                outcome,
                error = %e,
                "Upstream call failed"
            ),
        }

        result
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> UpstreamResult<T> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| UpstreamError::Config(format!("cannot build URL for '{}': {}", path, e)))?;

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status {
                status,
                path: path.to_string(),
            });
        }

        let body = response.bytes().await.map_err(|e| self.classify(e))?;
        serde_json::from_slice(&body).map_err(|e| UpstreamError::Decode {
            path: path.to_string(),
            reason: e.to_string(),
        })
    }

    fn classify(&self, error: reqwest::Error) -> UpstreamError {
        if error.is_timeout() {
            UpstreamError::Timeout(self.timeout_duration.as_secs())
        } else {
            UpstreamError::Unavailable(error.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> UpstreamConfig {
        UpstreamConfig {
            base_url: base_url.to_string(),
            use_system_proxy: false,
            ..UpstreamConfig::default()
        }
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let client = CatalogClient::new(&config("http://127.0.0.1:9000/api")).unwrap();
        assert_eq!(client.base_url().as_str(), "http://127.0.0.1:9000/api/");
        assert_eq!(
            client.base_url().join("products/7").unwrap().as_str(),
            "http://127.0.0.1:9000/api/products/7"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let err = CatalogClient::new(&config("not a url")).unwrap_err();
        assert!(matches!(err, UpstreamError::Config(_)));
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_unavailable() {
        let addr = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };
        let client = CatalogClient::new(&config(&format!("http://{addr}/"))).unwrap();
        let err = client.list_categories().await.unwrap_err();
        assert!(matches!(err, UpstreamError::Unavailable(_)), "got {err:?}");
    }
}
