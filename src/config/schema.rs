//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the catalog proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream catalog API settings.
    pub upstream: UpstreamConfig,

    /// Server-side timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Local product store settings.
    pub store: StoreConfig,

    /// Cross-origin settings for browser frontends.
    pub cors: CorsConfig,

    /// Request hardening.
    pub security: SecurityConfig,

    /// OpenAPI document and Swagger UI.
    pub docs: DocsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Upstream catalog API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the catalog API. Paths such as `products` are joined onto it.
    pub base_url: String,

    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Deadline for a whole upstream call (headers and body) in seconds.
    pub request_timeout_secs: u64,

    /// Honour `HTTP_PROXY`/`HTTPS_PROXY` from the environment.
    pub use_system_proxy: bool,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://fakestoreapi.com/".to_string(),
            connect_timeout_secs: 5,
            request_timeout_secs: 10,
            use_system_proxy: true,
        }
    }
}

/// Timeout configuration for inbound requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time to produce a response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Local product store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Start with the two demo products (ids 1 and 2).
    pub seed_demo_products: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            seed_demo_products: true,
        }
    }
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Origins allowed to call the API from a browser.
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://127.0.0.1:5500".to_string(),
                "http://localhost:5173".to_string(),
                "http://localhost:3000".to_string(),
            ],
        }
    }
}

/// Security hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 1024 * 1024, // 1MB
        }
    }
}

/// API documentation routes.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DocsConfig {
    /// Serve `/swagger/v1/swagger.json`, `/openapi.json` and `/swagger`.
    pub enabled: bool,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.upstream.base_url, "https://fakestoreapi.com/");
        assert!(config.store.seed_demo_products);
        assert_eq!(config.cors.allowed_origins.len(), 3);
        assert_eq!(config.observability.log_format, LogFormat::Pretty);
        assert!(config.docs.enabled);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [upstream]
            base_url = "http://127.0.0.1:9000/"

            [observability]
            log_format = "json"

            [docs]
            enabled = false
            "#,
        )
        .unwrap();

        assert_eq!(config.upstream.base_url, "http://127.0.0.1:9000/");
        assert_eq!(config.upstream.request_timeout_secs, 10);
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert_eq!(config.timeouts.request_secs, 30);
        assert!(!config.docs.enabled);
    }
}
