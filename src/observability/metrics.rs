//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define service metrics (RPS, latency, upstream outcomes, store size)
//! - Expose Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `catalog_requests_total` (counter): inbound requests by method, status
//! - `catalog_request_duration_seconds` (histogram): inbound latency
//! - `catalog_upstream_requests_total` (counter): upstream calls by endpoint, outcome
//! - `catalog_upstream_duration_seconds` (histogram): upstream latency by endpoint
//! - `catalog_local_products` (gauge): local store size
//!
//! Recording is a no-op until a recorder is installed.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape endpoint.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record a completed inbound request.
pub fn record_request(method: &str, status: u16, start: Instant) {
    counter!(
        "catalog_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("catalog_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

/// Record a finished upstream call.
pub fn record_upstream_call(endpoint: &'static str, outcome: &'static str, start: Instant) {
    counter!(
        "catalog_upstream_requests_total",
        "endpoint" => endpoint,
        "outcome" => outcome
    )
    .increment(1);
    histogram!("catalog_upstream_duration_seconds", "endpoint" => endpoint)
        .record(start.elapsed().as_secs_f64());
}

/// Record the current size of the local product store.
pub fn record_local_products(count: usize) {
    gauge!("catalog_local_products").set(count as f64);
}
