//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_proxy_requests_total` (counter): proxied requests by method, status
//! - `gateway_proxy_request_duration_seconds` (histogram): time to response head
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one proxied request.
pub fn record_request(method: &str, status: u16, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("status", status.to_string()),
    ];
    ::metrics::counter!("gateway_proxy_requests_total", &labels).increment(1);
    ::metrics::histogram!("gateway_proxy_request_duration_seconds", &labels)
        .record(start.elapsed().as_secs_f64());
}
