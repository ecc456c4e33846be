//! Metrics collection and exposition.
//!
//! # Metrics
//! - `mocksmith_requests_total` (counter): dispatched requests by method, status
//! - `mocksmith_reloads_total` (counter): published route tables
//! - `mocksmith_endpoints` (gauge): endpoints in the latest configuration

use std::net::SocketAddr;

use axum::http::Method;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Label for client-chosen methods outside the standard set.
pub const OTHER_METHOD: &str = "OTHER";

const STANDARD_METHODS: [Method; 9] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::PATCH,
    Method::HEAD,
    Method::OPTIONS,
    Method::CONNECT,
    Method::TRACE,
];

/// Start the Prometheus scrape endpoint. Must run inside the Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_request(method: &str, status: u16) {
    metrics::counter!(
        "mocksmith_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Label for a request method that did not match a route.
///
/// Extension methods collapse to [`OTHER_METHOD`] so clients cannot grow the
/// series count.
pub fn method_label(method: &Method) -> &str {
    if STANDARD_METHODS.contains(method) {
        method.as_str()
    } else {
        OTHER_METHOD
    }
}

pub fn record_reload(endpoints: usize) {
    metrics::counter!("mocksmith_reloads_total").increment(1);
    record_endpoints(endpoints);
}

pub fn record_endpoints(endpoints: usize) {
    metrics::gauge!("mocksmith_endpoints").set(endpoints as f64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_label_bounded() {
        assert_eq!(method_label(&Method::GET), "GET");
        assert_eq!(method_label(&Method::PATCH), "PATCH");

        for raw in ["FOO1", "FOO2", "PURGE"] {
            let method = Method::from_bytes(raw.as_bytes()).unwrap();
            assert_eq!(method_label(&method), OTHER_METHOD);
        }
    }
}
