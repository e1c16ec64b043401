//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_token_requests_total` (counter): token requests by outcome
//!   (`granted`, `client_header`, `origin`, `rate_limited`)
//! - `relay_token_request_duration_seconds` (histogram): gate latency
//!
//! Without an installed recorder the `metrics` macros are no-ops, so tests and
//! deployments with `metrics_enabled = false` pay nothing.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

pub const TOKEN_REQUESTS_TOTAL: &str = "relay_token_requests_total";
pub const TOKEN_REQUEST_DURATION: &str = "relay_token_request_duration_seconds";

/// Install the Prometheus recorder and serve it on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record the outcome of one token request.
pub fn record_token_request(outcome: &'static str, start: Instant) {
    counter!(TOKEN_REQUESTS_TOTAL, "outcome" => outcome).increment(1);
    histogram!(TOKEN_REQUEST_DURATION, "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}
