//! Metrics collection and exposition.
//!
//! # Metrics
//! - `skill_requests_total` (counter): dispatched requests by handler
//! - `skill_errors_total` (counter): error-boundary activations by kind
//! - `skill_request_duration_seconds` (histogram): pipeline latency by outcome

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::error::ErrorKind;

/// Start the Prometheus exporter on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_handler(handler: &'static str) {
    ::metrics::counter!("skill_requests_total", "handler" => handler).increment(1);
}

pub fn record_error(kind: ErrorKind) {
    ::metrics::counter!("skill_errors_total", "kind" => kind.as_str()).increment(1);
}

pub fn record_duration(outcome: &'static str, start: Instant) {
    ::metrics::histogram!("skill_request_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}
