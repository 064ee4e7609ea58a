//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define router metrics (requests, latency, group expansions)
//! - Expose a Prometheus-compatible scrape endpoint
//!
//! # Metrics
//! - `router_requests_total` (counter): requests by method, status
//! - `router_request_duration_seconds` (histogram): latency by method, status
//! - `router_group_expansions_total` (counter): group sources loaded, by type
//!
//! # Design Decisions
//! - Recording without an installed recorder is a no-op, so the routing
//!   core records unconditionally
//! - Labels are low-cardinality: no URIs, no handler names

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

pub const REQUESTS_TOTAL: &str = "router_requests_total";
pub const REQUEST_DURATION_SECONDS: &str = "router_request_duration_seconds";
pub const GROUP_EXPANSIONS_TOTAL: &str = "router_group_expansions_total";

/// Install the Prometheus recorder and its HTTP listener on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint started");
    Ok(())
}

/// Record one answered request.
pub fn record_request(method: &str, status: u16, start: Instant) {
    counter!(
        REQUESTS_TOTAL,
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!(
        REQUEST_DURATION_SECONDS,
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record one group source expanded during dispatch.
pub fn record_group_expansion(source_type: &str) {
    counter!(GROUP_EXPANSIONS_TOTAL, "type" => source_type.to_string()).increment(1);
}
