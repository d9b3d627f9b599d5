//! Metrics collection and exposition.
//!
//! # Metrics
//! - `router_requests_total` (counter): requests by route name and status
//! - `router_request_duration_seconds` (histogram): time spent matching and dispatching
//! - `router_dispatch_errors_total` (counter): dispatch failures by kind
//! - `router_routes` (gauge): routes in the active table
//!
//! # Design Decisions
//! - Unnamed routes and no-match are labelled `unnamed` and `none`
//! - Recording without an installed exporter is a no-op

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => {
            tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter")
        }
    }
}

/// Record one handled request.
pub fn record_request(route: Option<&str>, matched: bool, status: u16, start: Instant) {
    let route = match (matched, route) {
        (false, _) => "none".to_string(),
        (true, Some(name)) => name.to_string(),
        (true, None) => "unnamed".to_string(),
    };
    counter!("router_requests_total", "route" => route, "status" => status.to_string())
        .increment(1);
    histogram!("router_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

/// Record a failed dispatch.
pub fn record_dispatch_error(kind: &'static str) {
    counter!("router_dispatch_errors_total", "kind" => kind).increment(1);
}

/// Record the size of the active route table.
pub fn record_route_count(count: usize) {
    gauge!("router_routes").set(count as f64);
}
