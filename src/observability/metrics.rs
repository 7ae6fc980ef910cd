//! Metrics collection and exposition.
//!
//! # Metrics
//! - `vhost_requests_total` (counter): dispatched requests by configured host
//!   (`<unknown>` for hosts without a route table), status
//! - `vhost_unknown_host_rejections_total` (counter): requests stopped by the host guard
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; without an installed recorder
//!   every call is a no-op
//! - Prometheus exporter is optional and bound to its own address

use std::net::SocketAddr;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_request(host: &str, status: u16) {
    ::metrics::counter!(
        "vhost_requests_total",
        "host" => host.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

pub fn record_unknown_host() {
    ::metrics::counter!("vhost_unknown_host_rejections_total").increment(1);
}
