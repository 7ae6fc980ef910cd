//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the server.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Virtual hosts, generic hosts and the unknown-host policy.
    pub routing: RoutingConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

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

/// Host routing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Reject requests whose host is neither configured nor generic.
    pub reject_unknown_hosts: bool,

    /// Hosts that serve every prefixed host under `/<prefix>`.
    pub generic_hosts: Vec<String>,

    /// Specifically configured virtual hosts, in mount order.
    pub hosts: Vec<HostConfig>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            reject_unknown_hosts: true,
            generic_hosts: Vec::new(),
            hosts: Vec::new(),
        }
    }
}

/// One virtual host.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HostConfig {
    /// Exact host header value to serve.
    pub host: String,

    /// Path segment exposing this host on generic hosts; empty disables it.
    #[serde(default)]
    pub prefix: String,

    /// Name of the registered service providing the routes.
    pub service: String,
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub log_format: LogFormat,

    /// Expose Prometheus metrics.
    pub metrics_enabled: bool,

    /// Metrics endpoint address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
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
        let config = ServerConfig::default();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert!(config.routing.reject_unknown_hosts);
        assert!(config.routing.hosts.is_empty());
        assert_eq!(config.timeouts.request_secs, 30);
        assert_eq!(config.observability.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_parse_routing_section() {
        let config: ServerConfig = toml::from_str(
            r#"
            [routing]
            reject_unknown_hosts = false
            generic_hosts = ["host3.com", "host4.com"]

            [[routing.hosts]]
            host = "host1.com"
            prefix = "1"
            service = "hello"

            [[routing.hosts]]
            host = "internal.com"
            service = "status"

            [observability]
            log_format = "json"
            "#,
        )
        .unwrap();

        assert!(!config.routing.reject_unknown_hosts);
        assert_eq!(config.routing.generic_hosts, vec!["host3.com", "host4.com"]);
        assert_eq!(config.routing.hosts.len(), 2);
        assert_eq!(config.routing.hosts[0].prefix, "1");
        assert_eq!(config.routing.hosts[1].prefix, "");
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
    }
}
