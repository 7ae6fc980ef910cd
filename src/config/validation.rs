//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses and value ranges
//! - Detect prefixes that would collide on generic hosts
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Duplicate hosts are allowed; the last one wins at setup, and prefix
//!   checks only see that last registration, exactly as setup does

use std::collections::HashMap;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ServerConfig;
use crate::routing::registry::{is_valid_prefix, last_registrations};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid listener bind address '{0}'")]
    BindAddress(String),

    #[error("invalid metrics address '{0}'")]
    MetricsAddress(String),

    #[error("request timeout must be greater than zero")]
    ZeroTimeout,

    #[error("hosts[{index}]: host must not be empty")]
    EmptyHost { index: usize },

    #[error("hosts[{index}]: service must not be empty")]
    EmptyService { index: usize },

    #[error("hosts[{index}]: prefix '{prefix}' must be a single path segment")]
    InvalidPrefix { index: usize, prefix: String },

    #[error("prefix '{prefix}' is used by both {first} and {second}")]
    DuplicatePrefix {
        prefix: String,
        first: String,
        second: String,
    },

    #[error("generic_hosts[{index}]: host must not be empty")]
    EmptyGenericHost { index: usize },

    #[error("generic_hosts[{index}]: {host} is also configured under hosts")]
    GenericHostConflict { index: usize, host: String },
}

pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    for (index, host) in config.routing.hosts.iter().enumerate() {
        if host.host.is_empty() {
            errors.push(ValidationError::EmptyHost { index });
        }
        if host.service.is_empty() {
            errors.push(ValidationError::EmptyService { index });
        }
    }

    let mut prefixes: HashMap<&str, &str> = HashMap::new();
    for (index, host) in last_registrations(&config.routing.hosts, |h| h.host.as_str()) {
        let prefix = host.prefix.trim_matches('/');
        if prefix.is_empty() {
            continue;
        }
        if !is_valid_prefix(prefix) {
            errors.push(ValidationError::InvalidPrefix {
                index,
                prefix: host.prefix.clone(),
            });
        }
        if let Some(first) = prefixes.insert(prefix, &host.host) {
            errors.push(ValidationError::DuplicatePrefix {
                prefix: prefix.to_string(),
                first: first.to_string(),
                second: host.host.clone(),
            });
        }
    }

    for (index, host) in config.routing.generic_hosts.iter().enumerate() {
        if host.is_empty() {
            errors.push(ValidationError::EmptyGenericHost { index });
        } else if config.routing.hosts.iter().any(|h| h.host == *host) {
            errors.push(ValidationError::GenericHostConflict {
                index,
                host: host.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
