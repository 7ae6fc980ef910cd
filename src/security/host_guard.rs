//! Unknown-host rejection middleware.
//!
//! Runs before any path matching: a request whose declared host is not in the
//! known host set never reaches a handler, whatever its path.

use std::collections::HashSet;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::http::request::declared_host;
use crate::http::response::unknown_host;
use crate::observability::metrics;

/// Immutable set of admissible hostnames, computed once at setup.
///
/// Comparison is exact: no case folding, no port stripping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownHosts {
    hosts: HashSet<String>,
}

impl KnownHosts {
    pub fn contains(&self, host: &str) -> bool {
        self.hosts.contains(host)
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.hosts.iter().map(String::as_str)
    }
}

impl FromIterator<String> for KnownHosts {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            hosts: iter.into_iter().collect(),
        }
    }
}

/// Admission decision for inbound requests.
#[derive(Debug, Clone)]
pub struct HostGuard {
    /// `None` disables enforcement.
    known_hosts: Option<Arc<KnownHosts>>,
}

impl HostGuard {
    pub fn new(known_hosts: Option<Arc<KnownHosts>>) -> Self {
        Self { known_hosts }
    }

    /// A guard that admits every request.
    pub fn disabled() -> Self {
        Self { known_hosts: None }
    }

    pub fn is_enforcing(&self) -> bool {
        self.known_hosts.is_some()
    }

    /// Whether a request declaring `host` may proceed to dispatch.
    pub fn admits(&self, host: Option<&str>) -> bool {
        match &self.known_hosts {
            None => true,
            Some(known) => host.is_some_and(|h| known.contains(h)),
        }
    }
}

pub async fn host_guard_middleware(
    State(guard): State<HostGuard>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let host = declared_host(&request);
    if guard.admits(host) {
        return next.run(request).await;
    }

    tracing::debug!(
        host = host.unwrap_or("<none>"),
        path = %request.uri().path(),
        "Rejecting request for unknown host"
    );
    metrics::record_unknown_host();
    unknown_host().into_response()
}
