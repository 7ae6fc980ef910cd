//! Host lookup and dispatch.
//!
//! # Responsibilities
//! - Hold the finished route table of every host scope
//! - Pick the table for the request's declared host
//! - Hand the request to that table for ordinary path matching
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(1) host lookup via HashMap, exact string match
//! - Hosts without a table fall through to a default router that only
//!   answers "not found"

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware,
    response::Response,
    Router,
};
use tower::ServiceExt;

use crate::http::request::declared_host;
use crate::http::response::route_not_found;
use crate::observability::metrics;
use crate::routing::scope::MountPoint;
use crate::security::host_guard::{host_guard_middleware, HostGuard, KnownHosts};

/// The built host-based router: per-host route tables plus the admission guard.
pub struct HostRouter {
    tables: Arc<HashMap<String, Router>>,
    known_hosts: Option<Arc<KnownHosts>>,
}

impl HostRouter {
    pub(crate) fn new(mounts: HashMap<String, MountPoint>, known_hosts: Option<KnownHosts>) -> Self {
        let tables = mounts
            .into_iter()
            .map(|(host, mount)| {
                let router = if mount.has_fallback {
                    mount.router
                } else {
                    mount.router.fallback(route_not_found)
                };
                (host, router)
            })
            .collect();

        Self {
            tables: Arc::new(tables),
            known_hosts: known_hosts.map(Arc::new),
        }
    }

    /// Hosts the guard admits, `None` when unknown hosts are not rejected.
    pub fn known_hosts(&self) -> Option<&KnownHosts> {
        self.known_hosts.as_deref()
    }

    /// Hosts that own a route table.
    pub fn hosts(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Assemble the axum router: host guard outermost, then host dispatch.
    pub fn into_router(self) -> Router {
        let guard = HostGuard::new(self.known_hosts);
        let dispatcher = Dispatcher {
            tables: self.tables,
            default: Router::new().fallback(route_not_found),
        };

        Router::new()
            .fallback(dispatch)
            .with_state(dispatcher)
            .layer(middleware::from_fn_with_state(guard, host_guard_middleware))
    }
}

#[derive(Clone)]
struct Dispatcher {
    tables: Arc<HashMap<String, Router>>,
    default: Router,
}

/// Metrics label for requests answered by the default router.
pub(crate) const UNKNOWN_HOST_LABEL: &str = "<unknown>";

impl Dispatcher {
    /// The route table for `host` and the configured host it belongs to.
    ///
    /// The label is always a configured host or [`UNKNOWN_HOST_LABEL`], never
    /// the raw client value.
    fn table_for(&self, host: Option<&str>) -> (String, Router) {
        match host.and_then(|h| self.tables.get_key_value(h)) {
            Some((key, table)) => (key.clone(), table.clone()),
            None => (UNKNOWN_HOST_LABEL.to_string(), self.default.clone()),
        }
    }
}

async fn dispatch(State(dispatcher): State<Dispatcher>, request: Request<Body>) -> Response {
    let (label, table) = dispatcher.table_for(declared_host(&request));

    let response = match table.oneshot(request).await {
        Ok(response) => response,
        Err(never) => match never {},
    };

    metrics::record_request(&label, response.status().as_u16());
    response
}
