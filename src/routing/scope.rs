//! Mount points and the route installers registered onto them.
//!
//! # Responsibilities
//! - Bind a routing context to a host (and optionally a path prefix)
//! - Join route paths onto the scope prefix
//! - Register per-scope fallbacks
//!
//! # Design Decisions
//! - A nested scope borrows its parent's router; all routes of one host land
//!   in a single `axum::Router`
//! - The root route of a nested scope answers with and without a trailing
//!   slash (`/1` and `/1/`)

use axum::{
    handler::Handler,
    routing::{any, MethodRouter},
    BoxError, Router,
};

/// Route table for one host, under construction.
#[derive(Default)]
pub(crate) struct MountPoint {
    pub(crate) router: Router,
    pub(crate) has_fallback: bool,
}

/// A routing context bound to a host and a path prefix.
///
/// Handed to [`HandlerSet::install`] and [`MountHook::on_mount`].
pub struct Scope<'a> {
    host: &'a str,
    prefix: String,
    mount: &'a mut MountPoint,
}

impl<'a> Scope<'a> {
    pub(crate) fn root(host: &'a str, mount: &'a mut MountPoint) -> Self {
        Self {
            host,
            prefix: String::new(),
            mount,
        }
    }

    /// Host this scope is bound to.
    pub fn host(&self) -> &str {
        self.host
    }

    /// Path prefix of this scope, `""` for the host root.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Register a method router at `path`, relative to this scope.
    pub fn route(&mut self, path: &str, method_router: MethodRouter) -> &mut Self {
        for full_path in join_paths(&self.prefix, path) {
            tracing::trace!(host = %self.host, path = %full_path, "Registering route");
            let router = std::mem::take(&mut self.mount.router);
            self.mount.router = router.route(&full_path, method_router.clone());
        }
        self
    }

    /// Register the handler answering admitted requests that match no route.
    ///
    /// On a host-level scope this is the host router's fallback; on a nested
    /// scope it catches everything below the prefix.
    pub fn fallback<H, T>(&mut self, handler: H) -> &mut Self
    where
        H: Handler<T, ()>,
        T: 'static,
    {
        let router = std::mem::take(&mut self.mount.router);
        if self.prefix.is_empty() {
            self.mount.router = router.fallback(handler);
            self.mount.has_fallback = true;
        } else {
            let catch_all = format!("{}/{{*rest}}", self.prefix);
            self.mount.router = router.route(&catch_all, any(handler));
        }
        self
    }

    /// Open a nested scope at `/<prefix>` below this one.
    pub fn group(&mut self, prefix: &str) -> Scope<'_> {
        let segment = prefix.trim_matches('/');
        let prefix = if segment.is_empty() {
            self.prefix.clone()
        } else {
            format!("{}/{}", self.prefix, segment)
        };
        Scope {
            host: self.host,
            prefix,
            mount: &mut *self.mount,
        }
    }
}

/// Installs one host's routes onto a mount point.
///
/// Implemented for any `Fn(&mut Scope<'_>)`, so plain functions can be used
/// as handler sets.
pub trait HandlerSet: Send + Sync + 'static {
    fn install(&self, scope: &mut Scope<'_>);
}

impl<F> HandlerSet for F
where
    F: Fn(&mut Scope<'_>) + Send + Sync + 'static,
{
    fn install(&self, scope: &mut Scope<'_>) {
        self(scope)
    }
}

/// Per-mount configuration applied after a host-level scope is populated.
///
/// Typical use is registering a custom unmatched-route fallback.
pub trait MountHook: Send + Sync + 'static {
    fn on_mount(&self, host: &str, scope: &mut Scope<'_>) -> Result<(), BoxError>;
}

impl<F> MountHook for F
where
    F: Fn(&str, &mut Scope<'_>) -> Result<(), BoxError> + Send + Sync + 'static,
{
    fn on_mount(&self, host: &str, scope: &mut Scope<'_>) -> Result<(), BoxError> {
        self(host, scope)
    }
}

/// Full router paths for `path` registered under `prefix`.
fn join_paths(prefix: &str, path: &str) -> Vec<String> {
    let is_root = path.is_empty() || path == "/";
    match (prefix.is_empty(), is_root) {
        (true, true) => vec!["/".to_string()],
        (false, true) => vec![prefix.to_string(), format!("{}/", prefix)],
        (_, false) if path.starts_with('/') => vec![format!("{}{}", prefix, path)],
        (_, false) => vec![format!("{}/{}", prefix, path)],
    }
}
