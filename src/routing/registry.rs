//! Host registration and generic-host expansion.
//!
//! # Responsibilities
//! - Build one route table per configured host from its handler set
//! - Mount every prefixed handler set again under each generic host
//! - Apply mount hooks at every host-level mount point, fail-fast
//! - Collect the known host set for the host guard
//!
//! # Design Decisions
//! - Setup runs once and yields an immutable `HostRouter`
//! - A failing hook aborts before anything is returned, so no guard ever sees
//!   a partial known host set
//! - Duplicate prefixes are rejected up front instead of leaving the winner to
//!   path-matching precedence
//! - A generic host may not share its name with a host entry: one table per
//!   host, never a silent replacement

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use axum::BoxError;
use thiserror::Error;

use crate::routing::dispatcher::HostRouter;
use crate::routing::scope::{HandlerSet, MountHook, MountPoint, Scope};
use crate::security::host_guard::KnownHosts;

/// Errors raised while building the host router.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("mount hook failed for host {host}: {source}")]
    Hook {
        host: String,
        #[source]
        source: BoxError,
    },

    #[error("prefix '{prefix}' is used by both {first} and {second}")]
    DuplicatePrefix {
        prefix: String,
        first: String,
        second: String,
    },

    #[error("invalid prefix '{prefix}' for host {host}: must be a single path segment")]
    InvalidPrefix { host: String, prefix: String },

    #[error("generic host {host} is also configured as a host entry")]
    GenericHostConflict { host: String },
}

/// One specifically configured virtual host.
#[derive(Clone)]
pub struct HostEntry {
    host: String,
    prefix: String,
    handler_set: Arc<dyn HandlerSet>,
}

impl HostEntry {
    /// A host reachable only through its own hostname.
    pub fn new(host: impl Into<String>, handler_set: impl HandlerSet) -> Self {
        Self {
            host: host.into(),
            prefix: String::new(),
            handler_set: Arc::new(handler_set),
        }
    }

    /// Share an already boxed handler set.
    pub fn from_shared(host: impl Into<String>, handler_set: Arc<dyn HandlerSet>) -> Self {
        Self {
            host: host.into(),
            prefix: String::new(),
            handler_set,
        }
    }

    /// Also expose this host's routes under `/<prefix>` on every generic host.
    ///
    /// Surrounding slashes are trimmed; an empty prefix disables the exposure.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into().trim_matches('/').to_string();
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl fmt::Debug for HostEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostEntry")
            .field("host", &self.host)
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

/// Collects host entries, generic hosts and hooks, then builds a [`HostRouter`].
#[derive(Default)]
pub struct HostRouterBuilder {
    entries: Vec<HostEntry>,
    generic_hosts: Vec<String>,
    reject_unknown_hosts: bool,
    hooks: Vec<Box<dyn MountHook>>,
}

impl HostRouterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn host(mut self, entry: HostEntry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn hosts(mut self, entries: impl IntoIterator<Item = HostEntry>) -> Self {
        self.entries.extend(entries);
        self
    }

    pub fn generic_host(mut self, host: impl Into<String>) -> Self {
        self.generic_hosts.push(host.into());
        self
    }

    pub fn generic_hosts<I, H>(mut self, hosts: I) -> Self
    where
        I: IntoIterator<Item = H>,
        H: Into<String>,
    {
        self.generic_hosts.extend(hosts.into_iter().map(Into::into));
        self
    }

    /// Reject requests whose host is neither configured nor generic.
    pub fn reject_unknown_hosts(mut self, enabled: bool) -> Self {
        self.reject_unknown_hosts = enabled;
        self
    }

    /// Append a hook run at every host-level mount point, in registration order.
    pub fn mount_hook(mut self, hook: impl MountHook) -> Self {
        self.hooks.push(Box::new(hook));
        self
    }

    /// Register every host, expand onto generic hosts and build the router.
    pub fn build(self) -> Result<HostRouter, SetupError> {
        if let Some(host) = self
            .generic_hosts
            .iter()
            .find(|g| self.entries.iter().any(|e| e.host == **g))
        {
            return Err(SetupError::GenericHostConflict { host: host.clone() });
        }

        let exposed: Vec<&HostEntry> = last_registrations(&self.entries, |e| e.host.as_str())
            .map(|(_, entry)| entry)
            .filter(|entry| !entry.prefix.is_empty())
            .collect();
        validate_prefixes(&exposed)?;

        let mut mounts: HashMap<String, MountPoint> = HashMap::new();
        let mut known = self.reject_unknown_hosts.then(Vec::new);

        for entry in &self.entries {
            let mut mount = MountPoint::default();
            {
                let mut scope = Scope::root(&entry.host, &mut mount);
                entry.handler_set.install(&mut scope);
                tracing::debug!(host = %entry.host, "Mounted host routes");
                run_hooks(&self.hooks, &entry.host, &mut scope)?;
            }
            if let Some(known) = known.as_mut() {
                known.push(entry.host.clone());
            }
            if mounts.insert(entry.host.clone(), mount).is_some() {
                tracing::warn!(host = %entry.host, "Host registered twice, keeping the last registration");
            }
        }

        for generic_host in &self.generic_hosts {
            let mut mount = MountPoint::default();
            {
                let mut scope = Scope::root(generic_host, &mut mount);
                for entry in &exposed {
                    let mut nested = scope.group(&entry.prefix);
                    entry.handler_set.install(&mut nested);
                    tracing::debug!(
                        generic_host = %generic_host,
                        host = %entry.host,
                        prefix = %entry.prefix,
                        "Mounted prefixed routes on generic host"
                    );
                }
                run_hooks(&self.hooks, generic_host, &mut scope)?;
            }
            if let Some(known) = known.as_mut() {
                known.push(generic_host.clone());
            }
            if mounts.insert(generic_host.clone(), mount).is_some() {
                tracing::warn!(host = %generic_host, "Generic host listed twice, keeping the last registration");
            }
        }

        tracing::info!(
            hosts = self.entries.len(),
            generic_hosts = self.generic_hosts.len(),
            reject_unknown_hosts = self.reject_unknown_hosts,
            "Host routes configured"
        );

        Ok(HostRouter::new(mounts, known.map(KnownHosts::from_iter)))
    }
}

fn run_hooks(
    hooks: &[Box<dyn MountHook>],
    host: &str,
    scope: &mut Scope<'_>,
) -> Result<(), SetupError> {
    for hook in hooks {
        hook.on_mount(host, scope).map_err(|source| SetupError::Hook {
            host: host.to_string(),
            source,
        })?;
    }
    Ok(())
}

/// The last registration of every host with its index, in input order.
///
/// Earlier registrations of a host are shadowed by later ones; only the
/// survivors are expanded onto generic hosts or checked for prefix clashes.
/// Config validation applies the same rule.
pub(crate) fn last_registrations<'a, T, F>(
    items: &'a [T],
    host_of: F,
) -> impl Iterator<Item = (usize, &'a T)> + 'a
where
    F: Fn(&T) -> &str + 'a,
{
    items.iter().enumerate().filter(move |&(i, item)| {
        let host = host_of(item);
        !items[i + 1..].iter().any(|later| host_of(later) == host)
    })
}

/// Check that every prefix is a single, unique path segment.
fn validate_prefixes(entries: &[&HostEntry]) -> Result<(), SetupError> {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for entry in entries {
        if !is_valid_prefix(&entry.prefix) {
            return Err(SetupError::InvalidPrefix {
                host: entry.host.clone(),
                prefix: entry.prefix.clone(),
            });
        }
        if let Some(first) = seen.insert(&entry.prefix, &entry.host) {
            return Err(SetupError::DuplicatePrefix {
                prefix: entry.prefix.clone(),
                first: first.to_string(),
                second: entry.host.clone(),
            });
        }
    }
    Ok(())
}

pub(crate) fn is_valid_prefix(prefix: &str) -> bool {
    !prefix.contains(['/', '{', '}', '*'])
}
