//! Named handler sets for config-driven setup.
//!
//! Host configs refer to their routes by service name; the catalog resolves
//! those names to handler sets registered in code.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::config::schema::RoutingConfig;
use crate::routing::registry::{HostEntry, HostRouterBuilder};
use crate::routing::scope::HandlerSet;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("host {host} refers to unknown service '{service}'")]
    UnknownService { host: String, service: String },
}

#[derive(Default, Clone)]
pub struct ServiceCatalog {
    services: HashMap<String, Arc<dyn HandlerSet>>,
}

impl ServiceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler_set` under `name`, replacing any previous one.
    pub fn register(mut self, name: impl Into<String>, handler_set: impl HandlerSet) -> Self {
        self.services.insert(name.into(), Arc::new(handler_set));
        self
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn HandlerSet>> {
        self.services.get(name).cloned()
    }

    /// Resolve every host config to a host entry, in config order.
    pub fn host_entries(&self, routing: &RoutingConfig) -> Result<Vec<HostEntry>, CatalogError> {
        routing
            .hosts
            .iter()
            .map(|host| -> Result<HostEntry, CatalogError> {
                let handler_set = self.get(&host.service).ok_or_else(|| {
                    CatalogError::UnknownService {
                        host: host.host.clone(),
                        service: host.service.clone(),
                    }
                })?;
                Ok(HostEntry::from_shared(host.host.clone(), handler_set)
                    .with_prefix(host.prefix.clone()))
            })
            .collect()
    }

    /// A builder preloaded with the hosts, generic hosts and policy of `routing`.
    pub fn builder(&self, routing: &RoutingConfig) -> Result<HostRouterBuilder, CatalogError> {
        Ok(HostRouterBuilder::new()
            .hosts(self.host_entries(routing)?)
            .generic_hosts(routing.generic_hosts.iter().cloned())
            .reject_unknown_hosts(routing.reject_unknown_hosts))
    }
}
