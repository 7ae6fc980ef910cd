//! Startup orchestration.
//!
//! # Responsibilities
//! - Resolve configured hosts against the service catalog
//! - Run host route setup with the caller's mount hooks
//! - Hand the finished router to the HTTP server
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal, nothing is served
//! - Listeners are bound by the caller, after setup succeeded

use thiserror::Error;

use crate::config::ServerConfig;
use crate::http::HttpServer;
use crate::routing::{CatalogError, HostRouterBuilder, ServiceCatalog, SetupError};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Setup(#[from] SetupError),
}

/// Build the server for `config`.
///
/// `customize` receives the preloaded builder, typically to add mount hooks.
pub fn build_server<F>(
    config: ServerConfig,
    catalog: &ServiceCatalog,
    customize: F,
) -> Result<HttpServer, StartupError>
where
    F: FnOnce(HostRouterBuilder) -> HostRouterBuilder,
{
    let builder = customize(catalog.builder(&config.routing)?);
    let routes = builder.build()?;

    tracing::info!(
        hosts = config.routing.hosts.len(),
        generic_hosts = config.routing.generic_hosts.len(),
        "Startup complete"
    );
    Ok(HttpServer::new(config, routes))
}
