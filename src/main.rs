//! Host-routed HTTP server.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────────────┐
//!                     │                   VHOST ROUTER                       │
//!                     │                                                      │
//!   Client Request    │  ┌──────────┐   ┌────────────┐   ┌───────────────┐   │
//!   ──────────────────┼─▶│  http    │──▶│ host guard │──▶│  dispatcher   │   │
//!                     │  │ server   │   │ (security) │   │  (routing)    │   │
//!                     │  └──────────┘   └─────┬──────┘   └───────┬───────┘   │
//!                     │                       │ unknown host     │ per-host  │
//!                     │                       ▼                  ▼ router    │
//!   Client Response   │                 404 Unknown host   handler set route  │
//!   ◀─────────────────┼───────────────────────────────────────────────────────│
//!                     └──────────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use vhost_router::config::{load_config, ServerConfig};
use vhost_router::lifecycle::{build_server, Shutdown};
use vhost_router::observability::{logging, metrics};
use vhost_router::services;

#[derive(Parser)]
#[command(name = "vhost-router")]
#[command(about = "Serve handler sets per virtual host", long_about = None)]
struct Cli {
    /// TOML configuration file; defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Answer unmatched paths on known hosts with plain text instead of JSON.
    #[arg(long)]
    plain_not_found: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };

    logging::init(config.observability.log_format);
    tracing::info!("vhost-router v{} starting", env!("CARGO_PKG_VERSION"));

    if cli.config.is_none() {
        tracing::warn!("No configuration file given; no hosts are configured");
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
        hosts = config.routing.hosts.len(),
        generic_hosts = config.routing.generic_hosts.len(),
        reject_unknown_hosts = config.routing.reject_unknown_hosts,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let bind_address = config.listener.bind_address.clone();
    let plain_not_found = cli.plain_not_found;
    let server = build_server(config, &services::catalog(), |builder| {
        if plain_not_found {
            builder.mount_hook(services::plain_not_found)
        } else {
            builder
        }
    })?;

    let listener = TcpListener::bind(&bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    shutdown.trigger_on_ctrl_c();
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
