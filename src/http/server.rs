//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Wrap the host router with the HTTP middleware stack
//! - Wire up tracing, request IDs and the request timeout
//! - Turn a panicking handler into a 500 instead of a dropped connection
//! - Bind server to listener and serve until shutdown

use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::routing::HostRouter;

/// HTTP server for the host-routed application.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
}

impl HttpServer {
    /// Create a new HTTP server serving `routes`.
    pub fn new(config: ServerConfig, routes: HostRouter) -> Self {
        let router = Self::build_router(&config, routes);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// The host guard installed by `HostRouter` stays innermost of these
    /// layers and outermost of dispatch.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, routes: HostRouter) -> Router {
        routes
            .into_router()
            .layer(CatchPanicLayer::new())
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// The fully layered router, for serving without a listener.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}
