//! Host-based HTTP dispatch for axum.
//!
//! Routes each request to the handler set of its virtual host, exposes
//! prefixed handler sets on generic hosts, and rejects unknown hosts before
//! any path matching.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod security;
pub mod services;

pub use config::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{HandlerSet, HostEntry, HostRouter, HostRouterBuilder, MountHook, Scope, SetupError};
