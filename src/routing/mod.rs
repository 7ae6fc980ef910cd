//! Host-based routing subsystem.
//!
//! # Data Flow
//! ```text
//! Setup (once, at startup):
//!     HostEntry[] + generic hosts + policy
//!     → registry.rs (mount each handler set on its host, fail-fast hooks)
//!     → registry.rs (expand prefixed handler sets onto generic hosts)
//!     → dispatcher.rs (freeze per-host route tables + known host set)
//!
//! Incoming Request (host, path):
//!     → security::host_guard (admit or reject by host)
//!     → dispatcher.rs (pick the host's route table)
//!     → axum path matching within that table
//! ```
//!
//! # Design Decisions
//! - Routes built at startup, immutable at runtime
//! - Exact host-string matching only
//! - Path matching is left to axum

pub mod catalog;
pub mod dispatcher;
pub mod registry;
pub mod scope;

pub use catalog::{CatalogError, ServiceCatalog};
pub use dispatcher::HostRouter;
pub use registry::{HostEntry, HostRouterBuilder, SetupError};
pub use scope::{HandlerSet, MountHook, Scope};
