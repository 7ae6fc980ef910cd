//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ServerConfig (validated, immutable)
//!     → routing::catalog turns host configs into host entries
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup; there is no runtime host registration
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{HostConfig, ListenerConfig, RoutingConfig, ServerConfig};
