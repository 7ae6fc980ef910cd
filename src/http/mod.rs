//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, tracing, timeout)
//!     → request.rs (declared host extraction)
//!     → [host guard admits or rejects]
//!     → [host dispatch + path matching]
//!     → response.rs (unknown host / not found bodies)
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::declared_host;
pub use server::HttpServer;
