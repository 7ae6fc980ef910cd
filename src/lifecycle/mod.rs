//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Resolve services → Build host routes → Start listener
//!
//! Shutdown (shutdown.rs):
//!     Ctrl+C received → Stop accepting → Drain connections → Exit
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then routes, then listener
//! - No route or host changes after startup

pub mod shutdown;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{build_server, StartupError};
