//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → host_guard.rs (reject hosts outside the known host set)
//!     → Pass to host dispatch
//! ```
//!
//! # Design Decisions
//! - Fail closed: a missing host is unknown when enforcing
//! - The known host set is frozen at setup

pub mod host_guard;

pub use host_guard::{HostGuard, KnownHosts};
