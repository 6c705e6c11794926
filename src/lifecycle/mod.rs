//! Lifecycle management.
//!
//! # Data Flow
//! ```text
//! Shutdown (shutdown.rs):
//!     Signal received → router run loop exits → active view torn down
//!
//! Signals (signals.rs):
//!     Ctrl-C → trigger shutdown
//! ```
//!
//! # Design Decisions
//! - One broadcast channel; every long-running task subscribes
//! - The router drains the active view's teardown before returning, so a
//!   realtime subscription never outlives the application

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
