//! Router subsystem.
//!
//! # Data Flow
//! ```text
//! navigate(path) / host location change
//!     → location watch channel (coalesces to newest)
//!     → run loop → dispatch:
//!         effective path → redundant-dispatch guard → navigation guards
//!         → await previous teardown → resolve route
//!         → mount view (loading guard held) / redirect to default
//!     → store teardown for the next transition
//! ```
//!
//! # Design Decisions
//! - Dispatch runs to completion before the next notification is
//!   observed; it is never reentrant
//! - Notifications arriving mid-dispatch coalesce to the latest pending
//!   location (the watch channel keeps only the newest value)
//! - A failed mount does not count as reaching the path, so an identical
//!   retry navigation re-dispatches
//! - `run` consumes the router, making a double start unrepresentable
//! - Route-table misconfiguration (default path unresolvable) is a
//!   startup-fatal error, never an infinite redirect

pub mod dispatcher;
pub mod handle;

pub use dispatcher::{Router, RouterError};
pub use handle::RouterHandle;
