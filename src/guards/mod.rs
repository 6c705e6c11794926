//! Navigation guards.
//!
//! # Data Flow
//! ```text
//! dispatch(path)
//!     → effective path computed, redundant-dispatch check passed
//!     → policy.rs (each guard checks the path, first non-Allow wins)
//!     → Verdict::Allow    → route resolution proceeds
//!     → Verdict::Redirect → navigate(target), active view untouched
//! ```
//!
//! # Design Decisions
//! - Guards run before teardown, so a redirected dispatch never unmounts
//!   the active view
//! - Guards are synchronous: they consult already-known state (a watched
//!   auth channel), never the network
//! - A redirect target must itself pass the guard chain, or the router
//!   would bounce; AuthGuard's targets are constructed to satisfy this

pub mod auth;
pub mod policy;

pub use auth::{AuthGuard, AuthState};
pub use policy::{Guard, Verdict};
