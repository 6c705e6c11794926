//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Location change (path string)
//!     → table.rs (route lookup)
//!     → pattern.rs (segment-by-segment matching, param extraction)
//!     → Return: matched view + RouteParams, or no match
//!
//! Pattern Compilation (at registration):
//!     "/user-profile/:userId"
//!     → Tokenize on '/'
//!     → Classify segments as Literal or Param
//!     → Freeze as immutable Pattern
//! ```
//!
//! # Design Decisions
//! - Patterns compiled once at registration, immutable afterwards
//! - No regex in the dispatch path (segment comparison only)
//! - Exact raw lookup first, then ordered scan with positional matching
//! - First registered pattern wins; duplicate patterns are rejected
//! - Params are recomputed per match and passed by value, never stored
//!   on the route entry

pub mod pattern;
pub mod table;

pub use pattern::{Pattern, PatternError, RouteParams, Segment};
pub use table::{RegisterError, RouteTable};
