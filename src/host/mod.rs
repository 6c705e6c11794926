//! Host environment seams.
//!
//! # Data Flow
//! ```text
//! navigate(path)
//!     → location.rs (write the addressable string)
//!     → change notification (watch channel)
//!     → router run loop → dispatch
//! ```
//!
//! # Design Decisions
//! - The location is a single string; the storage mechanism (URL
//!   fragment, history API, in-process cell) is the host's business
//! - Notifications carry only the latest value: bursts arriving while a
//!   dispatch is in flight coalesce to the newest pending location

pub mod location;

pub use location::{HashLocation, LocationSource};
