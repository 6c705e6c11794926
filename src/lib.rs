//! Location-driven view router with lifecycle-managed mounting.
//!
//! A location change resolves against a route table, the previous view's
//! teardown is awaited, and the matched view factory mounts into the
//! single surface. Exactly one view is active at a time.

pub mod config;
pub mod guards;
pub mod host;
pub mod lifecycle;
pub mod router;
pub mod routing;
pub mod view;

pub use config::RouterConfig;
pub use host::{HashLocation, LocationSource};
pub use lifecycle::Shutdown;
pub use router::{Router, RouterError, RouterHandle};
pub use routing::{RegisterError, RouteParams};
pub use view::{ProgressIndicator, Surface, SurfaceBackend, Teardown, View, ViewError};
