//! View subsystem: the contract between the router and screens.
//!
//! # Data Flow
//! ```text
//! Router dispatch:
//!     → indicator.rs (loading guard: show on mount, hide on drop)
//!     → factory.rs   (View::mount(surface, params) → Teardown)
//!     → surface.rs   (view writes into the mount surface)
//!
//! Next dispatch / shutdown:
//!     → factory.rs   (Teardown consumed, exactly once)
//! ```
//!
//! # Design Decisions
//! - Views are trait objects; plain closures get a blanket impl
//! - Teardown is consumed by value, so double-invocation cannot compile
//! - The surface is an opaque handle; rendering backends live with the host
//! - View errors are boxed (views are arbitrary collaborators, often
//!   wrapping a remote data service)

pub mod factory;
pub mod indicator;
pub mod surface;

pub use factory::{Teardown, View, ViewError};
pub use indicator::{NoopIndicator, ProgressIndicator};
pub use surface::{Surface, SurfaceBackend};

pub(crate) use indicator::LoadingGuard;
