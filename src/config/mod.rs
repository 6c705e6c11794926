//! Configuration management.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RouterConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults so an absent config file is valid
//! - Validation separates syntactic (serde) from semantic checks and
//!   returns all errors, not just the first
//! - Whether the default path actually resolves to a registered route is
//!   checked by the router at startup, since it needs the route table

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::RouterConfig;
pub use validation::{validate_config, ValidationError};
