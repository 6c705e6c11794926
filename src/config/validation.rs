//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the default path is a concrete, well-formed location
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before the config is accepted into the router

use std::fmt;

use crate::config::schema::RouterConfig;

/// A single semantic validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a router configuration, collecting every failure.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let path = config.default_path.as_str();

    if path.is_empty() {
        errors.push(ValidationError {
            field: "default_path",
            message: "must not be empty".to_string(),
        });
        return Err(errors);
    }

    if !path.starts_with('/') {
        errors.push(ValidationError {
            field: "default_path",
            message: format!("{path:?} must start with '/'"),
        });
    }

    if path != "/" && path.starts_with('/') && path[1..].split('/').any(|s| s.is_empty()) {
        errors.push(ValidationError {
            field: "default_path",
            message: format!("{path:?} contains an empty segment"),
        });
    }

    if path.contains(':') {
        errors.push(ValidationError {
            field: "default_path",
            message: format!("{path:?} must be a concrete path, not a pattern"),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
