//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

/// Router configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Path dispatched when the location is empty, and the redirect
    /// target when no route matches. Must resolve to a registered route.
    pub default_path: String,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            default_path: "/feed".to_string(),
        }
    }
}
