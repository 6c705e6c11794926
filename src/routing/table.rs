//! Route table: registration and lookup.
//!
//! # Responsibilities
//! - Store compiled routes in registration order
//! - Reject duplicate pattern strings at registration
//! - Resolve a location path to a view plus extracted params
//!
//! # Design Decisions
//! - Immutable once the router starts (no runtime mutation)
//! - O(1) lookup for static patterns via HashMap
//! - O(n) ordered scan for parameterized patterns (route tables are small)
//! - Explicit `None` on no match; the fallback policy lives in the router

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use thiserror::Error;

use crate::routing::pattern::{Pattern, PatternError, RouteParams};
use crate::view::View;

/// Errors raised when registering a route.
#[derive(Debug, Error)]
pub enum RegisterError {
    /// The pattern string was already registered. Ambiguous overlap is a
    /// configuration error, not a runtime choice.
    #[error("duplicate route pattern {0:?}")]
    DuplicatePattern(String),

    #[error(transparent)]
    Pattern(#[from] PatternError),
}

struct Route {
    pattern: Pattern,
    view: Arc<dyn View>,
}

/// Ordered collection of routes with a static-pattern fast path.
#[derive(Default)]
pub struct RouteTable {
    routes: Vec<Route>,
    /// Raw pattern strings seen so far, for duplicate rejection.
    registered: HashSet<String>,
    /// Index of fully-literal patterns by their raw string.
    static_index: HashMap<String, usize>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a route. Compiles the pattern and rejects duplicates.
    pub fn insert(&mut self, pattern: &str, view: Arc<dyn View>) -> Result<(), RegisterError> {
        if self.registered.contains(pattern) {
            return Err(RegisterError::DuplicatePattern(pattern.to_string()));
        }

        let compiled = Pattern::compile(pattern)?;
        let index = self.routes.len();
        if compiled.is_static() {
            self.static_index.insert(pattern.to_string(), index);
        }
        self.registered.insert(pattern.to_string());
        self.routes.push(Route {
            pattern: compiled,
            view,
        });
        Ok(())
    }

    /// Resolve a path to its view and extracted parameters.
    ///
    /// Exact static match first, then parameterized patterns in
    /// registration order. First match wins.
    pub fn resolve(&self, path: &str) -> Option<(Arc<dyn View>, RouteParams)> {
        if let Some(&index) = self.static_index.get(path) {
            return Some((self.routes[index].view.clone(), RouteParams::default()));
        }

        for route in &self.routes {
            if let Some(params) = route.pattern.matches(path) {
                return Some((route.view.clone(), params));
            }
        }
        None
    }

    /// True if some registered route matches `path`.
    pub fn resolves(&self, path: &str) -> bool {
        self.static_index.contains_key(path)
            || self.routes.iter().any(|r| r.pattern.matches(path).is_some())
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
