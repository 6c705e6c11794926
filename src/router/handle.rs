//! Navigation handle.

use std::sync::Arc;

use crate::host::LocationSource;

/// Cheap, cloneable handle for requesting navigation.
///
/// Obtained from [`Router::handle`](crate::router::Router::handle)
/// before the router is consumed by `run`.
#[derive(Clone)]
pub struct RouterHandle {
    location: Arc<dyn LocationSource>,
}

impl RouterHandle {
    pub(crate) fn new(location: Arc<dyn LocationSource>) -> Self {
        Self { location }
    }

    /// Request a location change. No-op when `path` is already the
    /// current location, preventing redundant remounts.
    pub fn navigate(&self, path: &str) {
        if self.location.current() == path {
            tracing::debug!(path = %path, "already at requested location");
            return;
        }
        self.location.request(path);
    }

    /// The current location string.
    pub fn location(&self) -> String {
        self.location.current()
    }
}
