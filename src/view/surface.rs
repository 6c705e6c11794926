//! Mount surface: the container views render into.

use std::fmt;
use std::sync::Arc;

/// Rendering backend for a mount surface.
///
/// The host environment decides what "replacing the content" means
/// (a DOM container, a terminal region, an in-memory buffer in tests).
pub trait SurfaceBackend: Send + Sync {
    /// Replace the entire surface content.
    fn replace(&self, body: &str);

    /// Clear the surface.
    fn clear(&self) {
        self.replace("");
    }
}

/// Cloneable handle to the single mount surface.
///
/// Exclusively owned by the active view between mount and teardown; the
/// router guarantees the previous view's teardown completes before the
/// next factory writes here.
#[derive(Clone)]
pub struct Surface {
    backend: Arc<dyn SurfaceBackend>,
}

impl Surface {
    pub fn new(backend: Arc<dyn SurfaceBackend>) -> Self {
        Self { backend }
    }

    pub fn replace(&self, body: &str) {
        self.backend.replace(body);
    }

    pub fn clear(&self) {
        self.backend.clear();
    }

    /// Render the retry-oriented error body shown when a view factory
    /// fails. A failed mount must never leave a blank screen.
    pub(crate) fn render_mount_error(&self, path: &str, message: &str) {
        self.replace(&format!(
            "Error loading page\n{message}\nNavigate to {path} again to retry."
        ));
    }
}

impl fmt::Debug for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Surface")
    }
}
