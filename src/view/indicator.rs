//! Loading indicator bracketing every navigation attempt.

use std::sync::Arc;

/// Host-provided progress indicator (a spinner, a status line, ...).
pub trait ProgressIndicator: Send + Sync {
    fn show(&self);
    fn hide(&self);
}

/// Indicator that does nothing. Default for hosts without one.
pub struct NoopIndicator;

impl ProgressIndicator for NoopIndicator {
    fn show(&self) {}
    fn hide(&self) {}
}

/// Scoped show/hide pair.
///
/// Shown when the guard is created, hidden when it drops, so the
/// indicator is released on both the success and error paths of a mount.
pub(crate) struct LoadingGuard {
    indicator: Arc<dyn ProgressIndicator>,
}

impl LoadingGuard {
    pub(crate) fn begin(indicator: Arc<dyn ProgressIndicator>) -> Self {
        indicator.show();
        Self { indicator }
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.indicator.hide();
    }
}
