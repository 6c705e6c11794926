//! Guard trait and verdicts.

/// Outcome of checking a path against a guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Dispatch proceeds to route resolution.
    Allow,

    /// Dispatch is abandoned and navigation to the target is requested.
    Redirect(String),
}

/// A pre-resolution check on the effective path.
///
/// Evaluated in registration order; the first redirect wins.
pub trait Guard: Send + Sync {
    fn check(&self, path: &str) -> Verdict;
}
