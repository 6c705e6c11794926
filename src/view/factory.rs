//! View factory and teardown contracts.

use std::fmt;
use std::future::Future;

use futures_util::future::BoxFuture;

use crate::routing::RouteParams;
use crate::view::Surface;

/// Error produced by a view factory or a teardown.
///
/// Views talk to arbitrary collaborators (typically a remote data
/// service), so the error type is an opaque box rather than an enum.
pub type ViewError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A screen that can be mounted into a surface.
///
/// The factory receives the mount surface and the route parameters by
/// value, performs its own setup (initial fetch, realtime subscriptions),
/// and returns the teardown that releases those resources. The router
/// owns the surface; the view owns it exclusively between a successful
/// mount and the invocation of its teardown.
pub trait View: Send + Sync {
    fn mount(
        &self,
        surface: Surface,
        params: RouteParams,
    ) -> BoxFuture<'static, Result<Teardown, ViewError>>;
}

/// Plain async closures are views.
impl<F, Fut> View for F
where
    F: Fn(Surface, RouteParams) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Teardown, ViewError>> + Send + 'static,
{
    fn mount(
        &self,
        surface: Surface,
        params: RouteParams,
    ) -> BoxFuture<'static, Result<Teardown, ViewError>> {
        Box::pin(self(surface, params))
    }
}

type TeardownFn = Box<dyn FnOnce() -> BoxFuture<'static, Result<(), ViewError>> + Send>;

/// Releases a mounted view's resources (subscriptions, timers).
///
/// Invoked exactly once, immediately before the next view mounts or on
/// application shutdown. Consumption by value makes a second invocation
/// unrepresentable. A view with nothing to release returns
/// [`Teardown::none`].
pub struct Teardown(Option<TeardownFn>);

impl Teardown {
    /// A teardown that does nothing.
    pub fn none() -> Self {
        Self(None)
    }

    /// A teardown backed by an async closure.
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), ViewError>> + Send + 'static,
    {
        Self(Some(Box::new(move || {
            let fut: BoxFuture<'static, Result<(), ViewError>> = Box::pin(f());
            fut
        })))
    }

    /// A teardown backed by a synchronous closure.
    pub fn sync<F>(f: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self::new(move || async move {
            f();
            Ok::<(), ViewError>(())
        })
    }

    pub fn is_noop(&self) -> bool {
        self.0.is_none()
    }

    /// Consume the teardown. Failures are reported to the caller, which
    /// logs and proceeds; a wedged router is worse than a leaked
    /// subscription.
    pub(crate) async fn run(self) -> Result<(), ViewError> {
        match self.0 {
            Some(f) => f().await,
            None => Ok(()),
        }
    }
}

impl Default for Teardown {
    fn default() -> Self {
        Self::none()
    }
}

impl fmt::Debug for Teardown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(_) => f.write_str("Teardown(armed)"),
            None => f.write_str("Teardown(noop)"),
        }
    }
}
