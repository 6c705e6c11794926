//! The dispatch state machine.

use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::config::{validate_config, ConfigError, RouterConfig};
use crate::guards::{Guard, Verdict};
use crate::host::LocationSource;
use crate::lifecycle::Shutdown;
use crate::router::handle::RouterHandle;
use crate::routing::{RegisterError, RouteTable};
use crate::view::{LoadingGuard, NoopIndicator, ProgressIndicator, Surface, Teardown, View};

/// Startup-fatal router errors.
#[derive(Debug, Error)]
pub enum RouterError {
    #[error("route table is empty")]
    EmptyRouteTable,

    /// Without this check a missing default route would manifest as an
    /// infinite redirect loop at the first unmatched location.
    #[error("default path {0:?} does not resolve to a registered route")]
    UnresolvableDefault(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Outcome of a single dispatch, for tests and logging.
#[derive(Debug, Clone, PartialEq, Eq)]
enum DispatchOutcome {
    /// The view for this path was mounted.
    Mounted(String),

    /// Redundant notification for the already-active path; no remount.
    Skipped,

    /// Dispatch abandoned; navigation to the target was requested.
    Redirected(String),

    /// The view factory failed; the error surface was rendered.
    Failed(String),
}

/// Location-driven view router.
///
/// Owns the route table, the mount surface, and the active view's
/// teardown. At most one view is mounted at any time; the previous
/// view's teardown completes before the next factory is invoked.
pub struct Router {
    table: RouteTable,
    guards: Vec<Box<dyn Guard>>,
    config: RouterConfig,
    surface: Surface,
    indicator: Arc<dyn ProgressIndicator>,
    location: Arc<dyn LocationSource>,
    /// Last successfully dispatched path, while its view is mounted.
    current: Option<String>,
    /// Pending teardown of the active view.
    active: Option<Teardown>,
}

impl Router {
    pub fn new(
        config: RouterConfig,
        surface: Surface,
        location: Arc<dyn LocationSource>,
    ) -> Self {
        Self {
            table: RouteTable::new(),
            guards: Vec::new(),
            config,
            surface,
            indicator: Arc::new(NoopIndicator),
            location,
            current: None,
            active: None,
        }
    }

    pub fn with_indicator(mut self, indicator: Arc<dyn ProgressIndicator>) -> Self {
        self.indicator = indicator;
        self
    }

    /// Register a route. Duplicate and malformed patterns are rejected.
    pub fn register<V>(&mut self, pattern: &str, view: V) -> Result<(), RegisterError>
    where
        V: View + 'static,
    {
        self.table.insert(pattern, Arc::new(view))
    }

    /// Add a navigation guard. Guards run in registration order.
    pub fn guard<G>(&mut self, guard: G)
    where
        G: Guard + 'static,
    {
        self.guards.push(Box::new(guard));
    }

    /// Handle for requesting navigation while the router runs.
    pub fn handle(&self) -> RouterHandle {
        RouterHandle::new(self.location.clone())
    }

    fn validate(&self) -> Result<(), RouterError> {
        validate_config(&self.config).map_err(ConfigError::Validation)?;
        if self.table.is_empty() {
            return Err(RouterError::EmptyRouteTable);
        }
        if !self.table.resolves(&self.config.default_path) {
            return Err(RouterError::UnresolvableDefault(
                self.config.default_path.clone(),
            ));
        }
        Ok(())
    }

    /// Validate the route table, dispatch the current location once, then
    /// follow location changes until shutdown.
    ///
    /// Consumes the router: there is exactly one subscription to the
    /// location source and one immediate dispatch, by construction.
    pub async fn run(mut self, shutdown: Shutdown) -> Result<(), RouterError> {
        self.validate()?;

        let mut changes = self.location.changes();
        let mut shutdown_rx = shutdown.subscribe();

        tracing::info!(
            routes = self.table.len(),
            default_path = %self.config.default_path,
            "router started"
        );

        let initial = self.location.current();
        self.dispatch(&initial).await;

        loop {
            tokio::select! {
                changed = changes.changed() => {
                    if changed.is_err() {
                        // Location source gone; nothing further to dispatch.
                        break;
                    }
                    let path = changes.borrow_and_update().clone();
                    self.dispatch(&path).await;
                }
                _ = shutdown_rx.recv() => {
                    tracing::info!("router stopping");
                    break;
                }
            }
        }

        self.drain().await;
        Ok(())
    }

    /// Tear down the active view, if any. Called on shutdown.
    async fn drain(&mut self) {
        self.current = None;
        if let Some(teardown) = self.active.take() {
            if let Err(error) = teardown.run().await {
                tracing::warn!(error = %error, "teardown failed during shutdown");
            }
        }
    }

    /// One transition of the state machine.
    async fn dispatch(&mut self, location: &str) -> DispatchOutcome {
        let path = if location.is_empty() {
            self.config.default_path.clone()
        } else {
            location.to_string()
        };
        let dispatch_id = Uuid::new_v4();

        // Hosts may deliver redundant notifications for the active path;
        // never remount over a live view.
        if self.current.as_deref() == Some(path.as_str()) {
            tracing::debug!(id = %dispatch_id, path = %path, "already active, skipping");
            return DispatchOutcome::Skipped;
        }

        for guard in &self.guards {
            if let Verdict::Redirect(target) = guard.check(&path) {
                tracing::info!(
                    id = %dispatch_id,
                    path = %path,
                    target = %target,
                    "navigation redirected by guard"
                );
                self.location.request(&target);
                return DispatchOutcome::Redirected(target);
            }
        }

        // The previous view's teardown must complete before anything else
        // touches the surface. From here until a successful mount, no
        // view is active.
        self.current = None;
        if let Some(teardown) = self.active.take() {
            if let Err(error) = teardown.run().await {
                tracing::warn!(
                    id = %dispatch_id,
                    error = %error,
                    "previous view teardown failed, continuing"
                );
            }
        }

        let Some((view, params)) = self.table.resolve(&path) else {
            let target = self.config.default_path.clone();
            tracing::info!(
                id = %dispatch_id,
                path = %path,
                target = %target,
                "no route matched, redirecting to default"
            );
            self.location.request(&target);
            return DispatchOutcome::Redirected(target);
        };

        let _loading = LoadingGuard::begin(self.indicator.clone());
        match view.mount(self.surface.clone(), params).await {
            Ok(teardown) => {
                self.current = Some(path.clone());
                self.active = Some(teardown);
                tracing::info!(id = %dispatch_id, path = %path, "view mounted");
                DispatchOutcome::Mounted(path)
            }
            Err(error) => {
                tracing::error!(
                    id = %dispatch_id,
                    path = %path,
                    error = %error,
                    "view factory failed"
                );
                self.surface.render_mount_error(&path, &error.to_string());
                // A failed mount does not count as reaching the path:
                // `current` stays clear so a retry navigation to the same
                // path re-dispatches instead of being swallowed.
                DispatchOutcome::Failed(path)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use crate::guards::{AuthGuard, AuthState};
    use crate::host::HashLocation;
    use crate::routing::RouteParams;
    use crate::view::{SurfaceBackend, ViewError};
    use tokio::sync::watch;

    #[derive(Default)]
    struct RecordingSurface {
        bodies: Mutex<Vec<String>>,
    }

    impl RecordingSurface {
        fn last(&self) -> String {
            self.bodies.lock().unwrap().last().cloned().unwrap_or_default()
        }
    }

    impl SurfaceBackend for RecordingSurface {
        fn replace(&self, body: &str) {
            self.bodies.lock().unwrap().push(body.to_string());
        }
    }

    #[derive(Default)]
    struct CountingIndicator {
        shows: std::sync::atomic::AtomicUsize,
        hides: std::sync::atomic::AtomicUsize,
    }

    impl ProgressIndicator for CountingIndicator {
        fn show(&self) {
            self.shows.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        }
        fn hide(&self) {
            self.hides.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        }
    }

    type Log = Arc<Mutex<Vec<String>>>;

    fn logging_view(name: &'static str, log: Log) -> impl View {
        move |_surface: Surface, params: RouteParams| {
            let log = log.clone();
            async move {
                let rendered: Vec<String> =
                    params.iter().map(|(k, v)| format!("{k}={v}")).collect();
                log.lock()
                    .unwrap()
                    .push(format!("mount {name} [{}]", rendered.join(",")));
                let teardown_log = log.clone();
                Ok::<Teardown, ViewError>(Teardown::sync(move || {
                    teardown_log.lock().unwrap().push(format!("teardown {name}"));
                }))
            }
        }
    }

    fn failing_view() -> impl View {
        |_surface: Surface, _params: RouteParams| async {
            Err::<Teardown, ViewError>("backend unavailable".into())
        }
    }

    fn flaky_teardown_view(log: Log) -> impl View {
        move |_surface: Surface, _params: RouteParams| {
            let log = log.clone();
            async move {
                log.lock().unwrap().push("mount flaky []".to_string());
                Ok::<Teardown, ViewError>(Teardown::new(|| async {
                    Err::<(), ViewError>("listener refused to die".into())
                }))
            }
        }
    }

    fn test_router(log: &Log) -> (Router, Arc<RecordingSurface>, Arc<HashLocation>) {
        let backend = Arc::new(RecordingSurface::default());
        let location = Arc::new(HashLocation::new(""));
        let mut router = Router::new(
            RouterConfig::default(),
            Surface::new(backend.clone()),
            location.clone(),
        );
        router.register("/login", logging_view("login", log.clone())).unwrap();
        router.register("/feed", logging_view("feed", log.clone())).unwrap();
        router
            .register("/user-profile/:userId", logging_view("user-profile", log.clone()))
            .unwrap();
        (router, backend, location)
    }

    fn entries(log: &Log) -> Vec<String> {
        log.lock().unwrap().clone()
    }

    #[tokio::test]
    async fn test_empty_location_mounts_default() {
        let log = Log::default();
        let (mut router, _, _) = test_router(&log);

        let outcome = router.dispatch("").await;
        assert_eq!(outcome, DispatchOutcome::Mounted("/feed".to_string()));
        assert_eq!(entries(&log), vec!["mount feed []"]);
        assert!(router.active.is_some());
    }

    #[tokio::test]
    async fn test_teardown_precedes_next_mount() {
        let log = Log::default();
        let (mut router, _, _) = test_router(&log);

        router.dispatch("").await;
        let outcome = router.dispatch("/user-profile/42").await;
        assert_eq!(
            outcome,
            DispatchOutcome::Mounted("/user-profile/42".to_string())
        );
        assert_eq!(
            entries(&log),
            vec!["mount feed []", "teardown feed", "mount user-profile [userId=42]"]
        );
    }

    #[tokio::test]
    async fn test_redundant_dispatch_is_skipped() {
        let log = Log::default();
        let (mut router, _, _) = test_router(&log);

        router.dispatch("/feed").await;
        let outcome = router.dispatch("/feed").await;
        assert_eq!(outcome, DispatchOutcome::Skipped);
        // No teardown, no remount.
        assert_eq!(entries(&log), vec!["mount feed []"]);
    }

    #[tokio::test]
    async fn test_unmatched_path_redirects_to_default() {
        let log = Log::default();
        let (mut router, _, location) = test_router(&log);

        router.dispatch("/user-profile/42").await;
        let outcome = router.dispatch("/unknown").await;
        assert_eq!(outcome, DispatchOutcome::Redirected("/feed".to_string()));
        // The active view was torn down before resolution failed.
        assert_eq!(
            entries(&log),
            vec!["mount user-profile [userId=42]", "teardown user-profile"]
        );
        assert!(router.active.is_none());

        // The redirect wrote the location; the run loop would dispatch it.
        assert_eq!(location.current(), "/feed");
        let outcome = router.dispatch("/feed").await;
        assert_eq!(outcome, DispatchOutcome::Mounted("/feed".to_string()));
    }

    #[tokio::test]
    async fn test_failed_mount_renders_error_surface() {
        let log = Log::default();
        let (mut router, backend, _) = test_router(&log);
        router.register("/boom", failing_view()).unwrap();

        router.dispatch("/feed").await;
        let outcome = router.dispatch("/boom").await;
        assert_eq!(outcome, DispatchOutcome::Failed("/boom".to_string()));

        // Previous view's teardown still ran.
        assert_eq!(entries(&log), vec!["mount feed []", "teardown feed"]);

        let body = backend.last();
        assert!(body.contains("Error loading page"));
        assert!(body.contains("backend unavailable"));

        // No teardown stored for the failed view; the next navigation
        // mounts cleanly.
        assert!(router.active.is_none());
        let outcome = router.dispatch("/login").await;
        assert_eq!(outcome, DispatchOutcome::Mounted("/login".to_string()));
        assert_eq!(
            entries(&log),
            vec!["mount feed []", "teardown feed", "mount login []"]
        );
    }

    #[tokio::test]
    async fn test_failed_mount_can_be_retried() {
        let log = Log::default();
        let (mut router, _, _) = test_router(&log);
        router.register("/boom", failing_view()).unwrap();

        assert_eq!(
            router.dispatch("/boom").await,
            DispatchOutcome::Failed("/boom".to_string())
        );
        // The failed path was not recorded as reached: the retry is a
        // real dispatch, not a redundant-notification skip.
        assert_eq!(
            router.dispatch("/boom").await,
            DispatchOutcome::Failed("/boom".to_string())
        );
    }

    #[tokio::test]
    async fn test_teardown_failure_does_not_block_next_mount() {
        let log = Log::default();
        let (mut router, _, _) = test_router(&log);
        router.register("/flaky", flaky_teardown_view(log.clone())).unwrap();

        router.dispatch("/flaky").await;
        let outcome = router.dispatch("/feed").await;
        assert_eq!(outcome, DispatchOutcome::Mounted("/feed".to_string()));
        assert_eq!(entries(&log), vec!["mount flaky []", "mount feed []"]);
    }

    #[tokio::test]
    async fn test_guard_redirect_leaves_active_view_mounted() {
        let log = Log::default();
        let (mut router, _, location) = test_router(&log);

        let (auth_tx, auth_rx) = watch::channel(AuthState::SignedOut);
        router.guard(AuthGuard::new(auth_rx, "/login", "/feed"));

        let outcome = router.dispatch("/feed").await;
        assert_eq!(outcome, DispatchOutcome::Redirected("/login".to_string()));
        assert_eq!(location.current(), "/login");

        let outcome = router.dispatch("/login").await;
        assert_eq!(outcome, DispatchOutcome::Mounted("/login".to_string()));

        auth_tx.send(AuthState::SignedIn).unwrap();
        let outcome = router.dispatch("/feed").await;
        assert_eq!(outcome, DispatchOutcome::Mounted("/feed".to_string()));

        // Signed in, the entry screen bounces home; the active feed view
        // stays mounted until the redirect target dispatches (and the
        // target then skips as redundant).
        let outcome = router.dispatch("/login").await;
        assert_eq!(outcome, DispatchOutcome::Redirected("/feed".to_string()));
        assert!(router.active.is_some());
        assert_eq!(router.dispatch("/feed").await, DispatchOutcome::Skipped);
    }

    #[tokio::test]
    async fn test_loading_indicator_brackets_success_and_failure() {
        let log = Log::default();
        let (router, _, _) = test_router(&log);
        let indicator = Arc::new(CountingIndicator::default());
        let mut router = router.with_indicator(indicator.clone());
        router.register("/boom", failing_view()).unwrap();

        router.dispatch("/feed").await;
        router.dispatch("/boom").await;

        use std::sync::atomic::Ordering;
        assert_eq!(indicator.shows.load(Ordering::SeqCst), 2);
        assert_eq!(indicator.hides.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_run_rejects_unresolvable_default() {
        let log = Log::default();
        let backend = Arc::new(RecordingSurface::default());
        let location = Arc::new(HashLocation::new(""));
        let mut router = Router::new(
            RouterConfig::default(),
            Surface::new(backend),
            location,
        );
        router.register("/login", logging_view("login", log.clone())).unwrap();

        let err = router.run(Shutdown::new()).await.unwrap_err();
        assert!(matches!(err, RouterError::UnresolvableDefault(p) if p == "/feed"));
    }

    #[tokio::test]
    async fn test_run_rejects_empty_table() {
        let backend = Arc::new(RecordingSurface::default());
        let location = Arc::new(HashLocation::new(""));
        let router = Router::new(RouterConfig::default(), Surface::new(backend), location);

        let err = router.run(Shutdown::new()).await.unwrap_err();
        assert!(matches!(err, RouterError::EmptyRouteTable));
    }

    #[tokio::test]
    async fn test_run_rejects_invalid_config() {
        let log = Log::default();
        let backend = Arc::new(RecordingSurface::default());
        let location = Arc::new(HashLocation::new(""));
        let config = RouterConfig {
            default_path: "feed".to_string(),
        };
        let mut router = Router::new(config, Surface::new(backend), location);
        router.register("/feed", logging_view("feed", log.clone())).unwrap();

        let err = router.run(Shutdown::new()).await.unwrap_err();
        assert!(matches!(err, RouterError::Config(_)));
    }
}
