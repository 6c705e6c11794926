//! Shared helpers for router integration tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc;

use hash_router::{RouteParams, Surface, SurfaceBackend, Teardown, View, ViewError};

/// Surface backend that records every body written to it.
#[derive(Default)]
pub struct BufferSurface {
    history: Mutex<Vec<String>>,
}

impl BufferSurface {
    pub fn history(&self) -> Vec<String> {
        self.history.lock().unwrap().clone()
    }
}

impl SurfaceBackend for BufferSurface {
    fn replace(&self, body: &str) {
        self.history.lock().unwrap().push(body.to_string());
    }
}

pub fn buffer_surface() -> (Surface, Arc<BufferSurface>) {
    let backend = Arc::new(BufferSurface::default());
    (Surface::new(backend.clone()), backend)
}

/// View that reports its mount and teardown over a channel.
///
/// Events look like `mount feed []` / `mount user-profile [userId=42]` /
/// `teardown feed`.
pub fn event_view(name: &'static str, events: mpsc::UnboundedSender<String>) -> impl View {
    move |surface: Surface, params: RouteParams| {
        let events = events.clone();
        async move {
            surface.replace(name);
            let rendered: Vec<String> = params.iter().map(|(k, v)| format!("{k}={v}")).collect();
            let _ = events.send(format!("mount {name} [{}]", rendered.join(",")));

            let teardown_events = events.clone();
            Ok::<Teardown, ViewError>(Teardown::sync(move || {
                let _ = teardown_events.send(format!("teardown {name}"));
            }))
        }
    }
}

/// View whose factory always fails.
pub fn failing_view() -> impl View {
    |_surface: Surface, _params: RouteParams| async {
        Err::<Teardown, ViewError>("backend unavailable".into())
    }
}

/// Receive the next event or fail loudly instead of hanging.
pub async fn next_event(rx: &mut mpsc::UnboundedReceiver<String>) -> String {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for a router event")
        .expect("event channel closed")
}
