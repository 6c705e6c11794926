//! Location source: the addressable "where am I" string.

use tokio::sync::watch;

/// Read/write access to the current location plus change notifications.
///
/// Contract: writing a location eventually produces one change
/// notification, which the router turns into a dispatch. Notifications
/// observed through [`changes`](LocationSource::changes) retain only the
/// newest value.
pub trait LocationSource: Send + Sync {
    /// The current location string (may be empty at startup).
    fn current(&self) -> String;

    /// Write a new location. Observers are notified asynchronously.
    fn request(&self, path: &str);

    /// Subscribe to change notifications.
    fn changes(&self) -> watch::Receiver<String>;
}

/// In-process location cell, the fragment-after-`#` equivalent.
pub struct HashLocation {
    tx: watch::Sender<String>,
}

impl HashLocation {
    pub fn new(initial: &str) -> Self {
        let (tx, _rx) = watch::channel(initial.to_string());
        Self { tx }
    }
}

impl Default for HashLocation {
    fn default() -> Self {
        Self::new("")
    }
}

impl LocationSource for HashLocation {
    fn current(&self) -> String {
        self.tx.borrow().clone()
    }

    fn request(&self, path: &str) {
        // send_replace notifies even without live receivers, so writes
        // before the router starts are never an error.
        self.tx.send_replace(path.to_string());
    }

    fn changes(&self) -> watch::Receiver<String> {
        self.tx.subscribe()
    }
}
