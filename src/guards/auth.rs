//! Authentication gate.
//!
//! Signed-out sessions are confined to public paths and bounced to the
//! sign-in screen; signed-in sessions are bounced off entry screens to
//! the home path. The auth state itself comes from the host (ultimately
//! the remote data service's auth listener) over a watch channel.

use tokio::sync::watch;

use crate::guards::policy::{Guard, Verdict};

/// Session state as reported by the host's auth listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    SignedOut,
    SignedIn,
}

/// Guard enforcing the signed-in/signed-out split of the route table.
pub struct AuthGuard {
    auth: watch::Receiver<AuthState>,
    /// Paths reachable while signed out. Always contains the sign-in path.
    public_paths: Vec<String>,
    /// Entry screens a signed-in session is redirected away from.
    entry_paths: Vec<String>,
    sign_in_path: String,
    home_path: String,
}

impl AuthGuard {
    /// `sign_in_path` is registered as both public and entry; `home_path`
    /// is where signed-in sessions land when they hit an entry screen.
    pub fn new(auth: watch::Receiver<AuthState>, sign_in_path: &str, home_path: &str) -> Self {
        Self {
            auth,
            public_paths: vec![sign_in_path.to_string()],
            entry_paths: vec![sign_in_path.to_string()],
            sign_in_path: sign_in_path.to_string(),
            home_path: home_path.to_string(),
        }
    }

    /// Allow a path while signed out (e.g. an about page).
    pub fn public(mut self, path: &str) -> Self {
        self.public_paths.push(path.to_string());
        self
    }

    /// Mark a path as an entry screen (implies public).
    pub fn entry(mut self, path: &str) -> Self {
        self.public_paths.push(path.to_string());
        self.entry_paths.push(path.to_string());
        self
    }
}

impl Guard for AuthGuard {
    fn check(&self, path: &str) -> Verdict {
        match *self.auth.borrow() {
            AuthState::SignedOut => {
                if self.public_paths.iter().any(|p| p == path) {
                    Verdict::Allow
                } else {
                    Verdict::Redirect(self.sign_in_path.clone())
                }
            }
            AuthState::SignedIn => {
                if self.entry_paths.iter().any(|p| p == path) {
                    Verdict::Redirect(self.home_path.clone())
                } else {
                    Verdict::Allow
                }
            }
        }
    }
}
