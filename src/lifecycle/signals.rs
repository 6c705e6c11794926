//! OS signal handling.
//!
//! # Responsibilities
//! - Translate Ctrl-C into the internal shutdown signal
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - A failed handler registration is logged, never fatal

use crate::lifecycle::Shutdown;

/// Spawn a task that triggers shutdown when Ctrl-C arrives.
pub fn trigger_on_ctrl_c(shutdown: Shutdown) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("ctrl-c received, shutting down");
                shutdown.trigger();
            }
            Err(error) => {
                tracing::error!(error = %error, "failed to install ctrl-c handler");
            }
        }
    });
}
