//! OS signal handling.
//!
//! Translates SIGINT/SIGTERM into a [`Shutdown`] trigger. Uses Tokio's
//! signal handling, which is async-safe.

use crate::lifecycle::Shutdown;

/// Wait for Ctrl+C, or SIGTERM on unix.
pub async fn wait_for_signal() -> std::io::Result<()> {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut term = signal(SignalKind::terminate())?;
        tokio::select! {
            res = ctrl_c => res?,
            _ = term.recv() => {}
        }
    }

    #[cfg(not(unix))]
    ctrl_c.await?;

    Ok(())
}

/// Trigger `shutdown` once a termination signal arrives.
///
/// If the handlers cannot be installed the error is logged and shutdown is
/// triggered immediately rather than leaving the process uninterruptible.
pub async fn trigger_on_signal(shutdown: &Shutdown) {
    match wait_for_signal().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => tracing::error!(error = %e, "Failed to install signal handlers"),
    }
    shutdown.trigger();
}
