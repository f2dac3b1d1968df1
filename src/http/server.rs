//! Webhook server lifecycle.
//!
//! # Responsibilities
//! - Build the Axum router with the webhook route and middleware
//! - Hold the downloader/uploader capabilities for the handler
//! - Serve plaintext or TLS on a spawned task
//! - Close immediately on cancellation and join the serving task
//! - Report close and serve failures together

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::{body::Body, http::Request, Router};
use tokio::sync::{oneshot, watch};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::http::request::{request_id, UuidRequestId, X_REQUEST_ID};
use crate::http::webhook;
use crate::lifecycle::{
    CloseError, LifecycleState, RunError, ServeError, ShutdownSignal, StateTracker,
};
use crate::net::listener::{self, Transport};
use crate::pipeline::{Downloader, PayloadSink, TracingSink, Uploader};

/// Webhook server owning a single listener for its whole lifetime.
pub struct WebhookServer {
    config: ServerConfig,
    router: Router,
    handle: ServerHandle,
    state: StateTracker,
    downloader: Arc<dyn Downloader>,
    uploader: Arc<dyn Uploader>,
}

impl WebhookServer {
    /// Create a server that records payloads through `tracing`.
    ///
    /// Nothing is bound until [`WebhookServer::run`].
    pub fn new(
        config: ServerConfig,
        downloader: Arc<dyn Downloader>,
        uploader: Arc<dyn Uploader>,
    ) -> Self {
        Self::with_sink(config, downloader, uploader, Arc::new(TracingSink))
    }

    /// Create a server that hands decoded payloads to `sink`.
    pub fn with_sink(
        config: ServerConfig,
        downloader: Arc<dyn Downloader>,
        uploader: Arc<dyn Uploader>,
        sink: Arc<dyn PayloadSink>,
    ) -> Self {
        let state = StateTracker::new();
        let handle = ServerHandle {
            inner: axum_server::Handle::new(),
            closed: Arc::new(AtomicBool::new(false)),
            state: state.subscribe(),
        };

        Self {
            config,
            router: Self::build_router(sink),
            handle,
            state,
            downloader,
            uploader,
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(sink: Arc<dyn PayloadSink>) -> Router {
        webhook::router(sink)
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "webhook_request",
                    request_id = %request_id(request),
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }))
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, UuidRequestId))
    }

    /// Handle for observing and closing the server from another task.
    pub fn handle(&self) -> ServerHandle {
        self.handle.clone()
    }

    pub fn listen_address(&self) -> &str {
        &self.config.listen_address
    }

    pub fn downloader(&self) -> &Arc<dyn Downloader> {
        &self.downloader
    }

    pub fn uploader(&self) -> &Arc<dyn Uploader> {
        &self.uploader
    }

    /// Serve until `shutdown` fires, then close and join the serving task.
    ///
    /// The transport is fixed when this is called. Returns `Ok(())` when the
    /// close succeeded and the serving task stopped only because of it;
    /// otherwise a [`RunError`] carrying each failure.
    pub async fn run(self, mut shutdown: ShutdownSignal) -> Result<(), RunError> {
        if self.config.has_partial_tls() {
            tracing::warn!(
                tls_cert = ?self.config.tls_cert,
                tls_key = ?self.config.tls_key,
                "Only one of the TLS certificate and key is set; serving plaintext"
            );
        }
        let transport = Transport::from_config(&self.config);

        tracing::info!(
            address = %self.config.listen_address,
            scheme = transport.scheme(),
            "Webhook server starting"
        );

        // Sized for the single terminal result; the send never waits.
        let (result_tx, result_rx) = oneshot::channel();
        let serve = listener::serve(
            self.config.listen_address.clone(),
            transport,
            self.handle.inner.clone(),
            self.router.clone(),
        );
        // Stops the serving task if this future is dropped before it joins.
        let _serving = ShutdownOnDrop(self.handle.inner.clone());
        self.state.advance(LifecycleState::Serving);
        tokio::spawn(async move {
            let terminal = serve.await;
            if !terminal.is_closed() {
                tracing::error!(error = %terminal, "Webhook server stopped serving");
            }
            let _ = result_tx.send(terminal);
        });

        shutdown.cancelled().await;
        self.state.advance(LifecycleState::ShuttingDown);
        tracing::info!("Closing webhook server");

        let close = self.handle.close().err();
        let serve = result_rx.await.unwrap_or(ServeError::Aborted);

        self.state.advance(LifecycleState::Stopped);
        let outcome = RunError::combine(close, Some(serve));
        match &outcome {
            Ok(()) => tracing::info!("Webhook server stopped"),
            Err(e) => tracing::error!(error = %e, "Webhook server stopped with errors"),
        }
        outcome
    }
}

/// Shuts the listener down when dropped.
struct ShutdownOnDrop(axum_server::Handle);

impl Drop for ShutdownOnDrop {
    fn drop(&mut self) {
        self.0.shutdown();
    }
}

/// Cloneable view of a running [`WebhookServer`].
#[derive(Clone)]
pub struct ServerHandle {
    inner: axum_server::Handle,
    closed: Arc<AtomicBool>,
    state: watch::Receiver<LifecycleState>,
}

impl ServerHandle {
    /// Current lifecycle state.
    pub fn state(&self) -> LifecycleState {
        *self.state.borrow()
    }

    /// Wait until the server reaches `target` or a later state.
    pub async fn wait_for(&self, target: LifecycleState) {
        let mut state = self.state.clone();
        let _ = state.wait_for(|s| *s >= target).await;
    }

    /// Address the listener is bound to, once it is listening.
    ///
    /// Resolves to `None` if binding fails.
    pub async fn listening(&self) -> Option<SocketAddr> {
        self.inner.listening().await
    }

    /// Number of open connections.
    pub fn connection_count(&self) -> usize {
        self.inner.connection_count()
    }

    /// Close the listener and every open connection without draining.
    ///
    /// Takes effect once; later calls return [`CloseError::AlreadyClosed`].
    pub fn close(&self) -> Result<(), CloseError> {
        if self.closed.swap(true, Ordering::SeqCst) {
            return Err(CloseError::AlreadyClosed);
        }
        self.inner.shutdown();
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::Shutdown;
    use crate::pipeline::Unconfigured;
    use std::time::Duration;

    fn server(address: &str) -> WebhookServer {
        WebhookServer::new(
            ServerConfig::plaintext(address),
            Arc::new(Unconfigured),
            Arc::new(Unconfigured),
        )
    }

    #[test]
    fn construction_binds_nothing() {
        let server = server("127.0.0.1:0");
        let handle = server.handle();
        assert_eq!(handle.state(), LifecycleState::Unstarted);
        assert_eq!(handle.connection_count(), 0);
        assert!(!handle.is_closed());
        assert_eq!(server.listen_address(), "127.0.0.1:0");
    }

    #[test]
    fn close_takes_effect_once() {
        let handle = server("127.0.0.1:0").handle();
        assert_eq!(handle.close(), Ok(()));
        assert_eq!(handle.close(), Err(CloseError::AlreadyClosed));
        assert!(handle.is_closed());
    }

    #[tokio::test]
    async fn immediate_cancellation_is_clean() {
        let server = server("127.0.0.1:0");
        let handle = server.handle();
        let shutdown = Shutdown::new();
        let signal = shutdown.subscribe();
        shutdown.trigger();

        let outcome = tokio::time::timeout(Duration::from_secs(5), server.run(signal))
            .await
            .expect("run did not return after cancellation");

        assert!(outcome.is_ok(), "unexpected error: {outcome:?}");
        assert_eq!(handle.state(), LifecycleState::Stopped);
        assert!(handle.is_closed());
    }

    #[tokio::test]
    async fn unresolvable_address_is_a_serve_error() {
        let server = server("127.0.0.1");
        let shutdown = Shutdown::new();
        let signal = shutdown.subscribe();
        shutdown.trigger();

        let err = server.run(signal).await.unwrap_err();
        assert!(err.close_error().is_none());
        assert!(matches!(err.serve_error(), Some(ServeError::Resolve { .. })));
    }
}
