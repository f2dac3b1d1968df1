//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use webhook_receiver::pipeline::{MemorySink, Unconfigured};
use webhook_receiver::{RunError, ServerConfig, ServerHandle, Shutdown, WebhookServer};

/// Upper bound for anything that should happen "promptly".
pub const PROMPT: Duration = Duration::from_secs(5);

/// A server running on a background task.
pub struct RunningServer {
    pub handle: ServerHandle,
    pub shutdown: Shutdown,
    pub sink: MemorySink,
    pub task: JoinHandle<Result<(), RunError>>,
}

impl RunningServer {
    /// Wait for the listener to bind and return its address.
    pub async fn addr(&self) -> SocketAddr {
        tokio::time::timeout(PROMPT, self.handle.listening())
            .await
            .expect("server did not start listening")
            .expect("server failed to bind")
    }

    /// Trigger shutdown and wait for `run` to return.
    pub async fn stop(self) -> Result<(), RunError> {
        self.shutdown.trigger();
        tokio::time::timeout(PROMPT, self.task)
            .await
            .expect("run did not return after cancellation")
            .expect("run task panicked")
    }
}

/// Start a server for `config` that records payloads in memory.
pub fn start_server(config: ServerConfig) -> RunningServer {
    let sink = MemorySink::new();
    let server = WebhookServer::with_sink(
        config,
        Arc::new(Unconfigured),
        Arc::new(Unconfigured),
        Arc::new(sink.clone()),
    );
    let handle = server.handle();
    let shutdown = Shutdown::new();
    let signal = shutdown.subscribe();
    let task = tokio::spawn(server.run(signal));

    RunningServer {
        handle,
        shutdown,
        sink,
        task,
    }
}

/// Write a self-signed certificate for `localhost` and its key into `dir`.
pub fn write_self_signed(dir: &Path) -> (PathBuf, PathBuf) {
    let generated = rcgen::generate_simple_self_signed(vec!["localhost".to_string()])
        .expect("generate certificate");
    let cert = dir.join("cert.pem");
    let key = dir.join("key.pem");
    std::fs::write(&cert, generated.cert.pem()).unwrap();
    std::fs::write(&key, generated.key_pair.serialize_pem()).unwrap();
    (cert, key)
}

/// HTTP client without connection pooling or proxies.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .timeout(PROMPT)
        .build()
        .unwrap()
}

/// Client that trusts any certificate.
pub fn insecure_client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .timeout(PROMPT)
        .danger_accept_invalid_certs(true)
        .build()
        .unwrap()
}
