//! Listener binding and the serve loop.
//!
//! # Responsibilities
//! - Resolve the configured `host:port`
//! - Choose plaintext or TLS once, before binding
//! - Run the accept loop until the handle is closed or the transport fails

use std::net::SocketAddr;
use std::path::PathBuf;

use axum::Router;
use axum_server::Handle;

use crate::config::ServerConfig;
use crate::lifecycle::ServeError;
use crate::net::tls::load_tls_config;

/// Transport the listener serves over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transport {
    Plaintext,
    Tls { cert: PathBuf, key: PathBuf },
}

impl Transport {
    /// TLS when both certificate and key are configured, plaintext otherwise.
    pub fn from_config(config: &ServerConfig) -> Self {
        match config.tls_paths() {
            Some((cert, key)) => Transport::Tls {
                cert: cert.to_path_buf(),
                key: key.to_path_buf(),
            },
            None => Transport::Plaintext,
        }
    }

    pub fn is_tls(&self) -> bool {
        matches!(self, Transport::Tls { .. })
    }

    pub fn scheme(&self) -> &'static str {
        match self {
            Transport::Plaintext => "http",
            Transport::Tls { .. } => "https",
        }
    }
}

/// Resolve a `host:port` string to the first socket address it names.
pub async fn resolve(address: &str) -> std::io::Result<SocketAddr> {
    tokio::net::lookup_host(address).await?.next().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{address} did not resolve to any address"),
        )
    })
}

/// Bind and serve `app` until `handle` is shut down or serving fails.
///
/// Always returns the terminal condition; a deliberate shutdown yields
/// [`ServeError::Closed`].
pub async fn serve(address: String, transport: Transport, handle: Handle, app: Router) -> ServeError {
    let addr = match resolve(&address).await {
        Ok(addr) => addr,
        Err(source) => return ServeError::Resolve { address, source },
    };

    let service = app.into_make_service();
    let result = match transport {
        Transport::Plaintext => {
            axum_server::bind(addr)
                .handle(handle)
                .serve(service)
                .await
        }
        Transport::Tls { cert, key } => {
            let config = match load_tls_config(&cert, &key).await {
                Ok(config) => config,
                Err(e) => return e.into(),
            };
            axum_server::bind_rustls(addr, config)
                .handle(handle)
                .serve(service)
                .await
        }
    };

    match result {
        Ok(()) => ServeError::Closed,
        Err(e) => ServeError::Io(e),
    }
}
