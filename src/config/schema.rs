//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Root configuration for the webhook receiver.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ReceiverConfig {
    /// Listener configuration (bind address, TLS).
    pub server: ServerConfig,

    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Listener configuration consumed when the server is constructed.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address in `host:port` form (e.g., "0.0.0.0:8080").
    pub listen_address: String,

    /// Path to the TLS certificate chain (PEM).
    pub tls_cert: Option<PathBuf>,

    /// Path to the TLS private key (PEM).
    pub tls_key: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: "0.0.0.0:8080".to_string(),
            tls_cert: None,
            tls_key: None,
        }
    }
}

impl ServerConfig {
    /// Plaintext configuration for the given address.
    pub fn plaintext(listen_address: impl Into<String>) -> Self {
        Self {
            listen_address: listen_address.into(),
            tls_cert: None,
            tls_key: None,
        }
    }

    /// Certificate and key paths, only when both are set and non-empty.
    ///
    /// A half-configured pair yields `None` and the server falls back to
    /// plaintext.
    pub fn tls_paths(&self) -> Option<(&Path, &Path)> {
        match (non_empty(&self.tls_cert), non_empty(&self.tls_key)) {
            (Some(cert), Some(key)) => Some((cert, key)),
            _ => None,
        }
    }

    /// True when exactly one of the certificate and key is set.
    pub fn has_partial_tls(&self) -> bool {
        non_empty(&self.tls_cert).is_some() != non_empty(&self.tls_key).is_some()
    }
}

fn non_empty(path: &Option<PathBuf>) -> Option<&Path> {
    path.as_deref().filter(|p| !p.as_os_str().is_empty())
}

/// Output format for log records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable, for development.
    #[default]
    Pretty,
    /// One JSON object per line, for log aggregation.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence when set.
    pub level: String,

    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "webhook_receiver=info,tower_http=info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}
