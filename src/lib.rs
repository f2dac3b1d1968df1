//! Webhook receiver library.
//!
//! Listens for webhook notifications from a source-control host, decodes the
//! JSON payload and records it. [`WebhookServer`] owns the listener, serves
//! plaintext or TLS, and shuts down immediately when its [`ShutdownSignal`]
//! fires, reporting close and serve failures together as a [`RunError`].

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod pipeline;

pub use config::{ReceiverConfig, ServerConfig};
pub use http::{ServerHandle, WebhookServer};
pub use lifecycle::{RunError, Shutdown, ShutdownSignal};
