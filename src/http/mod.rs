//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (Axum setup, lifecycle, middleware)
//!     → request.rs (request ID)
//!     → webhook.rs (decode payload, record it)
//!     → Send 200 or 500 to client
//! ```

pub mod request;
pub mod server;
pub mod webhook;

pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::{ServerHandle, WebhookServer};
pub use webhook::WEBHOOK_PATH;
