//! Download/upload pipeline reached from the webhook endpoint.
//!
//! # Data Flow
//! ```text
//! webhook request
//!     → payload.rs (opaque JSON document)
//!     → sink.rs (record the payload)
//!     → Downloader / Uploader (held by the server, not yet invoked)
//! ```
//!
//! The downloader and uploader are capabilities owned elsewhere. The server
//! keeps a reference to each so the webhook handler can be extended to start
//! work when a payload arrives.

pub mod payload;
pub mod sink;

pub use payload::{PayloadError, WebhookPayload};
pub use sink::{MemorySink, PayloadSink, TracingSink};

/// Fetches release artifacts after a webhook fires.
pub trait Downloader: Send + Sync + 'static {}

/// Publishes fetched artifacts to their destination.
pub trait Uploader: Send + Sync + 'static {}

/// Placeholder for a downloader or uploader that has not been wired in.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unconfigured;

impl Downloader for Unconfigured {}

impl Uploader for Unconfigured {}
