//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! listen address
//!     → listener.rs (resolve, pick transport, bind, accept loop)
//!     → tls.rs (load certificate and key when TLS is configured)
//!     → Hand off to HTTP layer
//! ```
//!
//! # Design Decisions
//! - Transport is chosen once per run and never re-evaluated
//! - TLS is optional; a half-configured pair means plaintext
//! - No port is bound until the serve loop starts

pub mod listener;
pub mod tls;

pub use listener::Transport;
pub use tls::TlsError;
