//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events and spans
//!     → logging.rs (subscriber: filter + pretty/JSON formatter)
//!     → stdout
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Request ID recorded on every request span
//! - `RUST_LOG` overrides the configured level

pub mod logging;

pub use logging::init_logging;
