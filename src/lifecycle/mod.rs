//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Shutdown::trigger
//!
//! Shutdown (shutdown.rs):
//!     Shutdown::trigger → every ShutdownSignal resolves
//!
//! Server run (state.rs, outcome.rs):
//!     Unstarted → Serving → ShuttingDown → Stopped
//!     close error + serve error → RunError
//! ```
//!
//! # Design Decisions
//! - Cancellation is external: the server only reacts to a ShutdownSignal
//! - Close is immediate; there is no drain period and no shutdown timeout
//! - Both failure sides of a run are kept, never flattened into one string

pub mod outcome;
pub mod shutdown;
pub mod signals;
pub mod state;

pub use outcome::{CloseError, RunError, ServeError};
pub use shutdown::{Shutdown, ShutdownSignal};
pub use state::{LifecycleState, StateTracker};
