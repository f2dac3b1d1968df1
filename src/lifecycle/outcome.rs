//! Terminal errors of a server run and how they combine.

use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;

use crate::net::tls::TlsError;

/// Why the serving task stopped.
///
/// The serving task always ends with one of these, including on a deliberate
/// close, so the caller can tell an intended stop from a failure.
#[derive(Debug, Error)]
pub enum ServeError {
    /// The server was closed on purpose. Not a failure.
    #[error("server closed")]
    Closed,

    /// The listen address could not be resolved.
    #[error("failed to resolve listen address {address}: {source}")]
    Resolve {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// The certificate or key could not be loaded.
    #[error(transparent)]
    Tls(#[from] TlsError),

    /// Binding the listener or serving connections failed.
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),

    /// The serving task went away without reporting a result.
    #[error("serving task aborted before reporting a result")]
    Aborted,
}

impl ServeError {
    /// True for the expected-closure condition.
    pub fn is_closed(&self) -> bool {
        matches!(self, ServeError::Closed)
    }
}

/// Failure while closing the listener.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CloseError {
    /// Close had already been issued on this server.
    #[error("server already closed")]
    AlreadyClosed,
}

/// Combined failure of a server run.
///
/// Holds the close error and the serve error side by side. At least one is
/// always present.
#[derive(Debug)]
pub struct RunError {
    close: Option<CloseError>,
    serve: Option<ServeError>,
}

impl RunError {
    /// Merge the close result with the serving task's terminal error.
    ///
    /// [`ServeError::Closed`] counts as success. Returns `Ok(())` when neither
    /// side failed.
    pub fn combine(close: Option<CloseError>, serve: Option<ServeError>) -> Result<(), RunError> {
        let serve = serve.filter(|e| !e.is_closed());
        if close.is_none() && serve.is_none() {
            return Ok(());
        }
        Err(RunError { close, serve })
    }

    pub fn close_error(&self) -> Option<&CloseError> {
        self.close.as_ref()
    }

    pub fn serve_error(&self) -> Option<&ServeError> {
        self.serve.as_ref()
    }

    /// True when both the close and the serving task failed.
    pub fn is_combined(&self) -> bool {
        self.close.is_some() && self.serve.is_some()
    }

    /// Every contained error, close first.
    pub fn errors(&self) -> Vec<&(dyn StdError + 'static)> {
        let mut errors: Vec<&(dyn StdError + 'static)> = Vec::with_capacity(2);
        if let Some(close) = &self.close {
            errors.push(close);
        }
        if let Some(serve) = &self.serve {
            errors.push(serve);
        }
        errors
    }
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.close, &self.serve) {
            (Some(close), Some(serve)) => write!(f, "close: {close}; serve: {serve}"),
            (Some(close), None) => write!(f, "close: {close}"),
            (None, Some(serve)) => write!(f, "serve: {serve}"),
            (None, None) => f.write_str("no error"),
        }
    }
}

impl StdError for RunError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match (&self.serve, &self.close) {
            (Some(serve), _) => Some(serve),
            (None, Some(close)) => Some(close),
            (None, None) => None,
        }
    }
}
