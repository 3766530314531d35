//! Dispatch error definitions.

use thiserror::Error;

/// Boxed error produced by a handler.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can abort a dispatch.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No registered pattern matched the path.
    #[error("{path} not found")]
    RouteNotFound { path: String },

    /// The continuation was invoked after the last route handler.
    #[error("unexpected next for {path}, no more handlers")]
    HandlersExhausted { path: String },

    /// The matcher captured a different number of values than it declared.
    #[error("pattern {pattern} declares {expected} parameters but captured {found}")]
    ParamMismatch {
        pattern: String,
        expected: usize,
        found: usize,
    },

    /// A handler invoked its continuation more than once.
    #[error("continuation invoked twice by the same handler for {path}")]
    ContinuationReused { path: String },

    /// A handler failed.
    #[error("handler failed: {0}")]
    Handler(#[source] BoxError),
}

impl DispatchError {
    /// Wrap a handler's own error.
    pub fn handler(err: impl Into<BoxError>) -> Self {
        Self::Handler(err.into())
    }
}

/// Result type for dispatch operations.
pub type DispatchResult<T> = Result<T, DispatchError>;
