//! Error types for match-emitter.
//!
//! - [`EmitterError`] - Top-level error type returned by every fallible operation
//! - [`BoxError`] - Type-erased error produced by listeners

use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by the emitter.
#[derive(Error, Debug)]
pub enum EmitterError {
    /// The expression could not be turned into a matching pattern.
    ///
    /// Wildcard strings are compiled as regular expressions without escaping,
    /// so unbalanced metacharacters such as `"a(b*"` end up here.
    #[error("event to listen to needs to be either a wildcard string or a regular expression, got `{expression}`")]
    InvalidExpressionKind {
        /// The expression text as supplied by the caller.
        expression: String,
        /// The compilation failure.
        #[source]
        source: regex::Error,
    },

    /// A listener failed while an event was being delivered.
    ///
    /// Delivery for that `emit` call stops at the failing listener.
    #[error("listener for event `{event}` failed")]
    Listener {
        /// The literal event name that was being emitted.
        event: String,
        /// The error returned by the listener.
        #[source]
        source: BoxError,
    },
}

impl EmitterError {
    /// Returns `true` if this is a validation error.
    pub fn is_invalid_expression(&self) -> bool {
        matches!(self, EmitterError::InvalidExpressionKind { .. })
    }

    /// Returns `true` if a listener failed during delivery.
    pub fn is_listener(&self) -> bool {
        matches!(self, EmitterError::Listener { .. })
    }
}
