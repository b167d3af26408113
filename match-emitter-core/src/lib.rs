//! # match-emitter-core
//!
//! Pattern validation and error types for the match-emitter dispatcher.
//!
//! This crate has minimal dependencies and holds everything about *what* a
//! listener is registered against, independent of the dispatcher itself:
//!
//! - [`Expression`]: a wildcard string or a [`regex::Regex`] supplied by the caller
//! - [`Pattern`]: the compiled form, keyed by its canonical source text
//! - [`validate`]: the conversion between the two
//! - [`IntoOutcome`]: how listener return values become success or failure
//!
//! # Error Types
//!
//! - [`EmitterError`] - Top-level error type
//! - [`BoxError`] - Listener errors

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod error;
mod expression;
mod outcome;

// Re-exports
pub use error::{BoxError, EmitterError};
pub use expression::{
    Expression, Pattern, WILDCARD, WILDCARD_REPLACEMENT, validate, wildcard_to_regex,
};
pub use outcome::IntoOutcome;

pub use regex::Regex;
