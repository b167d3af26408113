//! # match-emitter - Pattern-Matching Event Emitter
//!
//! `match-emitter` is an in-process publish/subscribe dispatcher. Listeners are
//! registered against a literal name, a wildcard string or a regular
//! expression; events are emitted by literal name and delivered to the first
//! registered pattern that matches.
//!
//! ## Quick Start
//!
//! ```rust
//! use match_emitter::{Callback, MatchEmitter};
//!
//! let emitter = MatchEmitter::<&str>::new();
//!
//! emitter
//!     .on("user:*", Callback::new(|_, args| {
//!         println!("user event with {args:?}");
//!     }))
//!     .unwrap();
//!
//! assert!(emitter.emit("user:login", &["alice"]).unwrap());
//! assert!(!emitter.emit("system:boot", &[]).unwrap());
//! ```
//!
//! ## Matching
//!
//! - A wildcard string has each `*` replaced by `(.*)` and is compiled as a
//!   regular expression. Other metacharacters are **not** escaped.
//! - Matching is a search: `"is"` matches `"this"`.
//! - The first pattern registered wins. Resolutions are memoized per event name.
//!
//! ## Features
//!
//! - `tracing` (default): structured logs for registration, resolution and removal.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod config;
mod emitter;
mod listener;
pub mod testing;

pub use config::{EmitterBuilder, EmitterConfig};
pub use emitter::{MatchEmitter, Resolution};
pub use listener::{Callback, Listener};

pub use match_emitter_core::{
    BoxError, EmitterError, Expression, IntoOutcome, Pattern, Regex, validate, wildcard_to_regex,
};

/// Prelude module - common imports for match-emitter.
///
/// # Usage
///
/// ```rust
/// use match_emitter::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        BoxError, Callback, EmitterError, Expression, Listener, MatchEmitter, Regex,
    };
}
