//! Listeners and the callback handles that identify them.
//!
//! A [`Listener`] is anything that can be invoked with the emitter and the
//! trailing arguments of an [`emit`](crate::MatchEmitter::emit) call. Closures
//! implement it automatically.
//!
//! Registration accepts anything convertible into a [`Callback`]: a handle, or
//! a closure with annotated parameters. A handle is cheap to clone and compares
//! by identity, so keep the handle used to register a listener if it will be
//! passed to [`remove_listener`](crate::MatchEmitter::remove_listener) later.
//!
//! ```
//! use match_emitter::{Callback, MatchEmitter};
//!
//! let emitter = MatchEmitter::<i32>::new();
//! let cb = Callback::new(|_: &MatchEmitter<i32>, args: &[i32]| {
//!     assert_eq!(args, &[10, 20]);
//! });
//!
//! emitter.on("coo*", cb.clone()).unwrap();
//! assert!(emitter.emit("cool", &[10, 20]).unwrap());
//!
//! emitter.remove_listener("coo*", &cb).unwrap();
//! assert!(!emitter.emit("cool", &[10, 20]).unwrap());
//!
//! // A bare closure works too when it will never be removed
//! emitter.on("warm", |_: &MatchEmitter<i32>, _: &[i32]| {}).unwrap();
//! assert!(emitter.emit("warm", &[]).unwrap());
//! ```

use crate::emitter::MatchEmitter;
use match_emitter_core::{BoxError, IntoOutcome};
use std::{fmt, rc::Rc};

/// Something that reacts to emitted events.
///
/// The emitter is passed as invocation context so a listener can register,
/// emit or remove listeners on the same emitter while it runs.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Listener` for arguments of type `{A}`",
    label = "missing `Listener` implementation",
    note = "Closures must have the shape `Fn(&MatchEmitter<{A}>, &[{A}]) -> R` where `R: IntoOutcome`."
)]
pub trait Listener<A>: 'static {
    /// Handle one delivery.
    ///
    /// Returning an error stops delivery to the remaining listeners of the
    /// current `emit` call.
    fn on_event(&self, emitter: &MatchEmitter<A>, args: &[A]) -> Result<(), BoxError>;
}

// Blanket impl for closures
impl<F, A, R> Listener<A> for F
where
    F: Fn(&MatchEmitter<A>, &[A]) -> R + 'static,
    R: IntoOutcome,
{
    fn on_event(&self, emitter: &MatchEmitter<A>, args: &[A]) -> Result<(), BoxError> {
        (self)(emitter, args).into_outcome()
    }
}

/// Shared handle to a registered listener.
///
/// Equality is identity: two handles are equal when they were cloned from
/// the same [`Callback::new`] call.
pub struct Callback<A> {
    inner: Rc<dyn Listener<A>>,
}

impl<A: 'static> Callback<A> {
    /// Wrap a closure.
    pub fn new<F, R>(f: F) -> Self
    where
        F: Fn(&MatchEmitter<A>, &[A]) -> R + 'static,
        R: IntoOutcome,
    {
        Self { inner: Rc::new(f) }
    }

    /// Wrap any [`Listener`] implementation.
    pub fn from_listener<L: Listener<A>>(listener: L) -> Self {
        Self {
            inner: Rc::new(listener),
        }
    }

    #[inline]
    pub(crate) fn call(&self, emitter: &MatchEmitter<A>, args: &[A]) -> Result<(), BoxError> {
        self.inner.on_event(emitter, args)
    }
}

impl<A, F, R> From<F> for Callback<A>
where
    A: 'static,
    F: Fn(&MatchEmitter<A>, &[A]) -> R + 'static,
    R: IntoOutcome,
{
    fn from(f: F) -> Self {
        Self::new(f)
    }
}

impl<A> Clone for Callback<A> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<A> PartialEq for Callback<A> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.inner), Rc::as_ptr(&other.inner))
    }
}

impl<A> Eq for Callback<A> {}

impl<A> fmt::Debug for Callback<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Callback")
            .field(&Rc::as_ptr(&self.inner).cast::<()>())
            .finish()
    }
}
