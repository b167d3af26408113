//! Testing utilities for match-emitter.
//!
//! - [`RecordingListener`]: records the arguments of every delivery
//! - [`CountingListener`]: counts deliveries

use crate::{
    emitter::MatchEmitter,
    listener::{Callback, Listener},
};
use match_emitter_core::BoxError;
use std::sync::{
    Arc, Mutex, PoisonError,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Recording Listener
// ============================================================================

/// A listener that records the argument list of every delivery.
///
/// Clones share the same record, so keep one clone for assertions and turn
/// another into a [`Callback`].
///
/// # Example
///
/// ```
/// use match_emitter::{MatchEmitter, testing::RecordingListener};
///
/// let recorder = RecordingListener::<i32>::new();
/// let emitter = MatchEmitter::new();
/// emitter.on("coo*", recorder.callback()).unwrap();
///
/// emitter.emit("cool", &[10, 20]).unwrap();
/// assert_eq!(recorder.calls(), vec![vec![10, 20]]);
/// ```
pub struct RecordingListener<A> {
    calls: Arc<Mutex<Vec<Vec<A>>>>,
    failure: Arc<Mutex<Option<String>>>,
}

impl<A: Clone + 'static> RecordingListener<A> {
    /// Create a new recording listener.
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            failure: Arc::new(Mutex::new(None)),
        }
    }

    /// A callback handle backed by this recorder.
    pub fn callback(&self) -> Callback<A> {
        Callback::from_listener(self.clone())
    }

    /// Make every following delivery fail with `message` (after recording it).
    pub fn set_error(&self, message: impl Into<String>) {
        *self.failure.lock().unwrap_or_else(PoisonError::into_inner) = Some(message.into());
    }

    /// Clear error state.
    pub fn clear_error(&self) {
        *self.failure.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Get a clone of the recorded argument lists.
    pub fn calls(&self) -> Vec<Vec<A>> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Get the number of recorded deliveries.
    pub fn count(&self) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Clear all recorded deliveries.
    pub fn clear(&self) {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

impl<A: Clone + 'static> Default for RecordingListener<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Clone for RecordingListener<A> {
    fn clone(&self) -> Self {
        Self {
            calls: self.calls.clone(),
            failure: self.failure.clone(),
        }
    }
}

impl<A: Clone + 'static> Listener<A> for RecordingListener<A> {
    fn on_event(&self, _emitter: &MatchEmitter<A>, args: &[A]) -> Result<(), BoxError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(args.to_vec());

        match &*self.failure.lock().unwrap_or_else(PoisonError::into_inner) {
            Some(message) => Err(message.clone().into()),
            None => Ok(()),
        }
    }
}

// ============================================================================
// Counting Listener
// ============================================================================

/// A listener that counts invocations.
///
/// # Example
///
/// ```
/// use match_emitter::{MatchEmitter, testing::CountingListener};
///
/// let counter = CountingListener::new();
/// let emitter = MatchEmitter::<()>::new();
/// emitter.once("tick", counter.callback::<()>()).unwrap();
///
/// emitter.emit("tick", &[]).unwrap();
/// emitter.emit("tick", &[]).unwrap();
/// assert_eq!(counter.count(), 1);
/// ```
#[derive(Clone, Default)]
pub struct CountingListener {
    count: Arc<AtomicUsize>,
}

impl CountingListener {
    /// Create a new counting listener.
    pub fn new() -> Self {
        Self::default()
    }

    /// A callback handle backed by this counter.
    pub fn callback<A: 'static>(&self) -> Callback<A> {
        Callback::from_listener(self.clone())
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

impl<A> Listener<A> for CountingListener {
    fn on_event(&self, _emitter: &MatchEmitter<A>, _args: &[A]) -> Result<(), BoxError> {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
