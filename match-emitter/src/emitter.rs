//! The pattern-matching emitter.
//!
//! Listeners are registered against an [`Expression`]. Each expression is
//! compiled into a [`Pattern`] and stored under its canonical key, in
//! registration order. An emitted event name is resolved to exactly one key:
//!
//! 1. the hit cache, if the name has been resolved before
//! 2. a key equal to the name
//! 3. the first registered pattern that matches the name (then memoized)
//!
//! Every listener under the selected key runs in registration order. Patterns
//! registered later never see an event an earlier pattern already claimed.

use crate::{
    config::{EmitterBuilder, EmitterConfig},
    listener::Callback,
};
use indexmap::{IndexMap, map::Entry};
use match_emitter_core::{EmitterError, Expression, Pattern, validate};
use std::{cell::RefCell, collections::HashMap, fmt};

/// How an event name was resolved to a pattern key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Found in the hit cache.
    Cached,
    /// A key equal to the event name.
    Exact,
    /// First matching pattern in registration order.
    Scanned,
}

/// One registered listener.
struct ListenerEntry<A> {
    id: u64,
    callback: Callback<A>,
    once: bool,
}

impl<A> Clone for ListenerEntry<A> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            callback: self.callback.clone(),
            once: self.once,
        }
    }
}

/// Listeners stored under one pattern key.
enum Slot<A> {
    Single(ListenerEntry<A>),
    Many(Vec<ListenerEntry<A>>),
}

impl<A> Slot<A> {
    /// Append, promoting a single listener to a sequence.
    fn push(&mut self, entry: ListenerEntry<A>) {
        let previous = std::mem::replace(self, Slot::Many(Vec::new()));
        *self = match previous {
            Slot::Single(first) => Slot::Many(vec![first, entry]),
            Slot::Many(mut entries) => {
                entries.push(entry);
                Slot::Many(entries)
            }
        };
    }

    fn len(&self) -> usize {
        match self {
            Slot::Single(_) => 1,
            Slot::Many(entries) => entries.len(),
        }
    }

    fn snapshot(&self) -> Vec<ListenerEntry<A>> {
        match self {
            Slot::Single(entry) => vec![entry.clone()],
            Slot::Many(entries) => entries.clone(),
        }
    }

    /// Drop the given listener ids. Returns `true` if nothing is left.
    fn retire(&mut self, spent: &[u64]) -> bool {
        match self {
            Slot::Single(entry) => spent.contains(&entry.id),
            Slot::Many(entries) => {
                entries.retain(|entry| !spent.contains(&entry.id));
                entries.is_empty()
            }
        }
    }

    /// Take out the first listener with this callback.
    ///
    /// The flag is `true` if nothing is left; a matching `Single` entry stays in
    /// place and goes away with the slot.
    fn remove(&mut self, callback: &Callback<A>) -> (Option<ListenerEntry<A>>, bool) {
        match self {
            Slot::Single(entry) => (None, entry.callback == *callback),
            Slot::Many(entries) => {
                let removed = entries
                    .iter()
                    .position(|e| e.callback == *callback)
                    .map(|index| entries.remove(index));
                (removed, entries.is_empty())
            }
        }
    }
}

struct Registration<A> {
    pattern: Pattern,
    slot: Slot<A>,
}

struct State<A> {
    listeners: IndexMap<String, Registration<A>>,
    hits: HashMap<String, String>,
    next_id: u64,
}

impl<A> State<A> {
    fn new() -> Self {
        Self {
            listeners: IndexMap::new(),
            hits: HashMap::new(),
            next_id: 0,
        }
    }

    fn lookup(&self, event: &str) -> Option<(&str, Resolution)> {
        let cached = self
            .hits
            .get(event)
            .filter(|key| self.listeners.contains_key(key.as_str()));
        if let Some(key) = cached {
            return Some((key.as_str(), Resolution::Cached));
        }
        if let Some((key, _)) = self.listeners.get_key_value(event) {
            return Some((key.as_str(), Resolution::Exact));
        }
        self.listeners
            .iter()
            .find(|(_, registration)| registration.pattern.is_match(event))
            .map(|(key, _)| (key.as_str(), Resolution::Scanned))
    }

    /// Delete a slot and every cache entry pointing at it.
    ///
    /// The registration is handed back so the caller can drop it once the
    /// state is no longer borrowed.
    fn remove_slot(&mut self, key: &str) -> Option<Registration<A>> {
        let removed = self.listeners.shift_remove(key);
        self.scrub(key);
        removed
    }

    fn scrub(&mut self, key: &str) {
        self.hits.retain(|_, hit| hit != key);
    }
}

/// An event emitter that routes by wildcard and regular expression patterns.
///
/// `A` is the argument type passed through [`emit`](Self::emit) to every
/// listener. All methods take `&self`; listeners receive the emitter and may
/// call back into it while they run. The emitter is single-threaded.
///
/// # Example
/// ```
/// use match_emitter::{Callback, MatchEmitter, Regex};
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let emitter = MatchEmitter::<u32>::new();
/// let hits = Rc::new(Cell::new(0));
///
/// let seen = hits.clone();
/// emitter
///     .on(Regex::new("cool|awesome").unwrap(), Callback::new(move |_, _: &[u32]| {
///         seen.set(seen.get() + 1);
///     }))
///     .unwrap();
/// emitter
///     .on("awe*", Callback::new(|_, _: &[u32]| -> Result<(), String> {
///         Err("claimed by the earlier pattern".into())
///     }))
///     .unwrap();
///
/// assert!(emitter.emit("awesome", &[10, 20]).unwrap());
/// assert_eq!(hits.get(), 1);
/// ```
pub struct MatchEmitter<A> {
    state: RefCell<State<A>>,
    config: EmitterConfig,
}

impl<A: 'static> MatchEmitter<A> {
    /// Create an empty emitter with the default configuration.
    pub fn new() -> Self {
        Self::with_config(EmitterConfig::default())
    }

    /// Create an empty emitter with the given configuration.
    pub fn with_config(config: EmitterConfig) -> Self {
        Self {
            state: RefCell::new(State::new()),
            config,
        }
    }

    /// Start building an emitter.
    pub fn builder() -> EmitterBuilder {
        EmitterBuilder::new()
    }

    /// The configuration this emitter was built with.
    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    /// Register a listener that stays until removed.
    ///
    /// # Errors
    ///
    /// [`EmitterError::InvalidExpressionKind`] if the expression does not compile.
    pub fn on(
        &self,
        expression: impl Into<Expression>,
        callback: impl Into<Callback<A>>,
    ) -> Result<(), EmitterError> {
        self.add_listener(expression.into(), callback.into(), false)
    }

    /// Register a listener that is removed after its first delivery.
    ///
    /// # Errors
    ///
    /// [`EmitterError::InvalidExpressionKind`] if the expression does not compile.
    pub fn once(
        &self,
        expression: impl Into<Expression>,
        callback: impl Into<Callback<A>>,
    ) -> Result<(), EmitterError> {
        self.add_listener(expression.into(), callback.into(), true)
    }

    fn add_listener(
        &self,
        expression: Expression,
        callback: Callback<A>,
        once: bool,
    ) -> Result<(), EmitterError> {
        let pattern = validate(expression)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(key = pattern.key(), once, "listener registered");

        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;

        let entry = ListenerEntry { id, callback, once };
        match state.listeners.entry(pattern.key().to_owned()) {
            Entry::Vacant(vacant) => {
                vacant.insert(Registration {
                    pattern,
                    slot: Slot::Single(entry),
                });
            }
            Entry::Occupied(occupied) => occupied.into_mut().slot.push(entry),
        }
        Ok(())
    }

    /// Deliver an event to the listeners of the pattern that claims `event`.
    ///
    /// Returns `Ok(false)` when no pattern matches. Listeners run synchronously
    /// in registration order with `args` passed through untouched.
    ///
    /// # Errors
    ///
    /// [`EmitterError::Listener`] with the first listener error. Listeners after
    /// the failing one are not invoked and one-shot listeners of this delivery
    /// stay registered.
    pub fn emit(&self, event: &str, args: &[A]) -> Result<bool, EmitterError> {
        let Some((key, batch)) = self.select(event) else {
            #[cfg(feature = "tracing")]
            tracing::trace!(event, "no listener interested");
            return Ok(false);
        };

        // The registry is not borrowed here; listeners may re-enter.
        let mut spent = Vec::new();
        for entry in &batch {
            entry
                .callback
                .call(self, args)
                .map_err(|source| EmitterError::Listener {
                    event: event.to_owned(),
                    source,
                })?;
            if entry.once {
                spent.push(entry.id);
            }
        }

        if !spent.is_empty() {
            let mut state = self.state.borrow_mut();
            let emptied = state
                .listeners
                .get_mut(&key)
                .is_some_and(|registration| registration.slot.retire(&spent));
            let removed = if emptied {
                #[cfg(feature = "tracing")]
                tracing::debug!(key = %key, "last one-shot listener fired");
                state.remove_slot(&key)
            } else {
                None
            };
            drop(state);
            drop(removed);
        }

        // Spent listeners are dropped with the batch, after the borrow ends.
        drop(batch);
        Ok(true)
    }

    /// Resolve `event`, memoize a scan match, and snapshot the selected listeners.
    fn select(&self, event: &str) -> Option<(String, Vec<ListenerEntry<A>>)> {
        let mut state = self.state.borrow_mut();
        let (key, resolution) = state
            .lookup(event)
            .map(|(key, resolution)| (key.to_owned(), resolution))?;

        #[cfg(feature = "tracing")]
        tracing::trace!(event, key = %key, ?resolution, "event resolved");

        if resolution == Resolution::Scanned && self.config.admits(state.hits.len()) {
            state.hits.insert(event.to_owned(), key.clone());
        }

        let batch = state.listeners.get(&key)?.slot.snapshot();
        Some((key, batch))
    }

    /// Remove one registration of `callback` under `expression`.
    ///
    /// `expression` must reduce to the same key as the one used to register.
    /// Unknown keys and callbacks are ignored.
    ///
    /// # Errors
    ///
    /// [`EmitterError::InvalidExpressionKind`] if the expression does not compile.
    pub fn remove_listener(
        &self,
        expression: impl Into<Expression>,
        callback: &Callback<A>,
    ) -> Result<(), EmitterError> {
        let pattern = validate(expression)?;
        let key = pattern.key();
        let mut state = self.state.borrow_mut();

        let (removed, emptied) = state
            .listeners
            .get_mut(key)
            .map_or((None, false), |registration| registration.slot.remove(callback));
        let slot = if emptied {
            state.listeners.shift_remove(key)
        } else {
            None
        };
        state.scrub(key);

        // Listener drops may call back into the emitter.
        drop(state);
        drop((removed, slot));

        #[cfg(feature = "tracing")]
        tracing::debug!(key, emptied, "listener removed");

        Ok(())
    }

    /// Drop every registration and every cached resolution.
    ///
    /// The listeners are dropped after the registry is released, so a listener
    /// whose destructor touches the emitter sees it already empty.
    pub fn remove_all_listeners(&self) {
        let mut state = self.state.borrow_mut();
        let listeners = std::mem::take(&mut state.listeners);
        state.hits.clear();
        drop(state);
        drop(listeners);

        #[cfg(feature = "tracing")]
        tracing::debug!("all listeners removed");
    }

    /// Number of listeners registered under `expression`'s key.
    ///
    /// # Errors
    ///
    /// [`EmitterError::InvalidExpressionKind`] if the expression does not compile.
    pub fn listener_count(&self, expression: impl Into<Expression>) -> Result<usize, EmitterError> {
        let pattern = validate(expression)?;
        Ok(self
            .state
            .borrow()
            .listeners
            .get(pattern.key())
            .map_or(0, |registration| registration.slot.len()))
    }

    /// Whether `expression`'s key has a slot.
    ///
    /// # Errors
    ///
    /// [`EmitterError::InvalidExpressionKind`] if the expression does not compile.
    pub fn has_pattern(&self, expression: impl Into<Expression>) -> Result<bool, EmitterError> {
        let pattern = validate(expression)?;
        Ok(self.state.borrow().listeners.contains_key(pattern.key()))
    }

    /// Registered pattern keys in precedence order.
    pub fn patterns(&self) -> Vec<String> {
        self.state.borrow().listeners.keys().cloned().collect()
    }

    /// Number of pattern keys with at least one listener.
    pub fn pattern_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }

    /// Whether no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.state.borrow().listeners.is_empty()
    }

    /// Number of memoized event names.
    pub fn cached_names(&self) -> usize {
        self.state.borrow().hits.len()
    }

    /// The key `emit(event, ..)` would deliver to, without delivering or memoizing.
    pub fn resolve(&self, event: &str) -> Option<(String, Resolution)> {
        self.state
            .borrow()
            .lookup(event)
            .map(|(key, resolution)| (key.to_owned(), resolution))
    }
}

impl<A: 'static> Default for MatchEmitter<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> fmt::Debug for MatchEmitter<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("MatchEmitter");
        if let Ok(state) = self.state.try_borrow() {
            let patterns: Vec<&String> = state.listeners.keys().collect();
            debug.field("patterns", &patterns);
            debug.field("cached_names", &state.hits.len());
        }
        debug.field("config", &self.config).finish()
    }
}
