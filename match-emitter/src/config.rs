//! Emitter configuration and builder.

use crate::emitter::MatchEmitter;

/// Tunables for a [`MatchEmitter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EmitterConfig {
    /// Maximum number of event names remembered by the hit cache.
    ///
    /// `None` is unbounded. Once the limit is reached, further scan matches
    /// are still delivered but no longer memoized. `Some(0)` turns the cache off.
    ///
    /// The capacity changes dispatch, not only speed. A memoized name keeps
    /// resolving to the pattern that first claimed it, even after an exact key
    /// equal to the name is registered. A name that was never memoized goes to
    /// that exact key instead.
    ///
    /// ```
    /// use match_emitter::MatchEmitter;
    ///
    /// for emitter in [MatchEmitter::<()>::new(), MatchEmitter::<()>::builder().without_cache().build()] {
    ///     emitter.on("coo*", |_: &MatchEmitter<()>, _: &[()]| {}).unwrap();
    ///     emitter.emit("cool", &[]).unwrap();
    ///     emitter.on("cool", |_: &MatchEmitter<()>, _: &[()]| {}).unwrap();
    ///
    ///     let (key, _) = emitter.resolve("cool").unwrap();
    ///     if emitter.config().cache_capacity == Some(0) {
    ///         assert_eq!(key, "cool");
    ///     } else {
    ///         assert_eq!(key, "coo(.*)");
    ///     }
    /// }
    /// ```
    pub cache_capacity: Option<usize>,
}

impl EmitterConfig {
    /// Create the default configuration (unbounded cache).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the hit cache capacity.
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = Some(capacity);
        self
    }

    /// Disable memoization entirely.
    pub fn without_cache(self) -> Self {
        self.with_cache_capacity(0)
    }

    /// Whether one more name may be memoized when `cached` are already stored.
    pub(crate) fn admits(&self, cached: usize) -> bool {
        self.cache_capacity.is_none_or(|capacity| cached < capacity)
    }
}

/// Builder for constructing a [`MatchEmitter`].
///
/// # Example
/// ```
/// use match_emitter::MatchEmitter;
///
/// let emitter = MatchEmitter::<()>::builder()
///     .with_cache_capacity(1024)
///     .build::<()>();
/// assert!(emitter.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct EmitterBuilder {
    config: EmitterConfig,
}

impl EmitterBuilder {
    /// Create a new builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bound the hit cache.
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.config = self.config.with_cache_capacity(capacity);
        self
    }

    /// Disable the hit cache.
    pub fn without_cache(mut self) -> Self {
        self.config = self.config.without_cache();
        self
    }

    /// Replace the whole configuration.
    pub fn with_config(mut self, config: EmitterConfig) -> Self {
        self.config = config;
        self
    }

    /// Get the configuration built so far.
    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    /// Build an empty emitter.
    pub fn build<A: 'static>(self) -> MatchEmitter<A> {
        MatchEmitter::with_config(self.config)
    }
}
