//! `TryLazyCache` — recomputable lazy value with a fallible initializer.
//!
//! The initializer returns `Result<T, E>`. A failure is handed back to the
//! caller of [`TryLazyCache::get`] exactly as produced and nothing is stored,
//! so the next read retries from scratch. No error is ever cached.

use core::fmt;

use crate::cell::CacheSlot;

/// A lazily computed, resettable value whose computation can fail.
///
/// # Example
///
/// ```rust
/// use recache::TryLazyCache;
///
/// let attempts = std::cell::Cell::new(0);
/// let mut cache = TryLazyCache::new(|| {
///     attempts.set(attempts.get() + 1);
///     if attempts.get() == 1 { Err("not yet") } else { Ok(42) }
/// });
///
/// assert_eq!(cache.get(), Err("not yet"));
/// assert_eq!(cache.get(), Ok(&42));
/// assert_eq!(cache.get(), Ok(&42));
/// assert_eq!(attempts.get(), 2);
/// ```
#[derive(Clone)]
pub struct TryLazyCache<T, F> {
    slot: CacheSlot<T>,
    init: F,
}

impl<T, F> TryLazyCache<T, F> {
    /// Creates an empty cache bound to `init`. `init` is not called.
    #[inline]
    pub const fn new(init: F) -> Self {
        Self {
            slot: CacheSlot::Invalid,
            init,
        }
    }

    /// Returns `true` if a value is currently cached.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.slot.is_holding()
    }

    /// Returns the cached value without computing it.
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.slot.as_ref()
    }

    /// Drops the cached value, if any.
    pub fn invalidate(&mut self) {
        trace_event!(
            value = core::any::type_name::<T>(),
            was_valid = self.slot.is_holding(),
            "fallible lazy cache invalidated"
        );
        self.slot.clear();
    }

    /// Invalidates the cache, handing back the value it held.
    #[inline]
    pub fn take(&mut self) -> Option<T> {
        self.slot.take()
    }

    /// Consumes the cache, returning the cached value if present.
    #[inline]
    pub fn into_inner(self) -> Option<T> {
        self.slot.into_option()
    }
}

impl<T, E, F> TryLazyCache<T, F>
where
    F: Fn() -> Result<T, E>,
{
    /// Gets the cached value, running the initializer if nothing is cached.
    ///
    /// # Errors
    ///
    /// Returns the initializer's error unchanged. The cache stays invalid.
    pub fn get(&mut self) -> Result<&T, E> {
        let init = &self.init;
        let value = self.slot.get_or_try_insert_with(|| {
            trace_event!(value = core::any::type_name::<T>(), "fallible lazy cache miss");
            let result = init();
            if result.is_err() {
                trace_event!(value = core::any::type_name::<T>(), "initializer failed");
            }
            result
        })?;
        Ok(&*value)
    }

    /// Gets a clone of the cached value, running the initializer if needed.
    ///
    /// # Errors
    ///
    /// Returns the initializer's error unchanged. The cache stays invalid.
    #[inline]
    pub fn get_cloned(&mut self) -> Result<T, E>
    where
        T: Clone,
    {
        self.get().map(T::clone)
    }
}

impl<T: fmt::Debug, F> fmt::Debug for TryLazyCache<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TryLazyCache")
            .field("slot", &self.slot)
            .finish_non_exhaustive()
    }
}
