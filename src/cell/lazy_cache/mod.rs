//! `LazyCache` — recomputable lazy value (owned, no token).
//!
//! The cache keeps its initializer `F: Fn() -> T` for its entire life, so the
//! memoized value can be invalidated and recomputed on the next read.
//!
//! All state changes go through `&mut self`. An initializer therefore cannot
//! reach back into the cache it is filling, and a reference returned by
//! [`LazyCache::get`] cannot outlive the next invalidation.

use core::fmt;

use crate::cell::CacheSlot;

/// A lazily computed value that can be reset.
///
/// # Example
///
/// ```rust
/// use recache::LazyCache;
///
/// let calls = std::cell::Cell::new(0);
/// let mut cache = LazyCache::new(|| {
///     calls.set(calls.get() + 1);
///     calls.get()
/// });
///
/// assert_eq!(*cache.get(), 1);
/// assert_eq!(*cache.get(), 1);
///
/// cache.invalidate();
/// assert_eq!(*cache.get(), 2);
/// ```
#[derive(Clone)]
pub struct LazyCache<T, F = fn() -> T> {
    slot: CacheSlot<T>,
    init: F,
}

impl<T, F> LazyCache<T, F> {
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
    ///
    /// The next [`get`](Self::get) calls the initializer again.
    pub fn invalidate(&mut self) {
        trace_event!(
            value = core::any::type_name::<T>(),
            was_valid = self.slot.is_holding(),
            "lazy cache invalidated"
        );
        self.slot.clear();
    }

    /// Invalidates the cache, handing back the value it held.
    pub fn take(&mut self) -> Option<T> {
        trace_event!(
            value = core::any::type_name::<T>(),
            was_valid = self.slot.is_holding(),
            "lazy cache value taken"
        );
        self.slot.take()
    }

    /// Consumes the cache, returning the cached value if present.
    #[inline]
    pub fn into_inner(self) -> Option<T> {
        self.slot.into_option()
    }
}

impl<T, F> LazyCache<T, F>
where
    F: Fn() -> T,
{
    /// Gets the cached value, computing and caching it if needed.
    ///
    /// If the initializer panics, the panic propagates and the cache stays
    /// invalid; the next call runs the initializer again.
    ///
    /// The value is handed out as `&T` only. To change it, [`take`](Self::take)
    /// it out; the next read recomputes.
    pub fn get(&mut self) -> &T {
        let init = &self.init;
        self.slot.get_or_insert_with(|| {
            trace_event!(value = core::any::type_name::<T>(), "lazy cache miss");
            init()
        })
    }

    /// Gets a clone of the cached value, computing it if needed.
    #[inline]
    pub fn get_cloned(&mut self) -> T
    where
        T: Clone,
    {
        self.get().clone()
    }
}

impl<T: Default> Default for LazyCache<T, fn() -> T> {
    fn default() -> Self {
        Self::new(T::default)
    }
}

impl<T: fmt::Debug, F> fmt::Debug for LazyCache<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyCache")
            .field("slot", &self.slot)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
