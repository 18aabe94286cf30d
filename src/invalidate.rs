//! Invalidation as a capability, plus batch helpers.
//!
//! A host that owns several caches can hand them to [`invalidate_all`] (or
//! call [`InvalidateAll::invalidate_all`] on an iterator) instead of resetting
//! each one by name.

use crate::cell::{CacheSlot, LazyCache, TryLazyCache};
use crate::concurrency::SyncLazyCache;

/// Something that holds a derived value and can be told to drop it.
pub trait Invalidate {
    /// Drops the held value so the next read recomputes it.
    fn invalidate(&mut self);

    /// Returns `true` if a value is currently held.
    fn is_valid(&self) -> bool;

    /// Invalidates, returning whether a value was held just before.
    ///
    /// Shared implementors override this to check and clear atomically.
    #[inline]
    fn invalidate_held(&mut self) -> bool {
        let was_valid = self.is_valid();
        self.invalidate();
        was_valid
    }
}

impl<T: Invalidate + ?Sized> Invalidate for &mut T {
    #[inline]
    fn invalidate(&mut self) {
        (**self).invalidate();
    }

    #[inline]
    fn is_valid(&self) -> bool {
        (**self).is_valid()
    }

    #[inline]
    fn invalidate_held(&mut self) -> bool {
        (**self).invalidate_held()
    }
}

impl<T: Invalidate + ?Sized> Invalidate for Box<T> {
    #[inline]
    fn invalidate(&mut self) {
        (**self).invalidate();
    }

    #[inline]
    fn is_valid(&self) -> bool {
        (**self).is_valid()
    }

    #[inline]
    fn invalidate_held(&mut self) -> bool {
        (**self).invalidate_held()
    }
}

impl<T> Invalidate for CacheSlot<T> {
    #[inline]
    fn invalidate(&mut self) {
        self.clear();
    }

    #[inline]
    fn is_valid(&self) -> bool {
        self.is_holding()
    }
}

impl<T, F> Invalidate for LazyCache<T, F> {
    #[inline]
    fn invalidate(&mut self) {
        LazyCache::invalidate(self);
    }

    #[inline]
    fn is_valid(&self) -> bool {
        LazyCache::is_valid(self)
    }
}

impl<T, F> Invalidate for TryLazyCache<T, F> {
    #[inline]
    fn invalidate(&mut self) {
        TryLazyCache::invalidate(self);
    }

    #[inline]
    fn is_valid(&self) -> bool {
        TryLazyCache::is_valid(self)
    }
}

impl<T, F> Invalidate for SyncLazyCache<T, F> {
    #[inline]
    fn invalidate(&mut self) {
        SyncLazyCache::invalidate(self);
    }

    #[inline]
    fn is_valid(&self) -> bool {
        SyncLazyCache::is_valid(self)
    }

    #[inline]
    fn invalidate_held(&mut self) -> bool {
        SyncLazyCache::invalidate_held(self)
    }
}

// Shared references are enough for the locked variant.
impl<T, F> Invalidate for &SyncLazyCache<T, F> {
    #[inline]
    fn invalidate(&mut self) {
        SyncLazyCache::invalidate(*self);
    }

    #[inline]
    fn is_valid(&self) -> bool {
        SyncLazyCache::is_valid(*self)
    }

    #[inline]
    fn invalidate_held(&mut self) -> bool {
        SyncLazyCache::invalidate_held(*self)
    }
}

/// Invalidates every item, returning how many held a value beforehand.
///
/// Each item is checked and cleared through [`Invalidate::invalidate_held`],
/// so a shared [`SyncLazyCache`] emptied by another thread at the same time
/// is counted by only one of the callers.
///
/// # Example
///
/// ```rust
/// use recache::{invalidate_all, LazyCache};
///
/// let mut width: LazyCache<u32> = LazyCache::new(|| 640);
/// let mut height: LazyCache<u32> = LazyCache::new(|| 480);
/// width.get();
///
/// let dropped = invalidate_all([&mut width, &mut height]);
/// assert_eq!(dropped, 1);
/// assert!(!width.is_valid());
/// ```
pub fn invalidate_all<I>(items: I) -> usize
where
    I: IntoIterator,
    I::Item: Invalidate,
{
    let dropped = items
        .into_iter()
        .fold(0, |held, mut item| held + usize::from(item.invalidate_held()));
    trace_event!(dropped, "batch invalidation finished");
    dropped
}

/// Iterator extension for batch invalidation.
pub trait InvalidateAll: Iterator + Sized {
    /// Invalidates every item, returning how many held a value beforehand.
    fn invalidate_all(self) -> usize;
}

impl<I> InvalidateAll for I
where
    I: Iterator,
    I::Item: Invalidate,
{
    #[inline]
    fn invalidate_all(self) -> usize {
        invalidate_all(self)
    }
}
