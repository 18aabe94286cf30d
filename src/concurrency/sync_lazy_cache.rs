//! `SyncLazyCache` — a resettable lazy value safe to share across threads.
//!
//! The slot sits behind a mutex and the initializer runs while the lock is
//! held. Concurrent readers of an invalid cache block until the first one has
//! filled it, so the initializer runs at most once per epoch even under
//! contention.
//!
//! The initializer must not touch its own cache: the lock is not re-entrant
//! and such a call deadlocks.

use core::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crossbeam_utils::CachePadded;

use crate::cell::CacheSlot;

/// A thread-safe, recomputable lazy value.
///
/// # Example
///
/// ```rust
/// use recache::SyncLazyCache;
/// use std::sync::atomic::{AtomicU32, Ordering};
///
/// static CALLS: AtomicU32 = AtomicU32::new(0);
///
/// let cache = SyncLazyCache::new(|| CALLS.fetch_add(1, Ordering::SeqCst) + 1);
/// std::thread::scope(|s| {
///     for _ in 0..4 {
///         s.spawn(|| assert_eq!(cache.get(), 1));
///     }
/// });
///
/// cache.invalidate();
/// assert_eq!(cache.get(), 2);
/// ```
pub struct SyncLazyCache<T, F = fn() -> T> {
    slot: CachePadded<Mutex<CacheSlot<T>>>,
    init: F,
}

impl<T, F> SyncLazyCache<T, F> {
    /// Creates an empty cache bound to `init`. `init` is not called.
    #[inline]
    pub const fn new(init: F) -> Self {
        Self {
            slot: CachePadded::new(Mutex::new(CacheSlot::Invalid)),
            init,
        }
    }

    // A panicking initializer poisons the lock without writing the slot, so
    // the slot is still consistent and the poison flag carries no information.
    #[inline]
    fn lock(&self) -> MutexGuard<'_, CacheSlot<T>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns `true` if a value is currently cached.
    ///
    /// Another thread may change the answer as soon as this returns.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.lock().is_holding()
    }

    /// Drops the cached value, if any.
    ///
    /// Blocks while another thread is computing or reading the value.
    pub fn invalidate(&self) {
        self.invalidate_held();
    }

    // Check and clear under one lock so the answer counts this call only.
    pub(crate) fn invalidate_held(&self) -> bool {
        let mut slot = self.lock();
        let was_valid = slot.is_holding();
        trace_event!(
            value = core::any::type_name::<T>(),
            was_valid,
            "sync lazy cache invalidated"
        );
        slot.clear();
        was_valid
    }

    /// Invalidates the cache, handing back the value it held.
    #[inline]
    pub fn take(&self) -> Option<T> {
        self.lock().take()
    }

    /// Consumes the cache, returning the cached value if present.
    pub fn into_inner(self) -> Option<T> {
        CachePadded::into_inner(self.slot)
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .into_option()
    }
}

impl<T, F> SyncLazyCache<T, F>
where
    F: Fn() -> T,
{
    /// Runs `f` on the cached value, computing it first if needed.
    ///
    /// The lock is held while `f` runs.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let mut slot = self.lock();
        let value = slot.get_or_insert_with(|| {
            trace_event!(value = core::any::type_name::<T>(), "sync lazy cache miss");
            (self.init)()
        });
        f(value)
    }

    /// Gets a clone of the cached value, computing it if needed.
    #[inline]
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.with(T::clone)
    }
}

impl<T: Default> Default for SyncLazyCache<T, fn() -> T> {
    fn default() -> Self {
        Self::new(T::default)
    }
}

impl<T: fmt::Debug, F> fmt::Debug for SyncLazyCache<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `try_lock` so that formatting from inside `with` cannot deadlock.
        let mut d = f.debug_struct("SyncLazyCache");
        match self.slot.try_lock() {
            Ok(slot) => d.field("slot", &*slot),
            Err(std::sync::TryLockError::Poisoned(err)) => d.field("slot", &*err.into_inner()),
            Err(std::sync::TryLockError::WouldBlock) => d.field("slot", &format_args!("<locked>")),
        };
        d.finish_non_exhaustive()
    }
}
