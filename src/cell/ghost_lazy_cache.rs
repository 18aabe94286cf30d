//! `GhostLazyCache` — recomputable lazy value (token-gated).
//!
//! Same contract as [`LazyCache`](super::LazyCache), but reads and
//! invalidation go through `&self` plus a ghost token, so a host type can keep
//! several caches as plain fields and refresh them from `&self` methods.

use core::{cell::UnsafeCell, fmt};

use crate::cell::CacheSlot;
use crate::token::{GhostToken, InvariantLifetime};

/// A token-gated, recomputable lazy value.
pub struct GhostLazyCache<'brand, T, F = fn() -> T> {
    slot: UnsafeCell<CacheSlot<T>>,
    init: F,
    _brand: InvariantLifetime<'brand>,
}

impl<'brand, T, F> GhostLazyCache<'brand, T, F> {
    /// Creates an empty cache bound to `init`. `init` is not called.
    #[inline]
    pub const fn new(init: F) -> Self {
        Self {
            slot: UnsafeCell::new(CacheSlot::Invalid),
            init,
            _brand: InvariantLifetime::new(),
        }
    }

    #[inline(always)]
    fn slot<'a>(&'a self, _token: &'a GhostToken<'brand>) -> &'a CacheSlot<T> {
        // SAFETY: the slot is only written through `slot_mut`, which needs
        // `&mut GhostToken<'brand>`; that cannot coexist with `_token`.
        unsafe { &*self.slot.get() }
    }

    #[inline(always)]
    #[allow(clippy::mut_from_ref)]
    fn slot_mut<'a>(&'a self, _token: &'a mut GhostToken<'brand>) -> &'a mut CacheSlot<T> {
        // SAFETY: `_token` proves exclusivity for every cache of this brand.
        unsafe { &mut *self.slot.get() }
    }

    /// Returns `true` if a value is currently cached.
    #[inline]
    pub fn is_valid(&self, token: &GhostToken<'brand>) -> bool {
        self.slot(token).is_holding()
    }

    /// Returns the cached value without computing it.
    #[inline]
    pub fn peek<'a>(&'a self, token: &'a GhostToken<'brand>) -> Option<&'a T> {
        self.slot(token).as_ref()
    }

    /// Drops the cached value, if any.
    pub fn invalidate(&self, token: &mut GhostToken<'brand>) {
        let slot = self.slot_mut(token);
        trace_event!(
            value = core::any::type_name::<T>(),
            was_valid = slot.is_holding(),
            "ghost lazy cache invalidated"
        );
        slot.clear();
    }

    /// Invalidates the cache, handing back the value it held.
    #[inline]
    pub fn take(&self, token: &mut GhostToken<'brand>) -> Option<T> {
        self.slot_mut(token).take()
    }

    /// Consumes the cache, returning the cached value if present.
    #[inline]
    pub fn into_inner(self) -> Option<T> {
        self.slot.into_inner().into_option()
    }
}

impl<'brand, T, F> GhostLazyCache<'brand, T, F>
where
    F: Fn() -> T,
{
    /// Gets the cached value, computing and caching it if needed.
    ///
    /// Requires `&mut GhostToken` because computing mutates the slot.
    pub fn get<'a>(&'a self, token: &'a mut GhostToken<'brand>) -> &'a T {
        let init = &self.init;
        self.slot_mut(token).get_or_insert_with(|| {
            trace_event!(value = core::any::type_name::<T>(), "ghost lazy cache miss");
            init()
        })
    }
}

impl<'brand, T: Default> Default for GhostLazyCache<'brand, T, fn() -> T> {
    fn default() -> Self {
        Self::new(T::default)
    }
}

impl<'brand, T, F> fmt::Debug for GhostLazyCache<'brand, T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The slot cannot be read without a token.
        f.debug_struct("GhostLazyCache").finish_non_exhaustive()
    }
}

// SAFETY: shared access across threads only reaches the slot through
// `&GhostToken<'brand>` (reads) or `&mut GhostToken<'brand>` (writes, which
// may drop or create `T` on the calling thread, hence `T: Send`).
unsafe impl<'brand, T: Send + Sync, F: Sync> Sync for GhostLazyCache<'brand, T, F> {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_counter_epochs() {
        GhostToken::new(|mut token| {
            let calls = Cell::new(0);
            let cache = GhostLazyCache::new(|| {
                calls.set(calls.get() + 1);
                calls.get()
            });

            assert_eq!(*cache.get(&mut token), 1);
            assert_eq!(*cache.get(&mut token), 1);
            cache.invalidate(&mut token);
            assert_eq!(*cache.get(&mut token), 2);
            cache.invalidate(&mut token);
            cache.invalidate(&mut token);
            assert_eq!(*cache.get(&mut token), 3);
            assert_eq!(calls.get(), 3);
        });
    }

    #[test]
    fn test_is_valid_and_peek() {
        GhostToken::new(|mut token| {
            let cache = GhostLazyCache::new(|| 5u8);
            assert!(!cache.is_valid(&token));
            assert_eq!(cache.peek(&token), None);

            cache.get(&mut token);
            assert!(cache.is_valid(&token));
            assert_eq!(cache.peek(&token), Some(&5));
        });
    }

    #[test]
    fn test_fields_refreshed_through_shared_host() {
        struct Host<'brand, 'src> {
            total: GhostLazyCache<'brand, u32, Box<dyn Fn() -> u32 + 'src>>,
            label: GhostLazyCache<'brand, String>,
        }

        impl<'brand, 'src> Host<'brand, 'src> {
            fn refresh(&self, token: &mut GhostToken<'brand>) {
                self.total.invalidate(token);
                self.label.invalidate(token);
            }
        }

        GhostToken::new(|mut token| {
            let source = Cell::new(10);
            let host = Host {
                total: GhostLazyCache::new(Box::new(|| source.get() * 2)),
                label: GhostLazyCache::default(),
            };

            assert_eq!(*host.total.get(&mut token), 20);
            assert_eq!(host.label.get(&mut token), "");

            source.set(21);
            assert_eq!(*host.total.get(&mut token), 20);

            host.refresh(&mut token);
            assert!(!host.label.is_valid(&token));
            assert_eq!(*host.total.get(&mut token), 42);
            assert_eq!(host.label.get(&mut token), "");
        });
    }

    #[test]
    fn test_panicking_initializer_is_retried() {
        use std::panic::{self, AssertUnwindSafe};

        GhostToken::new(|mut token| {
            let calls = Cell::new(0);
            let cache = GhostLazyCache::new(|| {
                calls.set(calls.get() + 1);
                if calls.get() == 1 {
                    panic!("first call fails");
                }
                42
            });

            let result = panic::catch_unwind(AssertUnwindSafe(|| *cache.get(&mut token)));
            assert!(result.is_err());
            assert!(!cache.is_valid(&token));
            assert_eq!(cache.peek(&token), None);

            assert_eq!(*cache.get(&mut token), 42);
            assert_eq!(*cache.get(&mut token), 42);
            assert_eq!(calls.get(), 2);
        });
    }

    #[test]
    fn test_take_and_into_inner() {
        GhostToken::new(|mut token| {
            let cache = GhostLazyCache::new(|| String::from("v"));
            assert_eq!(cache.take(&mut token), None);
            cache.get(&mut token);
            assert_eq!(cache.take(&mut token).as_deref(), Some("v"));
            assert!(!cache.is_valid(&token));
            cache.get(&mut token);
            assert_eq!(cache.into_inner().as_deref(), Some("v"));
        });
    }
}
