//! # `recache` - Resettable Lazy Values
//!
//! Lazy values that can be invalidated. A cache defers computing its value
//! until the first read, memoizes it, and recomputes it on the first read
//! after an explicit [`invalidate`](LazyCache::invalidate).
//!
//! ## Guarantees
//!
//! ### State
//! - **Two states only**: a cache is either invalid or holding exactly one
//!   value ([`CacheSlot`]). The state is an enum, so a cached `None` is an
//!   ordinary value and never confused with "not computed".
//! - **One initializer call per epoch**: an epoch starts at construction or at
//!   an invalidation. The first read within an epoch calls the initializer;
//!   every later read in that epoch returns the stored value.
//! - **Lazy**: construction and invalidation never call the initializer.
//! - **Idempotent invalidation**: invalidating an invalid cache does nothing.
//!
//! ### Failure
//! - **No poisoned state**: a failing initializer (a panic for [`LazyCache`],
//!   an `Err` for [`TryLazyCache`]) leaves the cache invalid and the failure
//!   reaches the caller unchanged. The next read retries.
//!
//! ### Aliasing
//! - [`LazyCache`] and [`TryLazyCache`] mutate through `&mut self`, so a
//!   borrowed value can never be invalidated from under its reader.
//! - [`GhostLazyCache`] mutates through `&self` plus `&mut` [`GhostToken`],
//!   giving the same guarantee for caches stored as fields of a shared host.
//! - [`SyncLazyCache`] locks its slot and may be shared across threads.
//!
//! ## Example
//!
//! ```rust
//! use recache::LazyCache;
//! use std::cell::RefCell;
//!
//! let text = RefCell::new(String::from("lazy but resettable"));
//! let mut words = LazyCache::new(|| text.borrow().split_whitespace().count());
//! assert_eq!(*words.get(), 3);
//!
//! // The source changed, but the cached value stays until invalidated.
//! text.borrow_mut().push_str(" values");
//! assert_eq!(*words.get(), 3);
//!
//! words.invalidate();
//! assert_eq!(*words.get(), 4);
//! ```
//!
//! ## Features
//!
//! - `tracing`: emit `trace`-level events when a cache computes or drops its value.

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

#[cfg(feature = "tracing")]
macro_rules! trace_event {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_event {
    ($($arg:tt)*) => {};
}

pub mod cell;
pub mod concurrency;
pub mod invalidate;
pub mod token;

pub use cell::{CacheSlot, GhostLazyCache, LazyCache, TryLazyCache};
pub use concurrency::SyncLazyCache;
pub use invalidate::{invalidate_all, Invalidate, InvalidateAll};
pub use token::GhostToken;

// Compile-time assertions for memory layout
const _: () = {
    use core::mem;

    // Tokens are ZSTs.
    assert!(mem::size_of::<GhostToken<'static>>() == 0);

    // The brand costs nothing: the token-gated cache is as large as the owned one.
    assert!(
        mem::size_of::<GhostLazyCache<'static, u64>>() == mem::size_of::<LazyCache<u64>>()
    );

    // A cache is its slot plus its initializer, with no hidden bookkeeping.
    assert!(
        mem::size_of::<LazyCache<u64>>()
            <= mem::size_of::<CacheSlot<u64>>() + mem::size_of::<fn() -> u64>()
    );
};
