//! Thread-safe cache variants.
//!
//! The caches in [`crate::cell`] enforce aliasing discipline, not
//! synchronization. This module holds the variant that locks its slot.

pub mod sync_lazy_cache;

pub use sync_lazy_cache::SyncLazyCache;
