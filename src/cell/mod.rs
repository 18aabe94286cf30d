//! Resettable lazy cells.
//!
//! The module tree is stratified:
//! - `slot` is the two-state storage every cache is built on.
//! - `lazy_cache` and `try_lazy_cache` own their slot and mutate through `&mut self`.
//! - `ghost_lazy_cache` mutates through `&self` gated by a [`GhostToken`](crate::GhostToken).

pub mod ghost_lazy_cache;
pub mod lazy_cache;
pub mod slot;
pub mod try_lazy_cache;

pub use ghost_lazy_cache::GhostLazyCache;
pub use lazy_cache::LazyCache;
pub use slot::CacheSlot;
pub use try_lazy_cache::TryLazyCache;
