//! `GhostToken` — the capability that gates access to branded caches.
//!
//! A token is a zero-sized value branded with an invariant lifetime `'brand`.
//! Caches created inside [`GhostToken::new`] carry the same brand, and every
//! operation that mutates them takes `&mut GhostToken<'brand>`.
//!
//! ## Core invariant (linearity)
//!
//! `GhostToken<'brand>` is not `Copy`/`Clone`. Rust cannot hold two live
//! `&mut GhostToken<'brand>` at once, so at most one branded cache can be
//! filled or invalidated at a time, and no shared reference into a branded
//! cache survives such a call.

use core::marker::PhantomData;

/// Marker that is invariant in `'id`, so brands never unify by subtyping.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct InvariantLifetime<'id>(PhantomData<fn(&'id ()) -> &'id ()>);

impl<'id> InvariantLifetime<'id> {
    /// Creates a new invariant lifetime marker.
    #[inline]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

/// A zero-sized, lifetime-branded access token.
#[derive(Debug)]
pub struct GhostToken<'brand>(InvariantLifetime<'brand>);

impl<'brand> GhostToken<'brand> {
    /// Creates a fresh brand and runs `f` with its token.
    ///
    /// # Example
    ///
    /// ```rust
    /// use recache::{GhostLazyCache, GhostToken};
    ///
    /// let len = GhostToken::new(|mut token| {
    ///     let cache = GhostLazyCache::new(|| vec![1, 2, 3]);
    ///     cache.get(&mut token).len()
    /// });
    /// assert_eq!(len, 3);
    /// ```
    pub fn new<F, R>(f: F) -> R
    where
        F: for<'new_brand> FnOnce(GhostToken<'new_brand>) -> R,
    {
        f(GhostToken(InvariantLifetime::new()))
    }
}
