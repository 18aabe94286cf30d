//! Tests for `LazyCache`.

use super::*;
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};

fn counting(calls: &Cell<u32>) -> impl Fn() -> u32 + '_ {
    move || {
        calls.set(calls.get() + 1);
        calls.get()
    }
}

#[test]
fn test_counter_epochs() {
    let calls = Cell::new(0);
    let mut cache = LazyCache::new(counting(&calls));

    assert_eq!(*cache.get(), 1);
    assert_eq!(*cache.get(), 1);

    cache.invalidate();
    assert_eq!(*cache.get(), 2);
    assert_eq!(*cache.get(), 2);

    cache.invalidate();
    cache.invalidate();
    assert_eq!(*cache.get(), 3);
    assert_eq!(calls.get(), 3);
}

#[test]
fn test_initializer_not_called_eagerly() {
    let calls = Cell::new(0);
    let mut cache = LazyCache::new(counting(&calls));
    assert_eq!(calls.get(), 0);
    assert!(!cache.is_valid());

    cache.invalidate();
    assert_eq!(calls.get(), 0);

    assert_eq!(*cache.get(), 1);
    cache.invalidate();
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_invalidate_fresh_cache_is_noop() {
    let calls = Cell::new(0);
    let mut cache = LazyCache::new(counting(&calls));
    cache.invalidate();
    assert!(!cache.is_valid());
    assert_eq!(*cache.get(), 1);
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_is_valid_tracks_slot() {
    let mut cache = LazyCache::new(|| "value");
    assert!(!cache.is_valid());
    cache.get();
    assert!(cache.is_valid());
    cache.invalidate();
    assert!(!cache.is_valid());
}

#[test]
fn test_peek_does_not_compute() {
    let calls = Cell::new(0);
    let mut cache = LazyCache::new(counting(&calls));
    assert_eq!(cache.peek(), None);
    assert_eq!(calls.get(), 0);

    cache.get();
    assert_eq!(cache.peek(), Some(&1));
}

#[test]
fn test_panicking_initializer_is_retried() {
    let calls = Cell::new(0);
    let mut cache = LazyCache::new(|| {
        calls.set(calls.get() + 1);
        if calls.get() == 1 {
            panic!("first call fails");
        }
        42
    });

    let result = panic::catch_unwind(AssertUnwindSafe(|| *cache.get()));
    assert!(result.is_err());
    assert!(!cache.is_valid());

    assert_eq!(*cache.get(), 42);
    assert_eq!(*cache.get(), 42);
    assert_eq!(calls.get(), 2);
}

#[test]
fn test_held_value_is_always_initializer_output() {
    let calls = Cell::new(0);
    let mut cache = LazyCache::new(|| {
        calls.set(calls.get() + 1);
        vec![1]
    });
    assert_eq!(cache.get(), &[1]);

    // Changing the value means taking it out; the cache recomputes.
    let mut taken = cache.take().unwrap_or_default();
    taken.push(99);
    assert_eq!(taken, [1, 99]);

    assert_eq!(cache.get(), &[1]);
    assert_eq!(calls.get(), 2);
}

#[test]
fn test_get_cloned() {
    let mut cache = LazyCache::new(|| String::from("cached"));
    let owned = cache.get_cloned();
    assert_eq!(owned, "cached");
    assert!(cache.is_valid());
}

#[test]
fn test_take_and_into_inner() {
    let calls = Cell::new(0);
    let mut cache = LazyCache::new(counting(&calls));
    assert_eq!(cache.take(), None);

    cache.get();
    assert_eq!(cache.take(), Some(1));
    assert!(!cache.is_valid());

    assert_eq!(*cache.get(), 2);
    assert_eq!(cache.into_inner(), Some(2));
}

#[test]
fn test_cached_none_is_a_value() {
    let calls = Cell::new(0);
    let mut cache = LazyCache::new(|| {
        calls.set(calls.get() + 1);
        None::<u32>
    });
    assert_eq!(*cache.get(), None);
    assert_eq!(*cache.get(), None);
    assert!(cache.is_valid());
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_default_uses_type_default() {
    let mut cache: LazyCache<Vec<u8>> = LazyCache::default();
    assert!(cache.get().is_empty());
}

#[test]
fn test_fn_pointer_initializer() {
    fn answer() -> u64 {
        42
    }
    let mut cache: LazyCache<u64> = LazyCache::new(answer);
    assert_eq!(*cache.get(), 42);
}

#[test]
fn test_debug_does_not_force() {
    let cache: LazyCache<i32, _> = LazyCache::new(|| 5);
    assert_eq!(format!("{cache:?}"), "LazyCache { slot: Invalid, .. }");
    assert!(!cache.is_valid());
}

#[test]
fn test_drops_value_on_invalidate() {
    use std::rc::Rc;

    let witness = Rc::new(());
    let mut cache = LazyCache::new(|| Rc::clone(&witness));
    cache.get();
    assert_eq!(Rc::strong_count(&witness), 2);

    cache.invalidate();
    assert_eq!(Rc::strong_count(&witness), 1);
}
