//! LazyCache Usage Examples
//!
//! Demonstrates lazy, resettable values derived from external state.

use recache::{invalidate_all, GhostLazyCache, GhostToken, LazyCache, SyncLazyCache, TryLazyCache};
use std::cell::{Cell, RefCell};

fn main() {
    println!("LazyCache Usage Examples");
    println!("========================");

    // Example 1: Lazy, then cached, then recomputed
    println!("\n1. Epochs:");
    let compute_count = Cell::new(0);
    let mut cache = LazyCache::new(|| {
        compute_count.set(compute_count.get() + 1);
        println!("  Computing value #{}...", compute_count.get());
        compute_count.get() * 10
    });

    println!("  Created, compute count: {}", compute_count.get());
    println!("  First read: {}", cache.get());
    println!("  Second read (cached): {}", cache.get());
    cache.invalidate();
    cache.invalidate();
    println!("  After invalidate: {}", cache.get());

    // Example 2: Values derived from external state
    println!("\n2. Derived Values:");
    let items = RefCell::new(vec![3, 1, 2]);
    let mut total = LazyCache::new(|| items.borrow().iter().sum::<i32>());
    let mut largest = LazyCache::new(|| items.borrow().iter().copied().max());

    println!("  total = {}, largest = {:?}", total.get(), largest.get());
    items.borrow_mut().push(10);
    println!("  after push, still cached: total = {}", total.get());
    let dropped = invalidate_all([
        &mut total as &mut dyn recache::Invalidate,
        &mut largest,
    ]);
    println!("  invalidated {dropped} caches");
    println!("  total = {}, largest = {:?}", total.get(), largest.get());

    // Example 3: Fallible initializer
    println!("\n3. Fallible Initializer:");
    let attempts = Cell::new(0);
    let mut config = TryLazyCache::new(|| {
        attempts.set(attempts.get() + 1);
        if attempts.get() < 2 {
            Err(format!("attempt {} failed", attempts.get()))
        } else {
            Ok("loaded")
        }
    });
    println!("  First read: {:?}", config.get());
    println!("  Second read: {:?}", config.get());
    println!("  Is valid: {}", config.is_valid());

    // Example 4: Token-gated cache
    println!("\n4. Token-Gated Cache:");
    GhostToken::new(|mut token| {
        let lazy = GhostLazyCache::new(|| vec![1, 2, 3, 4, 5]);
        println!("  Valid before read: {}", lazy.is_valid(&token));
        println!("  Length: {}", lazy.get(&mut token).len());
        lazy.invalidate(&mut token);
        println!("  Valid after invalidate: {}", lazy.is_valid(&token));
    });

    // Example 5: Shared across threads
    println!("\n5. Synchronized Cache:");
    let shared = SyncLazyCache::new(|| {
        println!("  Computing once for all threads...");
        std::thread::current().id()
    });
    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| shared.get());
        }
    });
    println!("  Computed on: {:?}", shared.get());

    println!("\nKey Benefits:");
    println!("• Initializer runs at most once per epoch");
    println!("• Invalidation is idempotent and never computes");
    println!("• Failures are never cached");
}
