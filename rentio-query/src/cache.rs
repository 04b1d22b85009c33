//! Time-invalidated query cache.
//!
//! Maps a normalized filter signature to the last result set fetched for
//! it. Entries go stale after the resource's TTL and are then treated
//! exactly like a miss; the whole cache is cleared after any successful
//! mutation. There is no size-based eviction.

use rentio_types::PageInfo;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// One cached result set.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// Items in backend order.
    pub items: Vec<T>,
    /// Pagination descriptor the result arrived with.
    pub page: PageInfo,
    /// When the entry was stored.
    pub stored_at: Instant,
}

impl<T> CacheEntry<T> {
    /// Whether the entry is still valid at `now` for the given TTL.
    #[must_use]
    pub fn is_valid_at(&self, now: Instant, ttl: Duration) -> bool {
        now.duration_since(self.stored_at) < ttl
    }
}

/// Keyed store of cached result sets for a single resource type.
#[derive(Debug)]
pub struct QueryCache<T> {
    ttl: Duration,
    entries: HashMap<String, CacheEntry<T>>,
}

impl<T> QueryCache<T> {
    /// Creates an empty cache with the given TTL.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// The cache's TTL.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Looks up an entry regardless of validity.
    #[must_use]
    pub fn get(&self, signature: &str) -> Option<&CacheEntry<T>> {
        self.entries.get(signature)
    }

    /// Looks up an entry, returning it only while it is still valid.
    /// A stale entry behaves exactly like a miss.
    #[must_use]
    pub fn get_fresh(&self, signature: &str) -> Option<&CacheEntry<T>> {
        self.get_fresh_at(signature, Instant::now())
    }

    /// Validity-checked lookup against an explicit clock, for tests.
    #[must_use]
    pub fn get_fresh_at(&self, signature: &str, now: Instant) -> Option<&CacheEntry<T>> {
        self.entries
            .get(signature)
            .filter(|entry| entry.is_valid_at(now, self.ttl))
    }

    /// Whether an entry is valid right now.
    #[must_use]
    pub fn is_valid(&self, entry: &CacheEntry<T>) -> bool {
        entry.is_valid_at(Instant::now(), self.ttl)
    }

    /// Stores a result set under a signature, overwriting any prior entry.
    pub fn put(&mut self, signature: impl Into<String>, items: Vec<T>, page: PageInfo) {
        self.entries.insert(
            signature.into(),
            CacheEntry {
                items,
                page,
                stored_at: Instant::now(),
            },
        );
    }

    /// Stores an entry with an explicit timestamp, for tests.
    pub fn put_at(&mut self, signature: impl Into<String>, items: Vec<T>, page: PageInfo, stored_at: Instant) {
        self.entries.insert(
            signature.into(),
            CacheEntry {
                items,
                page,
                stored_at,
            },
        );
    }

    /// Wholesale invalidation, used after any successful mutation.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of stored entries, valid or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
