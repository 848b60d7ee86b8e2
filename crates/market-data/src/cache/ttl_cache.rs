//! Bounded in-memory cache with logical TTL expiry and batch eviction.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use log::warn;

/// A cached value plus the moment it was stored.
#[derive(Clone, Debug)]
struct CacheEntry<V> {
    stored_at: Instant,
    value: V,
}

/// Mutex-guarded key/value store with TTL expiry and size-bounded eviction.
///
/// Expiry is logical: a stale entry is treated as absent on lookup but stays
/// in the map until it is overwritten or swept out by eviction. Eviction is
/// a batch operation that drops the oldest half once the size bound is
/// exceeded, trading a small burst of removals for fewer housekeeping passes.
pub struct TtlCache<V> {
    entries: Mutex<HashMap<String, CacheEntry<V>>>,
    ttl: Duration,
    max_size: usize,
}

impl<V: Clone> TtlCache<V> {
    /// Create a cache holding values for `ttl`, evicting past `max_size` entries.
    pub fn new(ttl: Duration, max_size: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            max_size,
        }
    }

    /// Lock the entry map, recovering from poison if necessary.
    ///
    /// The cache only ever holds normalized results, so the worst case after
    /// a panic in another thread is serving a value that was mid-overwrite.
    fn lock_entries(&self) -> MutexGuard<'_, HashMap<String, CacheEntry<V>>> {
        self.entries.lock().unwrap_or_else(|poisoned| {
            warn!("cache mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Fresh value for `key`, if any. Stale entries are left in place.
    pub fn get(&self, key: &str) -> Option<V> {
        let entries = self.lock_entries();
        entries.get(key).and_then(|entry| {
            if entry.stored_at.elapsed() < self.ttl {
                Some(entry.value.clone())
            } else {
                None
            }
        })
    }

    /// Store `value` under `key`, overwriting any prior entry, then bring
    /// the map back under the size bound.
    pub fn put(&self, key: impl Into<String>, value: V) {
        let mut entries = self.lock_entries();
        entries.insert(
            key.into(),
            CacheEntry {
                stored_at: Instant::now(),
                value,
            },
        );
        Self::evict(&mut entries, self.max_size);
    }

    /// Number of stored entries, stale ones included.
    pub fn len(&self) -> usize {
        self.lock_entries().len()
    }

    /// Whether the cache holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop the oldest `len - max/2` entries once `len > max`, leaving the
    /// map at roughly half capacity.
    fn evict(entries: &mut HashMap<String, CacheEntry<V>>, max_size: usize) {
        if entries.len() <= max_size {
            return;
        }
        let mut by_age: Vec<(String, Instant)> = entries
            .iter()
            .map(|(key, entry)| (key.clone(), entry.stored_at))
            .collect();
        by_age.sort_by_key(|&(_, stored_at)| stored_at);

        let excess = entries.len() - max_size / 2;
        for (key, _) in by_age.into_iter().take(excess) {
            entries.remove(&key);
        }
    }

    /// Rewind an entry's stored-at time. Test hook for expiry and eviction
    /// ordering without sleeping.
    #[cfg(test)]
    pub(crate) fn backdate(&self, key: &str, age: Duration) {
        let mut entries = self.lock_entries();
        if let Some(entry) = entries.get_mut(key) {
            entry.stored_at = Instant::now() - age;
        }
    }
}
