//! Memoization Cache
//!
//! Size-bounded LRU caches used by every node constructor and by the
//! child-attaching calls. Each memoized function owns one [`SharedCache`].

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Default number of entries per cache
pub const MAX_CACHE_SIZE: usize = 12_800;

/// Cache configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CacheConfig {
    /// Maximum entries per cache (0 disables memoization)
    pub capacity: usize,
}

impl CacheConfig {
    pub fn with_capacity(capacity: usize) -> Self {
        Self { capacity }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { capacity: MAX_CACHE_SIZE }
    }
}

/// Cache statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    pub name: &'static str,
    pub entries: usize,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

impl CacheStats {
    /// Fraction of lookups served from the cache
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

struct Entry<V> {
    value: V,
    /// Access tick, also the key into `order`
    tick: u64,
}

/// Bounded least-recently-used map
///
/// Lookups refresh the entry; inserting into a full cache evicts the entry
/// with the oldest access tick.
pub struct LruCache<K, V> {
    name: &'static str,
    entries: HashMap<K, Entry<V>>,
    /// Access tick -> key, oldest first
    order: BTreeMap<u64, K>,
    capacity: usize,
    counter: u64,
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    pub fn new(name: &'static str, capacity: usize) -> Self {
        Self {
            name,
            entries: HashMap::with_capacity(capacity.min(1024)),
            order: BTreeMap::new(),
            capacity,
            counter: 0,
            hits: 0,
            misses: 0,
            evictions: 0,
        }
    }

    /// Look up a value, marking it most recently used
    pub fn get<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(entry) = self.entries.get_mut(key) else {
            self.misses += 1;
            return None;
        };

        self.counter += 1;
        if let Some(owned) = self.order.remove(&entry.tick) {
            self.order.insert(self.counter, owned);
        }
        entry.tick = self.counter;
        self.hits += 1;
        Some(entry.value.clone())
    }

    /// Insert a value and return the resident one.
    ///
    /// If the key is already present the existing value wins and is
    /// returned, so concurrent builders converge on a single instance.
    pub fn insert(&mut self, key: K, value: V) -> V {
        if self.capacity == 0 {
            return value;
        }

        self.counter += 1;
        let tick = self.counter;

        if let Some(entry) = self.entries.get_mut(&key) {
            let old_tick = std::mem::replace(&mut entry.tick, tick);
            self.order.remove(&old_tick);
            self.order.insert(tick, key);
            return entry.value.clone();
        }

        while self.entries.len() >= self.capacity {
            if !self.evict_lru() {
                break;
            }
        }

        self.order.insert(tick, key.clone());
        self.entries.insert(key, Entry { value: value.clone(), tick });
        value
    }

    /// Evict the least recently used entry
    fn evict_lru(&mut self) -> bool {
        let Some((tick, key)) = self.order.pop_first() else {
            return false;
        };
        self.entries.remove(&key);
        self.evictions += 1;
        tracing::trace!("Evicted entry {} from {} cache", tick, self.name);
        true
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop all entries and reset counters
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
        self.hits = 0;
        self.misses = 0;
        self.evictions = 0;
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            name: self.name,
            entries: self.entries.len(),
            capacity: self.capacity,
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
        }
    }
}

/// Thread-safe memoization cache
pub struct SharedCache<K, V> {
    inner: Mutex<LruCache<K, V>>,
}

impl<K, V> SharedCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    pub fn new(name: &'static str, capacity: usize) -> Self {
        Self {
            inner: Mutex::new(LruCache::new(name, capacity)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<K, V>> {
        // A panic while holding the lock leaves the map consistent
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the cached value for `key`, building it on a miss.
    ///
    /// `build` runs without the lock held so it may use other caches.
    pub fn get_or_insert_with<Q, F>(&self, key: &Q, build: F) -> V
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + ?Sized,
        F: FnOnce() -> V,
    {
        if let Some(hit) = self.lock().get(key) {
            return hit;
        }
        let value = build();
        self.lock().insert(key.to_owned(), value)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn stats(&self) -> CacheStats {
        self.lock().stats()
    }
}
