// In-memory cache implementation using DashMap
use crate::domain::model::CacheEntry;
use chrono::Utc;
use dashmap::DashMap;
use std::time::Duration;

/// Thread-safe in-memory cache of extracted counts.
///
/// Entries are never expired eagerly; `get_fresh` treats anything older than
/// the ttl as a miss and the next successful fetch overwrites it. With a
/// non-zero capacity, inserts past the limit first drop stale entries and
/// then the oldest-written ones.
pub struct MemoryCache {
    map: DashMap<String, CacheEntry>,
    ttl: Duration,
    capacity: usize,
}

impl MemoryCache {
    /// `capacity == 0` leaves the cache unbounded.
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            map: DashMap::new(),
            ttl,
            capacity,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn ttl_ms(&self) -> i64 {
        i64::try_from(self.ttl.as_millis()).unwrap_or(i64::MAX)
    }

    /// Physical lookup, regardless of age.
    pub fn get(&self, key: &str) -> Option<CacheEntry> {
        self.map.get(key).map(|entry| entry.value().clone())
    }

    pub fn get_fresh(&self, key: &str) -> Option<CacheEntry> {
        let now = Utc::now().timestamp_millis();
        self.get(key)
            .filter(|entry| entry.is_fresh(self.ttl_ms(), now))
    }

    /// Overwrite `key` with `count` stamped now.
    pub fn put(&self, key: &str, count: u64) -> CacheEntry {
        let entry = CacheEntry::new(key.to_string(), count);
        self.insert(entry.clone());
        entry
    }

    /// Store an entry keeping its own timestamp.
    pub fn insert(&self, entry: CacheEntry) {
        self.map.insert(entry.key.clone(), entry);
        if self.capacity > 0 && self.map.len() > self.capacity {
            self.evict();
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    fn evict(&self) {
        let now = Utc::now().timestamp_millis();
        let ttl_ms = self.ttl_ms();
        self.map.retain(|_, entry| entry.is_fresh(ttl_ms, now));

        let overflow = self.map.len().saturating_sub(self.capacity);
        if overflow == 0 {
            return;
        }

        let mut by_age: Vec<(i64, String)> = self
            .map
            .iter()
            .map(|entry| (entry.timestamp, entry.key().clone()))
            .collect();
        by_age.sort_unstable();
        for (_, key) in by_age.into_iter().take(overflow) {
            self.map.remove(&key);
        }
        tracing::debug!(evicted = overflow, "memory cache over capacity");
    }
}
