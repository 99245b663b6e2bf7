//! Expiring key/value cache with caller-supplied TTLs.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

/// Cache contract. Every entry carries its own time-to-live.
pub trait TtlCache<K, V>: Send + Sync {
    /// Live value for `key`; expired entries read as missing.
    fn get(&self, key: &K) -> Option<V>;
    fn set(&self, key: K, value: V, ttl: Duration);
    fn remove(&self, key: &K) -> bool;
    fn clear(&self);
    /// Entries currently stored, expired ones included until evicted.
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool { self.len() == 0 }
}

struct Entry<V> {
    value: V,
    expires_at: Instant,
}

impl<V> Entry<V> {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// In-memory cache.
pub struct MemoryTtlCache<K, V> {
    entries: RwLock<HashMap<K, Entry<V>>>,
}

impl<K, V> MemoryTtlCache<K, V> {
    pub fn new() -> Self {
        Self { entries: RwLock::new(HashMap::new()) }
    }
}

impl<K, V> Default for MemoryTtlCache<K, V> {
    fn default() -> Self { Self::new() }
}

impl<K, V> MemoryTtlCache<K, V>
where
    K: Eq + Hash,
{
    /// Drop every expired entry. Returns how many were removed.
    pub fn evict_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, e| e.is_live(now));
        before - entries.len()
    }
}

impl<K, V> TtlCache<K, V> for MemoryTtlCache<K, V>
where
    K: Eq + Hash + Send + Sync,
    V: Clone + Send + Sync,
{
    fn get(&self, key: &K) -> Option<V> {
        let now = Instant::now();
        {
            let entries = self.entries.read();
            match entries.get(key) {
                Some(e) if e.is_live(now) => return Some(e.value.clone()),
                None => return None,
                Some(_) => {}
            }
        }
        let mut entries = self.entries.write();
        if entries.get(key).is_some_and(|e| !e.is_live(now)) {
            entries.remove(key);
        }
        None
    }

    fn set(&self, key: K, value: V, ttl: Duration) {
        let expires_at = Instant::now()
            .checked_add(ttl)
            .unwrap_or_else(|| Instant::now() + Duration::from_secs(60 * 60 * 24 * 365));
        self.entries.write().insert(key, Entry { value, expires_at });
    }

    fn remove(&self, key: &K) -> bool {
        self.entries.write().remove(key).is_some()
    }

    fn clear(&self) {
        self.entries.write().clear();
    }

    fn len(&self) -> usize {
        self.entries.read().len()
    }
}
