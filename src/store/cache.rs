use chrono::{DateTime, Utc};
use log::debug;
use lru::LruCache;
use std::collections::HashMap;
use std::future::Future;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub const DEFAULT_CAPACITY: usize = 256;

#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub value: V,
    pub created_at: DateTime<Utc>,
}

/// Bounded memo of computed responses, least-recently-used eviction.
///
/// Keys are built by the caller and must include every input that affects
/// the value; daily keys carry the date, so yesterday's entries simply stop
/// being asked for and age out.
#[derive(Debug)]
pub struct ResponseCache<V> {
    entries: Mutex<LruCache<String, CacheEntry<V>>>,
    inflight: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl<V: Clone> ResponseCache<V> {
    /// A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            inflight: Mutex::new(HashMap::new()),
        }
    }

    fn entries(&self) -> MutexGuard<'_, LruCache<String, CacheEntry<V>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn capacity(&self) -> usize {
        self.entries().cap().get()
    }

    pub fn get(&self, key: &str) -> Option<V> {
        let mut entries = self.entries();
        let entry = entries.get(key)?;
        debug!("Cache hit for {} (created {})", key, entry.created_at);
        Some(entry.value.clone())
    }

    /// Insert or overwrite `key`, evicting the least recently used entry when full.
    pub fn put(&self, key: impl Into<String>, value: V) {
        let key = key.into();
        let entry = CacheEntry {
            value,
            created_at: Utc::now(),
        };
        let mut entries = self.entries();
        if let Some((evicted, _)) = entries.push(key.clone(), entry) {
            if evicted != key {
                debug!("Cache full, evicting {}", evicted);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    pub fn clear(&self) {
        self.entries().clear();
    }

    /// Return the cached value for `key`, or run `fetch` to produce it.
    ///
    /// At most one `fetch` runs per key at a time. Callers that arrive while
    /// one is in flight wait for it and then read its cached result. Errors
    /// are returned to the caller that ran the fetch and are not cached.
    pub async fn get_or_try_insert_with<F, Fut, E>(&self, key: &str, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(key) {
            return Ok(value);
        }

        let gate = {
            let mut inflight = self.inflight.lock().unwrap_or_else(PoisonError::into_inner);
            inflight.entry(key.to_string()).or_default().clone()
        };

        let result = {
            let _turn = gate.lock().await;
            match self.get(key) {
                Some(value) => Ok(value),
                None => {
                    debug!("Cache miss for {}", key);
                    let fetched = fetch().await;
                    if let Ok(value) = &fetched {
                        self.put(key, value.clone());
                    }
                    fetched
                }
            }
        };

        let mut inflight = self.inflight.lock().unwrap_or_else(PoisonError::into_inner);
        // Only the map and this task still hold the gate: nobody else is waiting.
        if inflight.get(key).is_some_and(|g| Arc::ptr_eq(g, &gate)) && Arc::strong_count(&gate) == 2 {
            inflight.remove(key);
        }
        result
    }

    #[cfg(test)]
    fn inflight_len(&self) -> usize {
        self.inflight.lock().unwrap().len()
    }
}

impl<V: Clone> Default for ResponseCache<V> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
