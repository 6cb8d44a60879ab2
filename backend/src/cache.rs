//! A small query cache with stale-marking invalidation.
//!
//! Each key holds the last successful result of a fetch. Readers get that
//! result while it is fresh; `invalidate` marks it stale so the next reader
//! runs the fetch again and replaces the entry wholesale. Failed fetches
//! leave the cache as it was.
//!
//! Invalidation bumps a generation counter. A fetch that was already running
//! when an invalidation happened still returns its result to its caller, but
//! stores it as stale, so whichever invalidation lands last is always
//! followed by a refetch.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::RwLock;

struct CacheEntry<T> {
    value: Arc<T>,
    stale: bool,
}

struct Inner<T> {
    generation: u64,
    entries: HashMap<String, CacheEntry<T>>,
}

pub struct QueryCache<T> {
    inner: RwLock<Inner<T>>,
}

impl<T> Default for QueryCache<T> {
    fn default() -> Self {
        QueryCache {
            inner: RwLock::new(Inner {
                generation: 0,
                entries: HashMap::new(),
            }),
        }
    }
}

impl<T> QueryCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached value for `key` if it is present and not stale.
    pub async fn peek(&self, key: &str) -> Option<Arc<T>> {
        let inner = self.inner.read().await;
        inner
            .entries
            .get(key)
            .filter(|e| !e.stale)
            .map(|e| Arc::clone(&e.value))
    }

    pub async fn get_or_fetch<F, Fut, E>(&self, key: &str, fetch: F) -> Result<Arc<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let started_at = {
            let inner = self.inner.read().await;
            if let Some(entry) = inner.entries.get(key).filter(|e| !e.stale) {
                return Ok(Arc::clone(&entry.value));
            }
            inner.generation
        };

        let value = Arc::new(fetch().await?);

        let mut inner = self.inner.write().await;
        let stale = inner.generation != started_at;
        inner.entries.insert(
            key.to_string(),
            CacheEntry {
                value: Arc::clone(&value),
                stale,
            },
        );
        Ok(value)
    }

    /// Marks `key` stale. Returns whether an entry existed.
    pub async fn invalidate(&self, key: &str) -> bool {
        let mut inner = self.inner.write().await;
        inner.generation += 1;
        match inner.entries.get_mut(key) {
            Some(entry) => {
                entry.stale = true;
                true
            }
            None => false,
        }
    }
}
