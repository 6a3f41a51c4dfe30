use moka::future::Cache;
use moka::Expiry;
use std::future::Future;
use std::hash::Hash;
use std::time::{Duration, Instant};

/// A cached value carrying its own time-to-live.
#[derive(Clone)]
struct Entry<V> {
    value: V,
    ttl: Duration,
}

/// Expiry policy that reads the TTL off each entry at insert time.
struct PerEntryTtl;

impl<K, V> Expiry<K, Entry<V>> for PerEntryTtl {
    fn expire_after_create(&self, _key: &K, entry: &Entry<V>, _created_at: Instant) -> Option<Duration> {
        Some(entry.ttl)
    }
}

/// Read-through cache with per-entry TTL, built on Moka.
///
/// An entry past its TTL is absent: `get` returns `None` and Moka purges it
/// opportunistically. The cache is never authoritative: `get_or_load`
/// degrades to the supplied loader on any miss.
#[derive(Clone)]
pub struct AppCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    cache: Cache<K, Entry<V>>,
}

impl<K, V> AppCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    pub fn new(max_capacity: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(PerEntryTtl)
            .build();

        Self { cache }
    }

    pub async fn get(&self, key: &K) -> Option<V> {
        self.cache.get(key).await.map(|entry| entry.value)
    }

    pub async fn insert(&self, key: K, value: V, ttl: Duration) {
        self.cache.insert(key, Entry { value, ttl }).await;
    }

    /// Read-through: return the cached value, or run `loader`, cache its
    /// success for `ttl`, and return it. Loader errors pass through; a miss
    /// never becomes an error of its own.
    pub async fn get_or_load<E, Fut>(
        &self,
        key: K,
        ttl: Duration,
        loader: impl FnOnce() -> Fut,
    ) -> Result<V, E>
    where
        K: Clone,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(hit) = self.get(&key).await {
            return Ok(hit);
        }
        let value = loader().await?;
        self.insert(key, value.clone(), ttl).await;
        Ok(value)
    }

    pub async fn invalidate(&self, key: &K) {
        self.cache.invalidate(key).await;
    }

    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cache_basic_operations() {
        let cache = AppCache::new(100);

        cache
            .insert("key1".to_string(), "value1".to_string(), Duration::from_secs(60))
            .await;

        let value = cache.get(&"key1".to_string()).await;
        assert_eq!(value, Some("value1".to_string()));

        cache.invalidate(&"key1".to_string()).await;
        let value = cache.get(&"key1".to_string()).await;
        assert_eq!(value, None);
    }

    #[tokio::test]
    async fn test_per_entry_ttl_expiry() {
        let cache = AppCache::new(100);

        cache
            .insert("short".to_string(), 1u32, Duration::from_millis(50))
            .await;
        cache
            .insert("long".to_string(), 2u32, Duration::from_secs(60))
            .await;

        assert!(cache.get(&"short".to_string()).await.is_some());

        tokio::time::sleep(Duration::from_millis(100)).await;

        // The short-lived entry is absent; its neighbor is untouched.
        assert!(cache.get(&"short".to_string()).await.is_none());
        assert_eq!(cache.get(&"long".to_string()).await, Some(2));
    }

    #[tokio::test]
    async fn test_get_or_load_runs_loader_on_miss() {
        let cache: AppCache<String, u32> = AppCache::new(100);

        let loaded: Result<u32, String> = cache
            .get_or_load("k".to_string(), Duration::from_secs(60), || async { Ok(7) })
            .await;
        assert_eq!(loaded.unwrap(), 7);

        // Second read is served from cache; a failing loader is never run.
        let cached: Result<u32, String> = cache
            .get_or_load("k".to_string(), Duration::from_secs(60), || async {
                Err("store down".to_string())
            })
            .await;
        assert_eq!(cached.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_get_or_load_propagates_loader_error() {
        let cache: AppCache<String, u32> = AppCache::new(100);

        let result: Result<u32, String> = cache
            .get_or_load("missing".to_string(), Duration::from_secs(60), || async {
                Err("store down".to_string())
            })
            .await;
        assert!(result.is_err());
        assert_eq!(cache.entry_count(), 0);
    }
}
