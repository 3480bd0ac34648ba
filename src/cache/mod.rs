//! TTL cache for version and model-metadata lookups.
//!
//! Off by default; enabled through [`crate::ClientConfig::with_cache`]. Only
//! idempotent metadata reads (version, tags, show, ps) go through it — chat,
//! generate and embeddings never do.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use crate::config::ClientConfig;

struct CacheEntry {
    value: Value,
    created_at: Instant,
}

#[async_trait]
pub(crate) trait CacheBackend: Send + Sync {
    async fn get(&self, key: &str, ttl: Duration) -> Option<Value>;
    async fn set(&self, key: &str, value: Value);
    async fn delete(&self, key: &str);
}

struct MemoryCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl CacheBackend for MemoryCache {
    async fn get(&self, key: &str, ttl: Duration) -> Option<Value> {
        let entries = self.entries.read().unwrap();
        entries.get(key).and_then(|entry| {
            if entry.created_at.elapsed() > ttl {
                None
            } else {
                Some(entry.value.clone())
            }
        })
    }

    async fn set(&self, key: &str, value: Value) {
        let mut entries = self.entries.write().unwrap();
        entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                created_at: Instant::now(),
            },
        );
    }

    async fn delete(&self, key: &str) {
        self.entries.write().unwrap().remove(key);
    }
}

struct NullCache;

#[async_trait]
impl CacheBackend for NullCache {
    async fn get(&self, _: &str, _: Duration) -> Option<Value> {
        None
    }
    async fn set(&self, _: &str, _: Value) {}
    async fn delete(&self, _: &str) {}
}

/// Facade over the configured backend; a disabled cache is a no-op.
pub(crate) struct MetadataCache {
    ttl: Duration,
    backend: Box<dyn CacheBackend>,
}

impl MetadataCache {
    pub fn new(config: &ClientConfig) -> Self {
        let backend: Box<dyn CacheBackend> = if config.cache_enabled {
            Box::new(MemoryCache::new())
        } else {
            Box::new(NullCache)
        };
        Self {
            ttl: config.cache_ttl,
            backend,
        }
    }

    pub async fn get(&self, key: &str) -> Option<Value> {
        self.backend.get(key, self.ttl).await
    }

    pub async fn put(&self, key: &str, value: &Value) {
        self.backend.set(key, value.clone()).await;
    }

    pub async fn invalidate(&self, key: &str) {
        self.backend.delete(key).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn enabled(ttl: Duration) -> MetadataCache {
        MetadataCache::new(&ClientConfig::new().with_cache(true, ttl))
    }

    #[tokio::test]
    async fn fresh_entries_hit() {
        let cache = enabled(Duration::from_secs(60));
        cache.put("version", &json!({"version": "0.5.0"})).await;
        assert_eq!(
            cache.get("version").await,
            Some(json!({"version": "0.5.0"}))
        );
    }

    #[tokio::test]
    async fn expired_entries_miss() {
        let cache = enabled(Duration::from_millis(10));
        cache.put("version", &json!({"version": "0.5.0"})).await;
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(cache.get("version").await, None);
    }

    #[tokio::test]
    async fn disabled_cache_never_hits() {
        let cache = MetadataCache::new(&ClientConfig::default());
        cache.put("version", &json!({"version": "0.5.0"})).await;
        assert_eq!(cache.get("version").await, None);
    }

    #[tokio::test]
    async fn invalidation_removes_entry() {
        let cache = enabled(Duration::from_secs(60));
        cache.put("tags", &json!({"models": []})).await;
        cache.invalidate("tags").await;
        assert_eq!(cache.get("tags").await, None);
    }
}
