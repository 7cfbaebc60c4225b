mod noop_store;
mod redis_store;

use std::future::Future;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use noop_store::NoopCacheStore;
use redis_store::RedisCacheStore;

/// How long guild settings stay cached before the next database read.
pub const CONFIG_CACHE_TTL: Duration = Duration::from_secs(300);

#[derive(Clone, Debug)]
enum CacheBackend {
    Disabled(NoopCacheStore),
    Redis(RedisCacheStore),
}

#[derive(Clone, Debug)]
pub struct CacheService {
    key_prefix: String,
    backend: CacheBackend,
}

impl CacheService {
    pub fn disabled(prefix: impl Into<String>) -> Self {
        Self {
            key_prefix: prefix.into(),
            backend: CacheBackend::Disabled(NoopCacheStore),
        }
    }

    pub fn redis(redis_url: &str, prefix: impl Into<String>) -> anyhow::Result<Self> {
        Ok(Self {
            key_prefix: prefix.into(),
            backend: CacheBackend::Redis(RedisCacheStore::from_url(redis_url)?),
        })
    }

    pub fn is_redis_enabled(&self) -> bool {
        matches!(self.backend, CacheBackend::Redis(_))
    }

    pub fn key(&self, suffix: impl AsRef<str>) -> String {
        format!("{}:{}", self.key_prefix, suffix.as_ref())
    }

    pub async fn get_json<T>(&self, key: &str) -> anyhow::Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let value = match &self.backend {
            CacheBackend::Disabled(store) => store.get(key).await,
            CacheBackend::Redis(store) => store.get(key).await,
        }?;

        match value {
            Some(bytes) => {
                let parsed = serde_json::from_slice(&bytes).map_err(|e| {
                    anyhow::anyhow!("failed to deserialize cache value for `{key}`: {e}")
                })?;
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }

    pub async fn set_json<T>(&self, key: &str, value: &T, ttl: Duration) -> anyhow::Result<()>
    where
        T: Serialize,
    {
        let ttl_seconds = ttl.as_secs().max(1);
        let payload = serde_json::to_vec(value)
            .map_err(|e| anyhow::anyhow!("failed to serialize cache value for `{key}`: {e}"))?;

        match &self.backend {
            CacheBackend::Disabled(store) => store.set(key, payload, ttl_seconds).await,
            CacheBackend::Redis(store) => store.set(key, payload, ttl_seconds).await,
        }
    }

    pub async fn del(&self, key: &str) -> anyhow::Result<()> {
        match &self.backend {
            CacheBackend::Disabled(store) => store.del(key).await,
            CacheBackend::Redis(store) => store.del(key).await,
        }
    }

    /// Round-trip to the backend so startup can report an unreachable cache.
    pub async fn ping(&self) -> anyhow::Result<()> {
        match &self.backend {
            CacheBackend::Disabled(_) => Ok(()),
            CacheBackend::Redis(store) => store.ping().await,
        }
    }

    pub async fn get_or_load_json<T, F, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        loader: F,
    ) -> anyhow::Result<T>
    where
        T: Serialize + DeserializeOwned + Clone,
        F: FnOnce() -> Fut,
        Fut: Future<Output = anyhow::Result<T>>,
    {
        match self.get_json::<T>(key).await {
            Ok(Some(cached)) => return Ok(cached),
            Ok(None) => {}
            Err(e) => warn!(
                ?e,
                cache_key = key,
                "cache get failed; falling back to database"
            ),
        }

        let loaded = loader().await?;

        if let Err(e) = self.set_json(key, &loaded, ttl).await {
            warn!(
                ?e,
                cache_key = key,
                "cache set failed; returning database value"
            );
        }

        Ok(loaded)
    }
}

pub fn server_settings_key(cache: &CacheService, guild_id: u64) -> String {
    cache.key(format!("settings:{guild_id}"))
}

/// Drop the cached settings after a committed write. Failures only log; the
/// stale entry expires after [`CONFIG_CACHE_TTL`]. Returns whether the key was
/// removed.
pub async fn invalidate_server_settings(cache: &CacheService, guild_id: u64) -> bool {
    let key = server_settings_key(cache, guild_id);
    match cache.del(&key).await {
        Ok(()) => true,
        Err(e) => {
            warn!(?e, cache_key = %key, "cache invalidation failed; settings were saved");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{CacheService, invalidate_server_settings, server_settings_key};

    #[test]
    fn keys_are_prefixed() {
        let cache = CacheService::disabled("warden:test");
        assert_eq!(server_settings_key(&cache, 42), "warden:test:settings:42");
        assert!(!cache.is_redis_enabled());
    }

    #[tokio::test]
    async fn disabled_cache_always_loads() {
        let cache = CacheService::disabled("warden:test");
        let first: u32 = cache
            .get_or_load_json("k", Duration::from_secs(5), || async { Ok(1) })
            .await
            .expect("load");
        let second: u32 = cache
            .get_or_load_json("k", Duration::from_secs(5), || async { Ok(2) })
            .await
            .expect("load");

        assert_eq!((first, second), (1, 2));
        cache.ping().await.expect("noop ping");
    }

    #[tokio::test]
    async fn unreachable_cache_does_not_fail_invalidation() {
        let cache = CacheService::redis("redis://127.0.0.1:1", "warden:test").expect("pool");

        assert!(!invalidate_server_settings(&cache, 42).await);
        assert!(invalidate_server_settings(&CacheService::disabled("warden:test"), 42).await);
    }
}
