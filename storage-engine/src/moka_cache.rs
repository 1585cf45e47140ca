use async_trait::async_trait;
use carbon_serde::domain::Entries;
use carbon_serde::domain::response::{ClearResponse, DeleteResponse, ExistsResponse, PutResponse};
use carbon_serde::ports::CacheStore;
use futures::future::join_all;
use moka::Expiry;
use moka::future::Cache;
use shared::config::Config;
use shared::{Result, TtlMs};
use std::fmt::Debug;
use std::hash::Hash;
use std::time::{Duration, Instant};

/// Stored value together with the TTL it was written with.
#[derive(Clone, Debug)]
struct Slot<V> {
    value: V,
    ttl: Option<Duration>,
}

impl<V> Slot<V> {
    fn new(value: V, ttl: Option<TtlMs>) -> Self {
        Self {
            value,
            ttl: ttl.map(|t| t.as_duration()),
        }
    }
}

/// Per-entry expiry: every write restarts the clock with the TTL it carried.
struct SlotExpiry;

impl<K, V> Expiry<K, Slot<V>> for SlotExpiry {
    fn expire_after_create(
        &self,
        _key: &K,
        slot: &Slot<V>,
        _created_at: Instant,
    ) -> Option<Duration> {
        slot.ttl
    }

    fn expire_after_update(
        &self,
        _key: &K,
        slot: &Slot<V>,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        slot.ttl
    }
}

/// Moka-based cache implementation with TTL support
/// Provides lock-free, concurrent cache with optional size bounds, a cache-wide
/// TTL and per-entry TTLs. When both apply, the earlier expiry wins.
pub struct MokaCache<K, V>
where
    K: Debug + Hash + Eq + Send + Sync + 'static,
    V: Debug + Send + Sync + Clone + 'static,
{
    cache: Cache<K, Slot<V>>,
}

impl<K, V> MokaCache<K, V>
where
    K: Debug + Hash + Eq + Send + Sync + 'static,
    V: Debug + Send + Sync + Clone + 'static,
{
    /// Create a new unbounded Moka cache with optional default TTL
    pub fn new_unbounded(default_ttl: Option<Duration>) -> Self {
        Self::new("unbounded".to_string(), None, default_ttl)
    }

    /// Create a new bounded Moka cache with max entries and optional default TTL
    pub fn new_bounded(max_entries: u64, default_ttl: Option<Duration>) -> Self {
        Self::new("bounded".to_string(), Some(max_entries), default_ttl)
    }

    pub fn new(name: String, max_entries: Option<u64>, default_ttl: Option<Duration>) -> Self {
        let mut builder = Cache::builder().name(&name).expire_after(SlotExpiry);

        if let Some(capacity) = max_entries {
            builder = builder.max_capacity(capacity);
        }

        if let Some(ttl) = default_ttl {
            builder = builder.time_to_live(ttl);
        }

        Self {
            cache: builder.build(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.cache_name.clone(),
            config.max_entries,
            config.default_ttl(),
        )
    }
}

#[async_trait]
impl<K, V> CacheStore<K, V> for MokaCache<K, V>
where
    K: Debug + Hash + Eq + Clone + Send + Sync + 'static,
    V: Debug + Send + Sync + Clone + 'static,
{
    async fn get(&self, key: &K, default: Option<V>) -> Result<Option<V>> {
        // Either doesn't exist or TTL expired
        Ok(self.cache.get(key).await.map(|slot| slot.value).or(default))
    }

    async fn set(&self, key: K, val: V, ttl: Option<TtlMs>) -> Result<PutResponse> {
        self.cache.insert(key, Slot::new(val, ttl)).await;
        Ok(PutResponse::new(true))
    }

    async fn delete(&self, key: &K) -> Result<DeleteResponse> {
        let existed = self.cache.remove(key).await.is_some();
        Ok(DeleteResponse::new(existed))
    }

    async fn get_multiple(&self, keys: &[K], default: Option<V>) -> Result<Entries<K, V>> {
        let slots = join_all(keys.iter().map(|key| self.cache.get(key))).await;

        Ok(keys
            .iter()
            .cloned()
            .zip(slots)
            .map(|(key, slot)| {
                let value = slot.map(|slot| slot.value).or_else(|| default.clone());
                (key, value)
            })
            .collect())
    }

    async fn set_multiple(&self, values: Vec<(K, V)>, ttl: Option<TtlMs>) -> Result<PutResponse> {
        for (key, val) in values {
            self.cache.insert(key, Slot::new(val, ttl)).await;
        }
        Ok(PutResponse::new(true))
    }

    async fn delete_multiple(&self, keys: &[K]) -> Result<DeleteResponse> {
        let mut deleted = false;
        for key in keys {
            deleted |= self.cache.remove(key).await.is_some();
        }
        Ok(DeleteResponse::new(deleted))
    }

    async fn clear(&self) -> Result<ClearResponse> {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
        Ok(ClearResponse::new(true))
    }

    async fn has(&self, key: &K) -> Result<ExistsResponse> {
        Ok(ExistsResponse::new(self.cache.contains_key(key)))
    }
}

impl<K, V> Debug for MokaCache<K, V>
where
    K: Debug + Hash + Eq + Send + Sync + 'static,
    V: Debug + Send + Sync + Clone + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaCache")
            .field("name", &self.cache.name())
            .field("entry_count", &self.cache.entry_count())
            .field("weighted_size", &self.cache.weighted_size())
            .finish()
    }
}
