use async_trait::async_trait;
use bytes::Bytes;
use carbon_serde::SerializingCache;
use carbon_serde::domain::Entries;
use carbon_serde::domain::response::{ClearResponse, DeleteResponse, ExistsResponse, PutResponse};
use carbon_serde::ports::{CacheStore, StorageFactory};
use foyer::{Cache, CacheBuilder};
use shared::config::{Backend, Config};
use shared::{Result, TtlMs};
use std::sync::Arc;
use std::{fmt::Debug, hash::Hash};
use tracing::debug;

pub mod moka_cache;

pub use moka_cache::MokaCache;

/// Byte-oriented backing store as produced by [`EngineFactory`].
pub type ByteStore = Arc<dyn CacheStore<String, Bytes>>;

/// Foyer-based in-memory cache implementation
pub struct FoyerCache<K, V>
where
    K: Debug + Hash + Eq + Send + Sync + 'static,
    V: Debug + Send + Sync + Clone + 'static,
{
    cache: Arc<Cache<K, V>>,
}

impl<K, V> FoyerCache<K, V>
where
    K: Debug + Hash + Eq + Send + Sync + 'static,
    V: Debug + Send + Sync + Clone + 'static,
{
    /// Create a new Foyer in-memory cache with the given memory capacity in bytes
    pub fn new(name: String, mem_bytes: usize) -> Self {
        let cache = CacheBuilder::new(mem_bytes).with_name(name).build();

        Self {
            cache: Arc::new(cache),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.cache_name.clone(), config.mem_bytes)
    }

    fn lookup(&self, key: &K) -> Option<V> {
        self.cache.get(key).map(|entry| entry.value().clone())
    }
}

#[async_trait]
impl<K, V> CacheStore<K, V> for FoyerCache<K, V>
where
    K: Debug + Hash + Eq + Clone + Send + Sync + 'static,
    V: Debug + Send + Sync + Clone + 'static,
{
    async fn get(&self, key: &K, default: Option<V>) -> Result<Option<V>> {
        Ok(self.lookup(key).or(default))
    }

    async fn set(&self, key: K, val: V, ttl: Option<TtlMs>) -> Result<PutResponse> {
        // Foyer doesn't have per-entry TTL in the in-memory API
        if let Some(ttl) = ttl {
            debug!("Ignoring TTL of {}ms for key '{:?}' on foyer cache", ttl.0, key);
        }

        self.cache.insert(key, val);
        Ok(PutResponse::new(true))
    }

    async fn delete(&self, key: &K) -> Result<DeleteResponse> {
        let existed = self.cache.remove(key).is_some();
        Ok(DeleteResponse::new(existed))
    }

    async fn get_multiple(&self, keys: &[K], default: Option<V>) -> Result<Entries<K, V>> {
        Ok(keys
            .iter()
            .map(|key| (key.clone(), self.lookup(key).or_else(|| default.clone())))
            .collect())
    }

    async fn set_multiple(&self, values: Vec<(K, V)>, ttl: Option<TtlMs>) -> Result<PutResponse> {
        if let Some(ttl) = ttl {
            debug!(
                "Ignoring TTL of {}ms for {} keys on foyer cache",
                ttl.0,
                values.len()
            );
        }

        for (key, val) in values {
            self.cache.insert(key, val);
        }
        Ok(PutResponse::new(true))
    }

    async fn delete_multiple(&self, keys: &[K]) -> Result<DeleteResponse> {
        let mut deleted = false;
        for key in keys {
            deleted |= self.cache.remove(key).is_some();
        }
        Ok(DeleteResponse::new(deleted))
    }

    async fn clear(&self) -> Result<ClearResponse> {
        self.cache.clear();
        Ok(ClearResponse::new(true))
    }

    async fn has(&self, key: &K) -> Result<ExistsResponse> {
        Ok(ExistsResponse::new(self.cache.contains(key)))
    }
}

impl<K, V> Debug for FoyerCache<K, V>
where
    K: Debug + Hash + Eq + Send + Sync + 'static,
    V: Debug + Send + Sync + Clone + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FoyerCache")
            .field("cache", &"<foyer::Cache>")
            .finish()
    }
}

/// Builds backing stores from [`Config`].
#[derive(Clone, Copy, Debug, Default)]
pub struct EngineFactory;

impl<K, V> StorageFactory<K, V> for EngineFactory
where
    K: Debug + Hash + Eq + Clone + Send + Sync + 'static,
    V: Debug + Send + Sync + Clone + 'static,
{
    fn create_from_config(&self, config: &Config) -> Arc<dyn CacheStore<K, V>> {
        debug!(
            "Creating {:?} backing store '{}'",
            config.backend, config.cache_name
        );

        match config.backend {
            Backend::Moka => Arc::new(MokaCache::from_config(config)),
            Backend::Foyer => {
                if config.default_ttl_ms.is_some() {
                    debug!("Default TTL is not enforced by the foyer backend");
                }
                Arc::new(FoyerCache::from_config(config))
            }
        }
    }
}

/// Open a typed cache over the backing store selected by `config`.
pub fn open_serializing<V>(config: &Config) -> SerializingCache<ByteStore, V> {
    let store: ByteStore = EngineFactory.create_from_config(config);
    SerializingCache::new(store)
}
