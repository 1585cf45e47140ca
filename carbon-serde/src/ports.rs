#![deny(clippy::all)]

use crate::domain::Entries;
use crate::domain::response::{ClearResponse, DeleteResponse, ExistsResponse, PutResponse};
use async_trait::async_trait;
use shared::config::Config;
use shared::{Result, TtlMs};
use std::sync::Arc;

// Ports are the pluggable extension points for underlying cache implementations

/// Port for creating cache storage from configuration
/// This allows different storage backends to be plugged in
pub trait StorageFactory<K, V>: Send + Sync + 'static {
    /// Create a new cache store from configuration
    fn create_from_config(&self, config: &Config) -> Arc<dyn CacheStore<K, V>>;
}

/// Port for cache operations.
///
/// Missing keys are reported as `None`, or as the caller's `default` for the
/// operations that accept one. Backing stores hold encoded bytes
/// (`CacheStore<K, Bytes>`); the serializing layer exposes typed values.
#[async_trait]
pub trait CacheStore<K, V>: Send + Sync + 'static {
    async fn get(&self, key: &K, default: Option<V>) -> Result<Option<V>>;
    async fn set(&self, key: K, val: V, ttl: Option<TtlMs>) -> Result<PutResponse>;
    async fn delete(&self, key: &K) -> Result<DeleteResponse>;
    async fn get_multiple(&self, keys: &[K], default: Option<V>) -> Result<Entries<K, V>>;
    async fn set_multiple(&self, values: Vec<(K, V)>, ttl: Option<TtlMs>) -> Result<PutResponse>;
    async fn delete_multiple(&self, keys: &[K]) -> Result<DeleteResponse>;
    async fn clear(&self) -> Result<ClearResponse>;
    async fn has(&self, key: &K) -> Result<ExistsResponse>;
}

#[async_trait]
impl<K, V, S> CacheStore<K, V> for Arc<S>
where
    K: Send + Sync + 'static,
    V: Send + 'static,
    S: CacheStore<K, V> + ?Sized,
{
    async fn get(&self, key: &K, default: Option<V>) -> Result<Option<V>> {
        (**self).get(key, default).await
    }

    async fn set(&self, key: K, val: V, ttl: Option<TtlMs>) -> Result<PutResponse> {
        (**self).set(key, val, ttl).await
    }

    async fn delete(&self, key: &K) -> Result<DeleteResponse> {
        (**self).delete(key).await
    }

    async fn get_multiple(&self, keys: &[K], default: Option<V>) -> Result<Entries<K, V>> {
        (**self).get_multiple(keys, default).await
    }

    async fn set_multiple(&self, values: Vec<(K, V)>, ttl: Option<TtlMs>) -> Result<PutResponse> {
        (**self).set_multiple(values, ttl).await
    }

    async fn delete_multiple(&self, keys: &[K]) -> Result<DeleteResponse> {
        (**self).delete_multiple(keys).await
    }

    async fn clear(&self) -> Result<ClearResponse> {
        (**self).clear().await
    }

    async fn has(&self, key: &K) -> Result<ExistsResponse> {
        (**self).has(key).await
    }
}
