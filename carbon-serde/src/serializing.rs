use crate::codec::{Codec, JsonCodec};
use crate::domain::Entries;
use crate::domain::response::{ClearResponse, DeleteResponse, ExistsResponse, PutResponse};
use crate::ports::CacheStore;
use async_trait::async_trait;
use bytes::Bytes;
use serde::{Serialize, de::DeserializeOwned};
use shared::{Result, TtlMs};
use std::fmt::Debug;
use std::marker::PhantomData;
use tracing::warn;

/// Decorator that stores encoded values in a byte-oriented [`CacheStore`].
///
/// Only the value channel is transformed. A missing key yields the caller's
/// default as-is; it is never handed to the codec. Errors from the wrapped
/// store are returned unchanged and nothing is retried here.
pub struct SerializingCache<S, V, C = JsonCodec> {
    inner: S,
    codec: C,
    _value: PhantomData<fn() -> V>,
}

impl<S, V> SerializingCache<S, V, JsonCodec> {
    pub fn new(inner: S) -> Self {
        Self::with_codec(inner, JsonCodec)
    }
}

impl<S, V, C> SerializingCache<S, V, C> {
    pub fn with_codec(inner: S, codec: C) -> Self {
        Self {
            inner,
            codec,
            _value: PhantomData,
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S, V, C> SerializingCache<S, V, C>
where
    V: Serialize + DeserializeOwned,
    C: Codec,
{
    fn encode_value<K: Debug>(&self, key: &K, value: &V) -> Result<Bytes> {
        self.codec.encode(value).inspect_err(|e| {
            warn!("Refusing to store value for key '{:?}': {}", key, e);
        })
    }

    fn decode_value<K: Debug>(&self, key: &K, raw: &[u8]) -> Result<V> {
        self.codec.decode(raw).inspect_err(|e| {
            warn!(
                "Stored value for key '{:?}' ({} bytes) could not be decoded: {}",
                key,
                raw.len(),
                e
            );
        })
    }
}

#[async_trait]
impl<K, V, S, C> CacheStore<K, V> for SerializingCache<S, V, C>
where
    K: Debug + Send + Sync + 'static,
    V: Serialize + DeserializeOwned + Clone + Send + 'static,
    S: CacheStore<K, Bytes>,
    C: Codec,
{
    async fn get(&self, key: &K, default: Option<V>) -> Result<Option<V>> {
        match self.inner.get(key, None).await? {
            Some(raw) => self.decode_value(key, &raw).map(Some),
            None => Ok(default),
        }
    }

    async fn set(&self, key: K, val: V, ttl: Option<TtlMs>) -> Result<PutResponse> {
        let encoded = self.encode_value(&key, &val)?;
        self.inner.set(key, encoded, ttl).await
    }

    async fn delete(&self, key: &K) -> Result<DeleteResponse> {
        self.inner.delete(key).await
    }

    async fn get_multiple(&self, keys: &[K], default: Option<V>) -> Result<Entries<K, V>> {
        let entries = self.inner.get_multiple(keys, None).await?;

        entries
            .into_iter()
            .map(|(key, raw)| match raw {
                Some(raw) => {
                    let value = self.decode_value(&key, &raw)?;
                    Ok((key, Some(value)))
                }
                None => Ok((key, default.clone())),
            })
            .collect()
    }

    async fn set_multiple(&self, values: Vec<(K, V)>, ttl: Option<TtlMs>) -> Result<PutResponse> {
        let encoded = values
            .into_iter()
            .map(|(key, val)| {
                let raw = self.encode_value(&key, &val)?;
                Ok((key, raw))
            })
            .collect::<Result<Vec<_>>>()?;

        self.inner.set_multiple(encoded, ttl).await
    }

    async fn delete_multiple(&self, keys: &[K]) -> Result<DeleteResponse> {
        self.inner.delete_multiple(keys).await
    }

    async fn clear(&self) -> Result<ClearResponse> {
        self.inner.clear().await
    }

    async fn has(&self, key: &K) -> Result<ExistsResponse> {
        self.inner.has(key).await
    }
}

impl<S, V, C> Clone for SerializingCache<S, V, C>
where
    S: Clone,
    C: Clone,
{
    fn clone(&self) -> Self {
        Self::with_codec(self.inner.clone(), self.codec.clone())
    }
}

impl<S, V, C> Debug for SerializingCache<S, V, C>
where
    S: Debug,
    C: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerializingCache")
            .field("inner", &self.inner)
            .field("codec", &self.codec)
            .finish()
    }
}
