//! Transparent value serialization in front of any asynchronous key-value cache.
//!
//! [`SerializingCache`] implements the same [`CacheStore`] port as the cache it
//! wraps. Values are encoded with a [`Codec`] on the way in and decoded on the
//! way out; keys, TTLs, presence checks and deletions pass through untouched.

#![deny(clippy::all)]

pub mod codec;
pub mod domain;
pub mod ports;
pub mod serializing;

pub use codec::{Codec, JsonCodec};
pub use ports::{CacheStore, StorageFactory};
pub use serializing::SerializingCache;
