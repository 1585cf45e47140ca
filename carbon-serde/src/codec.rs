use bytes::Bytes;
use serde::{Serialize, de::DeserializeOwned};
use shared::{Error, Result};

mod exact;

/// Reversible transformation between typed values and stored bytes.
///
/// `decode(encode(v))` must equal `v` for every value the format can
/// represent. Failures surface as [`Error::Encode`] and [`Error::Decode`].
pub trait Codec: Send + Sync + 'static {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Bytes>;

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T>;
}

/// JSON envelope backed by `serde_json`.
///
/// Values JSON would store lossily are refused with [`Error::Encode`]:
/// non-finite floats, and `Some(x)` where `x` itself serializes as `null`
/// (`Some(None)`, `Some(())`, `Some(Value::Null)`).
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Bytes> {
        exact::check(value).map_err(|e| Error::Encode(e.to_string()))?;

        serde_json::to_vec(value)
            .map(Bytes::from)
            .map_err(|e| Error::Encode(e.to_string()))
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T> {
        serde_json::from_slice(data).map_err(|e| Error::Decode(e.to_string()))
    }
}
