//! JSON codec implementation.

use bytes::Bytes;
use nestmap_core::{Codec, Error, Value};

use crate::convert::{json_to_value, value_to_json};

/// A codec that handles JSON encoding/decoding.
///
/// Object key order survives a decode/encode round trip.
///
/// # Example
///
/// ```rust
/// use nestmap_serde::JsonCodec;
/// use nestmap_core::{Codec, Value};
/// use bytes::Bytes;
///
/// let codec = JsonCodec::default();
/// let value = codec.decode(&Bytes::from_static(br#"{"b": 1, "a": 2}"#)).unwrap();
///
/// let bytes = codec.encode(&value).unwrap();
/// assert_eq!(&bytes[..], br#"{"b":1,"a":2}"#);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec {
    /// Emit indented, multi-line JSON.
    pub pretty: bool,
}

impl JsonCodec {
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl Codec for JsonCodec {
    fn decode(&self, bytes: &Bytes) -> Result<Value, Error> {
        let json: serde_json::Value =
            serde_json::from_slice(bytes).map_err(|e| Error::decode(e.to_string()))?;

        Ok(json_to_value(json))
    }

    fn encode(&self, value: &Value) -> Result<Bytes, Error> {
        let json = value_to_json(value.clone());
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(&json)
        } else {
            serde_json::to_vec(&json)
        }
        .map_err(|e| Error::encode(e.to_string()))?;

        Ok(Bytes::from(bytes))
    }
}
