//! Codec trait for converting between Value and bytes.

use bytes::Bytes;

use crate::{Error, Value};

/// Codec for converting between [`Value`] and an encoded byte form.
///
/// The core layer does not know about any concrete format; implementations
/// live in the layers above (see `nestmap-serde` for JSON).
///
/// # Object Safety
///
/// This trait is object-safe: you can use `Box<dyn Codec>`.
pub trait Codec: Send + Sync {
    /// Decode bytes into a Value.
    fn decode(&self, bytes: &Bytes) -> Result<Value, Error>;

    /// Encode a Value to bytes.
    fn encode(&self, value: &Value) -> Result<Bytes, Error>;
}
