//! Serde Integration for nestmap
//!
//! This layer adds the JSON surface on top of the core types:
//! - `JsonCodec`: A codec for JSON text, keeping object key order
//! - Value <-> serde conversions (`from_value`, `to_value`)
//! - Value <-> `serde_json::Value` conversions
//!
//! # Example
//!
//! ```rust
//! use nestmap_serde::{from_value, to_value};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct Limits {
//!     low: i64,
//!     high: i64,
//! }
//!
//! let value = to_value(&Limits { low: 1, high: 9 }).unwrap();
//! assert!(value.is_map());
//! let back: Limits = from_value(value).unwrap();
//! assert_eq!(back, Limits { low: 1, high: 9 });
//! ```

pub use bytes::Bytes;

mod codec;
mod convert;

pub use codec::JsonCodec;
pub use convert::{from_value, json_to_value, to_value, value_to_json};

// Re-export core types for convenience
pub use nestmap_core::{Codec, Error, Map, Value};
