//! Core nestmap: nested mappings and the traversal toolkit
//!
//! This layer holds everything that does not depend on a wire format:
//! - `Value`: Tree-shaped dynamically typed value
//! - `Map`: One insertion-ordered level of a nested mapping
//! - `Error`: Errors shared by every layer
//! - `Codec`: Conversion between `Value` and bytes
//! - The toolkit: `count_leaf_values`, `flatten`, `deepest_pairs`,
//!   `sort_by_value` and `append_to_strings`
//!
//! # Example
//!
//! ```rust
//! use nestmap_core::{count_leaf_values, flatten, map, sort_by_value, DEFAULT_SEPARATOR};
//!
//! let nested = map! {
//!     "a" => map! { "b" => map! { "c" => 66, "d" => 22 }, "e" => 33 },
//!     "f" => 88,
//! };
//! assert_eq!(count_leaf_values(&nested), 4);
//!
//! let sorted = sort_by_value(&flatten(&nested, "", DEFAULT_SEPARATOR), true).unwrap();
//! let keys: Vec<&str> = sorted.keys().map(String::as_str).collect();
//! assert_eq!(keys, ["f", "a.b.c", "a.e", "a.b.d"]);
//! ```

pub use bytes::Bytes;

mod codec;
mod error;
mod traverse;
mod value;

pub use codec::Codec;
pub use error::Error;
pub use traverse::{
    append_to_strings, count_leaf_values, deepest_pairs, flatten, pairs_from_value,
    pairs_into_value, pairs_to_map, sort_by_value, DEFAULT_SEPARATOR,
};
pub use value::{Map, Value};
