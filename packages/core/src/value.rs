//! The Value type - a tree-shaped data structure.
//!
//! A `Value` is either a terminal (leaf) value or a nested [`Map`]. Maps keep
//! their keys in insertion order, which is the traversal order every toolkit
//! function follows.

use std::cmp::Ordering;

use indexmap::IndexMap;

use crate::Error;

/// A single level of a nested mapping.
///
/// Keys are unique strings. Iteration follows insertion order; re-inserting an
/// existing key replaces the value but keeps the key's original position.
pub type Map = IndexMap<String, Value>;

/// A dynamically-typed tree value.
///
/// Maps directly onto JSON. Nested mappings are owned, so a `Value` is always
/// a finite tree and can never reference itself.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// Absence of a value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Signed 64-bit integer.
    Integer(i64),
    /// 64-bit floating point.
    Float(f64),
    /// UTF-8 string.
    String(String),
    /// Ordered sequence of values.
    Array(Vec<Value>),
    /// Nested mapping.
    Map(Map),
}

impl Value {
    /// Create an empty map.
    pub fn map() -> Self {
        Value::Map(Map::new())
    }

    /// Check if this value is a nested mapping.
    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    /// Borrow the nested mapping, if this value is one.
    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Short lowercase name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Map(_) => "map",
        }
    }

    /// Unwrap a map, or fail with [`Error::MalformedInput`] on behalf of
    /// `operation`.
    pub fn into_map(self, operation: &str) -> Result<Map, Error> {
        match self {
            Value::Map(map) => Ok(map),
            other => Err(Error::malformed(operation, "map", other.kind())),
        }
    }

    /// Compare two values, if they are mutually orderable.
    ///
    /// Numbers order with numbers: integers, floats and booleans (`false` as
    /// 0, `true` as 1) compare by exact numeric value across variants. NaN
    /// sorts by its sign, below or above every other number. Strings order
    /// with strings. Arrays compare lexicographically and are orderable only
    /// as far as their elements are. Nulls and maps never order, not even
    /// against themselves.
    pub fn try_compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            (Value::Array(a), Value::Array(b)) => {
                for (x, y) in a.iter().zip(b) {
                    match x.try_compare(y)? {
                        Ordering::Equal => continue,
                        ordering => return Some(ordering),
                    }
                }
                Some(a.len().cmp(&b.len()))
            }
            (a, b) => Some(a.as_number()?.compare(b.as_number()?)),
        }
    }

    fn as_number(&self) -> Option<Number> {
        match self {
            Value::Bool(b) => Some(Number::Integer(i64::from(*b))),
            Value::Integer(i) => Some(Number::Integer(*i)),
            Value::Float(f) => Some(Number::Float(*f)),
            _ => None,
        }
    }
}

/// Numeric view of a value, for comparisons across variants.
#[derive(Clone, Copy)]
enum Number {
    Integer(i64),
    Float(f64),
}

// 2^63: the first float above every i64.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

impl Number {
    fn compare(self, other: Number) -> Ordering {
        match (self, other) {
            (Number::Integer(a), Number::Integer(b)) => a.cmp(&b),
            (Number::Float(a), Number::Float(b)) => compare_floats(a, b),
            (Number::Integer(a), Number::Float(b)) => compare_integer_float(a, b),
            (Number::Float(a), Number::Integer(b)) => compare_integer_float(b, a).reverse(),
        }
    }
}

/// -1 for a negative NaN, 1 for a positive NaN, 0 for any other float.
fn nan_rank(f: f64) -> i8 {
    match (f.is_nan(), f.is_sign_negative()) {
        (false, _) => 0,
        (true, true) => -1,
        (true, false) => 1,
    }
}

fn compare_floats(a: f64, b: f64) -> Ordering {
    match (nan_rank(a), nan_rank(b)) {
        (0, 0) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (x, y) => x.cmp(&y),
    }
}

/// Exact comparison, no rounding of `i` through f64.
fn compare_integer_float(i: i64, f: f64) -> Ordering {
    match nan_rank(f) {
        0 => {}
        rank => return 0_i8.cmp(&rank),
    }
    if f >= I64_BOUND {
        return Ordering::Less;
    }
    if f < -I64_BOUND {
        return Ordering::Greater;
    }
    // whole is an integer within i64 range, so the cast is exact.
    let whole = f.trunc();
    match i.cmp(&(whole as i64)) {
        Ordering::Equal => 0.0_f64.partial_cmp(&(f - whole)).unwrap_or(Ordering::Equal),
        ordering => ordering,
    }
}

// Conversion from common types

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Map> for Value {
    fn from(v: Map) -> Self {
        Value::Map(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Array(v.into_iter().map(Into::into).collect())
    }
}

/// Build a [`Map`] from `key => value` pairs, in order.
///
/// ```rust
/// use nestmap_core::{map, Value};
///
/// let m = map! { "a" => map! { "b" => 1 }, "c" => "two" };
/// assert_eq!(m.len(), 2);
/// assert!(m["a"].is_map());
/// assert_eq!(m["c"], Value::from("two"));
/// ```
#[macro_export]
macro_rules! map {
    () => {
        $crate::Map::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::Map::new();
        $(
            map.insert(::std::string::String::from($key), $crate::Value::from($value));
        )+
        map
    }};
}
