//! Traversal toolkit for nested mappings.
//!
//! Every function here is pure: it reads the input tree and builds a fresh
//! result, never touching the input in place.

use std::cmp::Ordering;

use crate::{Error, Map, Value};

/// Separator used to join ancestor keys when none is given.
pub const DEFAULT_SEPARATOR: &str = ".";

/// Count the terminal (non-map) values reachable from `map`.
pub fn count_leaf_values(map: &Map) -> usize {
    map.values()
        .map(|value| match value {
            Value::Map(inner) => count_leaf_values(inner),
            _ => 1,
        })
        .sum()
}

/// Flatten a nested mapping to a single level.
///
/// Each produced key is the chain of ancestor keys joined with `separator`,
/// itself prefixed by `prefix` when that is non-empty. If two key paths join
/// to the same string the later value wins, while the key keeps the position
/// of its first insertion.
///
/// ```rust
/// use nestmap_core::{flatten, map, DEFAULT_SEPARATOR};
///
/// let nested = map! { "a" => map! { "b" => 1 }, "c" => 2 };
/// let flat = flatten(&nested, "", DEFAULT_SEPARATOR);
/// assert_eq!(flat, map! { "a.b" => 1, "c" => 2 });
/// ```
pub fn flatten(map: &Map, prefix: &str, separator: &str) -> Map {
    let mut flat = Map::with_capacity(map.len());
    flatten_into(&mut flat, map, prefix, separator);
    flat
}

fn flatten_into(flat: &mut Map, map: &Map, prefix: &str, separator: &str) {
    for (key, value) in map {
        let new_key = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}{separator}{key}")
        };
        match value {
            Value::Map(inner) => flatten_into(flat, inner, &new_key, separator),
            leaf => {
                flat.insert(new_key, leaf.clone());
            }
        }
    }
}

/// Collect the deepest key-value pairs, discarding all higher-level keys.
///
/// `max_level` bounds how many nested maps are descended into; `None`
/// descends to the true leaves. A map reached once the budget is spent is
/// emitted as-is, so `Some(0)` returns the top-level pairs unchanged.
pub fn deepest_pairs(map: &Map, max_level: Option<usize>) -> Vec<(String, Value)> {
    let mut pairs = Vec::new();
    collect_deepest(&mut pairs, map, max_level);
    pairs
}

fn collect_deepest(pairs: &mut Vec<(String, Value)>, map: &Map, budget: Option<usize>) {
    for (key, value) in map {
        match (value, budget) {
            (Value::Map(inner), None) => collect_deepest(pairs, inner, None),
            (Value::Map(inner), Some(remaining)) if remaining > 0 => {
                collect_deepest(pairs, inner, Some(remaining - 1))
            }
            _ => pairs.push((key.clone(), value.clone())),
        }
    }
}

/// Reorder a flat mapping by its values.
///
/// The sort is stable in both directions: entries with equal values keep
/// their original relative order. Fails with [`Error::Comparison`] on the
/// first pair of values that cannot be ordered (see [`Value::try_compare`]),
/// so a mapping mixing numbers with strings, or holding any null, is
/// rejected as a whole.
pub fn sort_by_value(map: &Map, descending: bool) -> Result<Map, Error> {
    let entries: Vec<(&String, &Value)> = map.iter().collect();
    let sorted = merge_sort(entries, &|x: &(&String, &Value), y: &(&String, &Value)| {
        let (a, b) = if descending { (y.1, x.1) } else { (x.1, y.1) };
        a.try_compare(b).ok_or_else(|| Error::Comparison {
            left: a.kind(),
            right: b.kind(),
        })
    })?;

    Ok(sorted
        .into_iter()
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect())
}

/// Stable top-down merge sort with a fallible comparator.
///
/// `slice::sort_by` requires a total order and may panic without one; this
/// stops at the first failed comparison instead.
fn merge_sort<T, F>(mut items: Vec<T>, compare: &F) -> Result<Vec<T>, Error>
where
    F: Fn(&T, &T) -> Result<Ordering, Error>,
{
    if items.len() < 2 {
        return Ok(items);
    }
    let right = items.split_off(items.len() / 2);
    let left = merge_sort(items, compare)?;
    let right = merge_sort(right, compare)?;

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    loop {
        // Ties take from the left run, which keeps the sort stable.
        let take_right = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => compare(l, r)? == Ordering::Greater,
            _ => break,
        };
        merged.extend(if take_right { right.next() } else { left.next() });
    }
    merged.extend(left);
    merged.extend(right);
    Ok(merged)
}

/// Append `suffix` to string leaves, recursing into nested maps.
///
/// With `included_keys`, only string leaves whose own key is listed are
/// changed; nested maps are always descended into. Non-string leaves are
/// copied unchanged.
pub fn append_to_strings(map: &Map, suffix: &str, included_keys: Option<&[String]>) -> Map {
    map.iter()
        .map(|(key, value)| {
            let value = match value {
                Value::Map(inner) => Value::Map(append_to_strings(inner, suffix, included_keys)),
                Value::String(s) if included_keys.map_or(true, |keys| keys.contains(key)) => {
                    Value::String(format!("{s}{suffix}"))
                }
                other => other.clone(),
            };
            (key.clone(), value)
        })
        .collect()
}

/// Re-wrap a list of pairs as a mapping. Duplicate keys: last value wins.
pub fn pairs_to_map(pairs: impl IntoIterator<Item = (String, Value)>) -> Map {
    pairs.into_iter().collect()
}

/// Represent a list of pairs as a Value: an array of `[key, value]` arrays.
pub fn pairs_into_value(pairs: Vec<(String, Value)>) -> Value {
    Value::Array(
        pairs
            .into_iter()
            .map(|(key, value)| Value::Array(vec![Value::String(key), value]))
            .collect(),
    )
}

/// Read back a list of pairs from its Value form.
///
/// Every element must be a two-element array whose first item is a string.
pub fn pairs_from_value(value: Value, operation: &str) -> Result<Vec<(String, Value)>, Error> {
    let items = match value {
        Value::Array(items) => items,
        other => return Err(Error::malformed(operation, "array of pairs", other.kind())),
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::Array(pair) if pair.len() == 2 => {
                let mut pair = pair.into_iter();
                match (pair.next(), pair.next()) {
                    (Some(Value::String(key)), Some(value)) => Ok((key, value)),
                    (Some(key), _) => Err(Error::malformed(operation, "string pair key", key.kind())),
                    _ => Err(Error::malformed(operation, "[key, value] pair", "array")),
                }
            }
            other => Err(Error::malformed(operation, "[key, value] pair", other.kind())),
        })
        .collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn leaf() -> impl Strategy<Value = Value> {
        prop_oneof![
            any::<i64>().prop_map(Value::Integer),
            any::<bool>().prop_map(Value::Bool),
            "[a-z]{0,6}".prop_map(Value::String),
        ]
    }

    /// Nested maps whose keys never contain the default separator.
    fn nested_map() -> impl Strategy<Value = Map> {
        let value = leaf().prop_recursive(4, 48, 4, |inner| {
            prop::collection::vec(("[a-z]{1,3}", inner), 0..4)
                .prop_map(|entries| Value::Map(entries.into_iter().collect()))
        });
        prop::collection::vec(("[a-z]{1,3}", value), 0..6)
            .prop_map(|entries| entries.into_iter().collect())
    }

    /// Mostly numbers near 2^53, where integers and floats interleave, with
    /// the odd string or null.
    fn sortable_leaf() -> impl Strategy<Value = Value> {
        let two_53 = 1_i64 << 53;
        prop_oneof![
            8 => (-64i64..64).prop_map(move |k| Value::Integer(two_53 + k)),
            8 => (-64i64..64).prop_map(move |k| Value::Float((two_53 + 2 * k) as f64)),
            4 => any::<i64>().prop_map(Value::Integer),
            4 => any::<f64>().prop_map(Value::Float),
            2 => any::<bool>().prop_map(Value::Bool),
            1 => "[a-z]{0,3}".prop_map(Value::String),
            1 => Just(Value::Null),
        ]
    }

    fn flat_map() -> impl Strategy<Value = Map> {
        prop::collection::vec(("[a-z.]{1,4}", leaf()), 0..8)
            .prop_map(|entries| entries.into_iter().collect())
    }

    fn leaves(map: &Map, out: &mut Vec<Value>) {
        for value in map.values() {
            match value {
                Value::Map(inner) => leaves(inner, out),
                leaf => out.push(leaf.clone()),
            }
        }
    }

    proptest! {
        /// Without key collisions, flattening keeps one entry per leaf.
        #[test]
        fn prop_flatten_len_matches_leaf_count(m in nested_map()) {
            let flat = flatten(&m, "", DEFAULT_SEPARATOR);
            prop_assert_eq!(flat.len(), count_leaf_values(&m));
        }

        /// A depth-1 mapping flattens to itself whatever the separator.
        #[test]
        fn prop_flatten_flat_is_identity(m in flat_map(), sep in "[-_/.:]{1,2}") {
            let flat = flatten(&m, "", &sep);
            prop_assert_eq!(
                flat.iter().collect::<Vec<_>>(),
                m.iter().collect::<Vec<_>>()
            );
        }

        /// Unbounded deepest pairs visit every leaf, in traversal order.
        #[test]
        fn prop_deepest_pairs_complete(m in nested_map()) {
            let values: Vec<Value> = deepest_pairs(&m, None).into_iter().map(|(_, v)| v).collect();
            let mut expected = Vec::new();
            leaves(&m, &mut expected);
            prop_assert_eq!(values.len(), count_leaf_values(&m));
            prop_assert_eq!(values, expected);
        }

        /// Level zero emits the top-level pairs untouched.
        #[test]
        fn prop_deepest_pairs_level_zero(m in nested_map()) {
            let pairs = deepest_pairs(&m, Some(0));
            let expected: Vec<(String, Value)> =
                m.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
            prop_assert_eq!(pairs, expected);
        }

        /// Equal values keep their original relative order in both directions.
        #[test]
        fn prop_sort_is_stable(values in prop::collection::vec(0i64..4, 0..100), descending in any::<bool>()) {
            let m: Map = values
                .iter()
                .enumerate()
                .map(|(i, v)| (format!("k{i:03}"), Value::Integer(*v)))
                .collect();
            let sorted = sort_by_value(&m, descending).unwrap();
            prop_assert_eq!(sorted.len(), m.len());

            let entries: Vec<(&String, &Value)> = sorted.iter().collect();
            for window in entries.windows(2) {
                let (ka, va) = window[0];
                let (kb, vb) = window[1];
                let ordering = va.try_compare(vb).unwrap();
                if descending {
                    prop_assert_ne!(ordering, Ordering::Less);
                } else {
                    prop_assert_ne!(ordering, Ordering::Greater);
                }
                if ordering == Ordering::Equal {
                    prop_assert!(ka < kb, "{} should precede {}", ka, kb);
                }
            }
        }

        /// Mixed leaves either sort into order or fail with a comparison
        /// error; numbers of any variant always sort.
        #[test]
        fn prop_sort_mixed_kinds(values in prop::collection::vec(sortable_leaf(), 0..100), descending in any::<bool>()) {
            let m: Map = values
                .iter()
                .enumerate()
                .map(|(i, v)| (format!("k{i:03}"), v.clone()))
                .collect();
            let all_numbers = values
                .iter()
                .all(|v| matches!(v, Value::Bool(_) | Value::Integer(_) | Value::Float(_)));

            match sort_by_value(&m, descending) {
                Ok(sorted) => {
                    prop_assert_eq!(sorted.len(), m.len());
                    let entries: Vec<&Value> = sorted.values().collect();
                    for pair in entries.windows(2) {
                        let ordering = pair[0].try_compare(pair[1]);
                        prop_assert!(ordering.is_some());
                        if descending {
                            prop_assert_ne!(ordering, Some(Ordering::Less));
                        } else {
                            prop_assert_ne!(ordering, Some(Ordering::Greater));
                        }
                    }
                }
                Err(err) => {
                    prop_assert!(matches!(err, Error::Comparison { .. }), "expected Error::Comparison, got {:?}", err);
                    prop_assert!(!all_numbers);
                }
            }
        }
    }
}
