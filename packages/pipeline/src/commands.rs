//! Concrete commands wrapping the traversal toolkit.

use nestmap_core::{
    append_to_strings, count_leaf_values, deepest_pairs, flatten, pairs_from_value,
    pairs_into_value, pairs_to_map, sort_by_value, Error, Value, DEFAULT_SEPARATOR,
};

use crate::Command;

/// Flattens a nested map to one level of joined keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlattenCommand {
    prefix: String,
    separator: String,
}

impl FlattenCommand {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend `prefix` (joined with the separator) to every produced key.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }
}

impl Default for FlattenCommand {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

impl Command for FlattenCommand {
    fn name(&self) -> &str {
        "flatten"
    }

    fn execute(&self, input: Value) -> Result<Value, Error> {
        let map = input.into_map(self.name())?;
        Ok(Value::Map(flatten(&map, &self.prefix, &self.separator)))
    }
}

/// Extracts the deepest key-value pairs of a nested map.
///
/// The output is an array of `[key, value]` arrays, in traversal order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeepestPairsCommand {
    max_level: Option<usize>,
}

impl DeepestPairsCommand {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop descending after `max_level` nested maps.
    pub fn with_max_level(mut self, max_level: usize) -> Self {
        self.max_level = Some(max_level);
        self
    }
}

impl Command for DeepestPairsCommand {
    fn name(&self) -> &str {
        "deepest_pairs"
    }

    fn execute(&self, input: Value) -> Result<Value, Error> {
        let map = input.into_map(self.name())?;
        Ok(pairs_into_value(deepest_pairs(&map, self.max_level)))
    }
}

/// Sorts a flat map by its values.
///
/// Also accepts the pair list produced by [`DeepestPairsCommand`], which is
/// re-wrapped as a map first (duplicate keys: last value wins).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortCommand {
    descending: bool,
}

impl SortCommand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn descending() -> Self {
        Self { descending: true }
    }
}

impl Command for SortCommand {
    fn name(&self) -> &str {
        "sort"
    }

    fn execute(&self, input: Value) -> Result<Value, Error> {
        let map = match input {
            Value::Map(map) => map,
            pairs @ Value::Array(_) => pairs_to_map(pairs_from_value(pairs, self.name())?),
            other => {
                return Err(Error::malformed(
                    self.name(),
                    "map or array of pairs",
                    other.kind(),
                ))
            }
        };
        Ok(Value::Map(sort_by_value(&map, self.descending)?))
    }
}

/// Counts the leaf values of a nested map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountLeavesCommand;

impl Command for CountLeavesCommand {
    fn name(&self) -> &str {
        "count_leaves"
    }

    fn execute(&self, input: Value) -> Result<Value, Error> {
        let map = input.into_map(self.name())?;
        let count = count_leaf_values(&map);
        Ok(Value::Integer(i64::try_from(count).unwrap_or(i64::MAX)))
    }
}

/// Appends a suffix to the string leaves of a nested map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendStringCommand {
    suffix: String,
    included_keys: Option<Vec<String>>,
}

impl AppendStringCommand {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
            included_keys: None,
        }
    }

    /// Only touch string leaves stored under one of `keys`.
    pub fn with_included_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.included_keys = Some(keys.into_iter().map(Into::into).collect());
        self
    }
}

impl Command for AppendStringCommand {
    fn name(&self) -> &str {
        "append_string"
    }

    fn execute(&self, input: Value) -> Result<Value, Error> {
        let map = input.into_map(self.name())?;
        Ok(Value::Map(append_to_strings(
            &map,
            &self.suffix,
            self.included_keys.as_deref(),
        )))
    }
}
