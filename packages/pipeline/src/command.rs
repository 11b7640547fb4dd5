//! The Command trait.

use nestmap_core::{Error, Value};

/// A single configured transformation step.
///
/// A command turns one value into another. Its configuration is fixed when it
/// is constructed; `execute` never mutates the command, so one instance may be
/// run any number of times, from any thread.
///
/// # Object Safety
///
/// This trait is object-safe: pipelines hold `Box<dyn Command>`.
///
/// # Implementing Custom Commands
///
/// ```rust
/// use nestmap_core::{Error, Value};
/// use nestmap_pipeline::Command;
///
/// struct KeyCount;
///
/// impl Command for KeyCount {
///     fn name(&self) -> &str {
///         "key_count"
///     }
///
///     fn execute(&self, input: Value) -> Result<Value, Error> {
///         let map = input.into_map(self.name())?;
///         Ok(Value::Integer(map.len() as i64))
///     }
/// }
/// ```
pub trait Command: Send + Sync {
    /// Short identifier used in logs and error messages.
    fn name(&self) -> &str;

    /// Transform `input` into a new value.
    fn execute(&self, input: Value) -> Result<Value, Error>;
}
