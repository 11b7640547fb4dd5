//! Transformation pipelines over nestmap values
//!
//! This layer composes the traversal toolkit into reusable chains:
//! - `Command`: One configured `Value -> Value` transformation
//! - Concrete commands: `FlattenCommand`, `DeepestPairsCommand`,
//!   `SortCommand`, `CountLeavesCommand`, `AppendStringCommand`
//! - `Pipeline`: Ordered chain of commands, itself a `Command`
//! - `PipelineSpec`: Serializable pipeline description
//!
//! # Example
//!
//! ```rust
//! use nestmap_core::{map, Value};
//! use nestmap_pipeline::PipelineSpec;
//!
//! let spec = PipelineSpec::from_json(
//!     r#"{"steps": [{"command": "flatten", "separator": "/"}, {"command": "count_leaves"}]}"#,
//! )
//! .unwrap();
//! let pipeline = spec.build().unwrap();
//!
//! let input = Value::from(map! { "a" => map! { "b" => 1, "c" => 2 }, "d" => 3 });
//! assert_eq!(pipeline.process(input).unwrap(), Value::Integer(3));
//! ```

mod command;
mod commands;
mod pipeline;
mod spec;

pub use command::Command;
pub use commands::{
    AppendStringCommand, CountLeavesCommand, DeepestPairsCommand, FlattenCommand, SortCommand,
};
pub use pipeline::Pipeline;
pub use spec::{PipelineSpec, Step};

// Re-export core types for convenience
pub use nestmap_core::{Error, Map, Value};
