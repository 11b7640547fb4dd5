//! Declarative pipeline descriptions.
//!
//! A [`PipelineSpec`] is the serializable form of a [`Pipeline`]: a list of
//! steps, each naming a command and its configuration.
//!
//! ```json
//! {
//!   "steps": [
//!     { "command": "flatten", "separator": "/" },
//!     { "command": "deepest_pairs", "max_level": 1 },
//!     { "command": "sort", "descending": true }
//!   ]
//! }
//! ```
//!
//! Omitted fields take the command's defaults.

use std::path::Path;

use nestmap_core::{Error, DEFAULT_SEPARATOR};
use serde::{Deserialize, Serialize};

use crate::{
    AppendStringCommand, Command, CountLeavesCommand, DeepestPairsCommand, FlattenCommand,
    Pipeline, SortCommand,
};

fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}

/// One configured step of a pipeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Step {
    Flatten {
        #[serde(default)]
        prefix: String,
        #[serde(default = "default_separator")]
        separator: String,
    },
    DeepestPairs {
        #[serde(default)]
        max_level: Option<usize>,
    },
    Sort {
        #[serde(default)]
        descending: bool,
    },
    CountLeaves,
    AppendString {
        suffix: String,
        #[serde(default)]
        included_keys: Option<Vec<String>>,
    },
}

impl Step {
    /// Build the command this step describes.
    pub fn to_command(&self) -> Box<dyn Command> {
        match self {
            Step::Flatten { prefix, separator } => Box::new(
                FlattenCommand::new()
                    .with_prefix(prefix.as_str())
                    .with_separator(separator.as_str()),
            ),
            Step::DeepestPairs { max_level } => {
                let command = DeepestPairsCommand::new();
                Box::new(match max_level {
                    Some(level) => command.with_max_level(*level),
                    None => command,
                })
            }
            Step::Sort { descending: true } => Box::new(SortCommand::descending()),
            Step::Sort { descending: false } => Box::new(SortCommand::new()),
            Step::CountLeaves => Box::new(CountLeavesCommand),
            Step::AppendString {
                suffix,
                included_keys,
            } => {
                let command = AppendStringCommand::new(suffix.as_str());
                Box::new(match included_keys {
                    Some(keys) => command.with_included_keys(keys.iter().cloned()),
                    None => command,
                })
            }
        }
    }

    /// Configuration checks for this step, as `(passed, message)` pairs.
    fn checks(&self) -> Vec<(bool, &'static str)> {
        match self {
            Step::Flatten { separator, .. } => {
                vec![(!separator.is_empty(), "flatten separator must not be empty")]
            }
            Step::AppendString {
                suffix,
                included_keys,
            } => vec![
                (!suffix.is_empty(), "append_string suffix must not be empty"),
                (
                    included_keys.as_ref().map_or(true, |keys| !keys.is_empty()),
                    "append_string included_keys must not be empty when given",
                ),
            ],
            Step::DeepestPairs { .. } | Step::Sort { .. } | Step::CountLeaves => Vec::new(),
        }
    }
}

/// The serializable description of a pipeline.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineSpec {
    pub steps: Vec<Step>,
}

impl PipelineSpec {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    /// Parse a spec from JSON text.
    pub fn from_json(text: &str) -> Result<Self, Error> {
        serde_json::from_str(text).map_err(|e| Error::decode(e.to_string()))
    }

    /// Read and parse a JSON spec file.
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        log::debug!("Reading {}...", path.display());
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Run every configuration check, collecting all failures.
    ///
    /// Returns [`Error::InvalidConfig`] listing each failed check with the
    /// index of its step.
    pub fn validate(&self) -> Result<(), Error> {
        let checks: Vec<(usize, bool, &'static str)> = self
            .steps
            .iter()
            .enumerate()
            .flat_map(|(index, step)| {
                step.checks()
                    .into_iter()
                    .map(move |(passed, message)| (index, passed, message))
            })
            .collect();

        let total = checks.len();
        let mut errors = Vec::new();
        for (done, (index, passed, message)) in checks.into_iter().enumerate() {
            if !passed {
                let error = format!("step {}: {}", index, message);
                log::error!("{}", error);
                errors.push(error);
            }
            log::debug!(
                "{}/{} - {} passed, {} failed. Validating pipeline spec.",
                done + 1,
                total,
                done + 1 - errors.len(),
                errors.len()
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::InvalidConfig { errors })
        }
    }

    /// Validate the spec and build the pipeline it describes.
    pub fn build(&self) -> Result<Pipeline, Error> {
        self.validate()?;
        Ok(self.steps.iter().map(Step::to_command).collect())
    }
}
