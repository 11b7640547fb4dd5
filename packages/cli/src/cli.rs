use std::path::PathBuf;

use clap::{Parser, Subcommand};
use nestmap_core::{Error, DEFAULT_SEPARATOR};
use nestmap_pipeline::{PipelineSpec, Step};

/// nestmap - Flatten, extract and sort nested JSON objects
#[derive(Parser, Debug)]
#[command(name = "nestmap")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Pretty-print the JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub action: Action,
}

#[derive(Subcommand, Debug)]
pub enum Action {
    /// Count the leaf values
    Count {
        /// JSON file to read (stdin when absent or "-")
        input: Option<PathBuf>,
    },
    /// Flatten to one level, joining keys with a separator
    Flatten {
        /// Prefix for every produced key
        #[arg(long, default_value = "")]
        prefix: String,

        #[arg(long, default_value = DEFAULT_SEPARATOR)]
        separator: String,

        input: Option<PathBuf>,
    },
    /// List the deepest key-value pairs
    Deepest {
        /// Number of nested objects to descend into
        #[arg(long)]
        max_level: Option<usize>,

        input: Option<PathBuf>,
    },
    /// Sort a flat object by its values
    Sort {
        #[arg(long)]
        descending: bool,

        input: Option<PathBuf>,
    },
    /// Append a suffix to string values
    Append {
        #[arg(long)]
        suffix: String,

        /// Only change values under this key (repeatable)
        #[arg(long = "key")]
        keys: Vec<String>,

        input: Option<PathBuf>,
    },
    /// Run a pipeline described in a JSON spec file
    Run {
        #[arg(long, env = "NESTMAP_PIPELINE")]
        spec: PathBuf,

        input: Option<PathBuf>,
    },
}

impl Action {
    /// Split into the pipeline description and the input location.
    pub fn into_spec(self) -> Result<(PipelineSpec, Option<PathBuf>), Error> {
        let (step, input) = match self {
            Action::Count { input } => (Step::CountLeaves, input),
            Action::Flatten {
                prefix,
                separator,
                input,
            } => (Step::Flatten { prefix, separator }, input),
            Action::Deepest { max_level, input } => (Step::DeepestPairs { max_level }, input),
            Action::Sort { descending, input } => (Step::Sort { descending }, input),
            Action::Append {
                suffix,
                keys,
                input,
            } => {
                let included_keys = if keys.is_empty() { None } else { Some(keys) };
                (
                    Step::AppendString {
                        suffix,
                        included_keys,
                    },
                    input,
                )
            }
            Action::Run { spec, input } => return Ok((PipelineSpec::from_path(&spec)?, input)),
        };
        Ok((PipelineSpec::new(vec![step]), input))
    }
}
