//! Sequential evaluation of commands.

use std::fmt;

use nestmap_core::{Error, Value};

use crate::Command;

/// An ordered chain of commands.
///
/// The pipeline owns no data. Each call to [`Pipeline::process`] feeds its
/// input through every command in order and returns the last output; an empty
/// pipeline hands its input back unchanged.
///
/// # Example
///
/// ```rust
/// use nestmap_core::{map, Value};
/// use nestmap_pipeline::{DeepestPairsCommand, FlattenCommand, Pipeline, SortCommand};
///
/// let pipeline = Pipeline::default()
///     .then(FlattenCommand::new())
///     .then(DeepestPairsCommand::new())
///     .then(SortCommand::descending());
///
/// let input = Value::from(map! { "a" => map! { "b" => 1, "c" => 3 }, "d" => 2 });
/// let output = pipeline.process(input).unwrap();
/// assert_eq!(output, Value::from(map! { "a.c" => 3, "d" => 2, "a.b" => 1 }));
/// ```
#[derive(Default)]
pub struct Pipeline {
    commands: Vec<Box<dyn Command>>,
}

impl Pipeline {
    pub fn new(commands: Vec<Box<dyn Command>>) -> Self {
        Self { commands }
    }

    /// Append a command to the end of the chain.
    pub fn then(mut self, command: impl Command + 'static) -> Self {
        self.commands.push(Box::new(command));
        self
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Names of the commands, in execution order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().map(|command| command.name())
    }

    /// Run `input` through every command in order.
    ///
    /// The first failing command aborts the run; its error is returned as-is.
    pub fn process(&self, input: Value) -> Result<Value, Error> {
        let mut data = input;
        for (step, command) in self.commands.iter().enumerate() {
            log::debug!("Running step {} ({})...", step, command.name());
            data = command.execute(data).inspect_err(|error| {
                log::debug!("Step {} ({}) failed: {}", step, command.name(), error);
            })?;
        }
        Ok(data)
    }
}

/// A pipeline is itself a command, so pipelines nest.
impl Command for Pipeline {
    fn name(&self) -> &str {
        "pipeline"
    }

    fn execute(&self, input: Value) -> Result<Value, Error> {
        self.process(input)
    }
}

impl FromIterator<Box<dyn Command>> for Pipeline {
    fn from_iter<I: IntoIterator<Item = Box<dyn Command>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CountLeavesCommand, FlattenCommand, SortCommand};
    use nestmap_core::map;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Records how often it runs, then passes its input through.
    struct Probe(Arc<AtomicUsize>);

    impl Command for Probe {
        fn name(&self) -> &str {
            "probe"
        }

        fn execute(&self, input: Value) -> Result<Value, Error> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(input)
        }
    }

    #[test]
    fn empty_pipeline_returns_input() {
        let pipeline = Pipeline::default();
        assert!(pipeline.is_empty());
        let input = Value::from(map! { "a" => map! { "b" => 1 } });
        assert_eq!(pipeline.process(input.clone()).unwrap(), input);
        assert_eq!(pipeline.process(Value::from(7)).unwrap(), Value::from(7));
    }

    #[test]
    fn commands_run_in_order() {
        let pipeline = Pipeline::default()
            .then(FlattenCommand::new())
            .then(CountLeavesCommand);
        assert_eq!(pipeline.len(), 2);
        assert_eq!(pipeline.names().collect::<Vec<_>>(), vec!["flatten", "count_leaves"]);

        let input = Value::from(map! { "a" => map! { "b" => 1, "c" => 2 } });
        assert_eq!(pipeline.process(input).unwrap(), Value::Integer(2));
    }

    #[test]
    fn first_failure_aborts_the_run() {
        let calls = Arc::new(AtomicUsize::new(0));
        let pipeline = Pipeline::default()
            .then(CountLeavesCommand)
            .then(FlattenCommand::new())
            .then(Probe(calls.clone()));

        let err = pipeline
            .process(Value::from(map! { "a" => 1 }))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedInput { ref operation, found: "integer", .. } if operation == "flatten"
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn pipeline_is_reusable() {
        let calls = Arc::new(AtomicUsize::new(0));
        let pipeline = Pipeline::default().then(Probe(calls.clone()));
        for _ in 0..3 {
            pipeline.process(Value::Null).unwrap();
        }
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn pipelines_nest() {
        let inner = Pipeline::default().then(FlattenCommand::new().with_separator("/"));
        let outer = Pipeline::default().then(inner).then(SortCommand::new());

        let input = Value::from(map! { "x" => map! { "y" => 2 }, "z" => 1 });
        let out = outer.process(input).unwrap();
        let keys: Vec<&str> = out.as_map().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "x/y"]);
    }

    #[test]
    fn collects_from_boxed_commands() {
        let commands: Vec<Box<dyn Command>> =
            vec![Box::new(FlattenCommand::new()), Box::new(SortCommand::new())];
        let pipeline: Pipeline = commands.into_iter().collect();
        assert_eq!(format!("{:?}", pipeline), r#"["flatten", "sort"]"#);
    }

    #[test]
    fn shared_across_threads() {
        let pipeline = Arc::new(Pipeline::default().then(CountLeavesCommand));
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let pipeline = Arc::clone(&pipeline);
                std::thread::spawn(move || {
                    let input = Value::from(map! { "n" => i, "m" => map! { "k" => i } });
                    pipeline.process(input).unwrap()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), Value::Integer(2));
        }
    }
}
