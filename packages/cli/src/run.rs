use std::io::{self, Read, Write};
use std::path::Path;

use nestmap_core::{Codec, Error};
use nestmap_serde::{Bytes, JsonCodec};

use crate::cli::Cli;

/// Read the input, run the requested pipeline and print the result.
pub fn run(cli: Cli) -> Result<(), Error> {
    let codec = JsonCodec {
        pretty: cli.pretty,
    };
    let (spec, input) = cli.action.into_spec()?;
    let pipeline = spec.build()?;
    log::info!("Pipeline: {:?}", pipeline);

    let value = codec.decode(&read_input(input.as_deref())?)?;
    if !value.is_map() {
        return Err(Error::malformed("input", "JSON object", value.kind()));
    }

    let output = pipeline.process(value)?;
    let bytes = codec.encode(&output)?;

    let stdout = io::stdout();
    let mut stdout = stdout.lock();
    stdout
        .write_all(&bytes)
        .and_then(|()| stdout.write_all(b"\n"))
        .map_err(|source| Error::Io {
            path: "<stdout>".to_string(),
            source,
        })
}

fn read_input(path: Option<&Path>) -> Result<Bytes, Error> {
    match path {
        Some(path) if path != Path::new("-") => {
            log::debug!("Reading {}...", path.display());
            std::fs::read(path)
                .map(Bytes::from)
                .map_err(|source| Error::Io {
                    path: path.display().to_string(),
                    source,
                })
        }
        _ => {
            log::debug!("Reading stdin...");
            let mut buffer = Vec::new();
            io::stdin()
                .lock()
                .read_to_end(&mut buffer)
                .map_err(|source| Error::Io {
                    path: "<stdin>".to_string(),
                    source,
                })?;
            Ok(Bytes::from(buffer))
        }
    }
}
