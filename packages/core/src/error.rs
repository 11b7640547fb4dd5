//! Error types shared by every nestmap layer.

/// Errors raised by the toolkit, the codecs and the pipeline.
///
/// Every operation is fail-fast: the first error aborts the call and no
/// partial result is returned.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input is not the shape the operation needs.
    #[error("{operation}: expected {expected}, found {found}")]
    MalformedInput {
        operation: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Two values met during a sort cannot be ordered against each other.
    #[error("cannot compare {left} with {right}")]
    Comparison {
        left: &'static str,
        right: &'static str,
    },

    /// Codec failed to decode bytes.
    #[error("decode error: {message}")]
    Decode { message: String },

    /// Codec failed to encode a value.
    #[error("encode error: {message}")]
    Encode { message: String },

    /// A pipeline description failed validation.
    ///
    /// Carries every failed check, not just the first.
    #[error("invalid pipeline configuration: {}", .errors.join("; "))]
    InvalidConfig { errors: Vec<String> },

    /// Reading an input or configuration file failed.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn malformed(operation: &str, expected: &'static str, found: &'static str) -> Self {
        Error::MalformedInput {
            operation: operation.to_string(),
            expected,
            found,
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Error::Decode {
            message: message.into(),
        }
    }

    pub fn encode(message: impl Into<String>) -> Self {
        Error::Encode {
            message: message.into(),
        }
    }
}
