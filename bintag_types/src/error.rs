use thiserror::Error;

pub type Result<T, E = CodecError> = std::result::Result<T, E>;

/// Every failure is fatal to the encode or decode call it happens in.
/// Nothing is retried and no partial output is returned.
#[derive(Error, PartialEq, Eq, Clone, Debug)]
pub enum CodecError {
    #[error("Buffer overflow: {needed} bytes needed but {available} available")]
    BufferOverflow { needed: usize, available: usize },

    #[error("Seek target {target} is outside 0..={len}")]
    SeekOutOfRange { target: i64, len: usize },

    #[error("Malformed stream: {0}")]
    MalformedStream(String),

    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("Unsupported value: {0}")]
    UnsupportedValue(String),

    /// Strings, lists and mappings carry a one-byte length or count prefix.
    #[error("{what} length {len} exceeds the one-byte maximum {max}")]
    LengthOverflow {
        what: &'static str,
        len: usize,
        max: usize,
    },
}

impl CodecError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedStream(msg.into())
    }

    pub fn mismatch(msg: impl Into<String>) -> Self {
        Self::SchemaMismatch(msg.into())
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::UnsupportedValue(msg.into())
    }
}
