//! Error types for phonedata.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for phonedata operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Data file could not be loaded
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Input contains non-digit characters or cannot form a lookup key
    #[error("invalid phone number: {0}")]
    InvalidNumber(String),

    /// Input length is outside the supported classes (7, 8, 11, 12)
    #[error("unknown number format: {0}")]
    UnknownNumberFormat(String),

    /// Valid mobile key with no index entry
    #[error("phone's data not found: {0}")]
    NotFound(String),

    /// Record at a matched offset is unusable
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Landline store failure
    #[error(transparent)]
    Backend(#[from] LookupBackendError),

    /// Global state used before initialization
    #[error("{0} not initialized")]
    NotInitialized(&'static str),

    /// Global state initialized twice
    #[error("{0} already initialized")]
    AlreadyInitialized(&'static str),

    /// Unusable row in a data file source
    #[error("invalid source at line {line}: {reason}")]
    InvalidSource { line: usize, reason: String },

    /// Rows cannot be serialized into a data file
    #[error("data file build error: {0}")]
    Build(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for phonedata operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for loading a data file.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The data file does not exist
    #[error("data file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The data file exists but could not be read
    #[error("failed to read data file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File too short to hold the header
    #[error("invalid header size: expected at least {expected}, got {actual}")]
    InvalidHeaderSize { expected: usize, actual: usize },

    /// Index region does not start inside the file body
    #[error("invalid first index offset {offset} for file of {len} bytes")]
    InvalidIndexOffset { offset: u32, len: usize },
}

/// Error type for record decoding.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DecodeError {
    /// Record has fewer than four delimited fields
    #[error("malformed record at offset {offset}: expected 4 fields, found {found}")]
    Malformed { offset: u32, found: usize },

    /// Record offset points past the end of the file
    #[error("record offset {0} out of bounds")]
    OffsetOutOfBounds(u32),

    /// No NUL terminator between the record offset and EOF
    #[error("record at offset {0} is not NUL-terminated")]
    MissingTerminator(u32),

    /// Field bytes are not valid UTF-8
    #[error("record at offset {0} is not valid UTF-8")]
    InvalidUtf8(u32),
}

/// Error type for the external landline store.
#[derive(Error, Debug)]
pub enum LookupBackendError {
    /// No landline store was supplied for a landline-shaped number
    #[error("no landline store configured")]
    Unavailable,

    /// The store failed while answering the query
    #[error("landline store query failed: {0}")]
    Query(String),
}
