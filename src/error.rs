//! Error types for T64 decoding and extraction.

use thiserror::Error;

/// Everything that can go wrong while reading, decoding or extracting a tape image.
///
/// `TruncatedArchive` is fatal to a whole archive. `InvalidRecord` and
/// `SinkFailure` only concern a single directory record, so callers keep
/// going with the next one.
#[derive(Debug, Error)]
pub enum T64Error {
    /// The input path, URL or container entry does not exist.
    #[error("source not found: {0}")]
    SourceNotFound(String),

    /// The buffer is too short for the header or the declared directory.
    #[error("truncated archive: need {needed} bytes, have {actual}")]
    TruncatedArchive { needed: usize, actual: usize },

    /// A directory record has an impossible address range or points past the archive end.
    #[error("invalid record #{index}: {reason}")]
    InvalidRecord { index: usize, reason: String },

    /// The output directory or file could not be written.
    #[error("could not write {identifier}: {source}")]
    SinkFailure {
        identifier: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result alias for the decoding API.
pub type Result<T> = std::result::Result<T, T64Error>;
