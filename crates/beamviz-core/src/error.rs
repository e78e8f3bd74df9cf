//! Errors in loading simulation output.

use std::path::PathBuf;

/// Error in loading frame data from a simulation output directory.
///
/// All of these are fatal to the operation that produced them;
/// nothing is retried and there is no degraded mode.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An expected indexed frame file (or captured frame image) is absent.
    #[error("missing frame file {}", .0.display())]
    MissingFrame(PathBuf),
    /// Frame data does not match the fixed schema
    /// (wrong row count, wrong column count, non-numeric field).
    ///
    /// Shape mismatches are hard failures rather than warnings
    /// so that schema drift between the producer and this consumer
    /// surfaces immediately instead of rendering corrupted visuals.
    #[error("malformed frame data: {0}")]
    MalformedInput(String),
    /// Error reading a file or manipulating a directory.
    #[error("filesystem error")]
    Filesystem(#[from] std::io::Error),
}
