//! Error types for properties-file I/O.

use thiserror::Error;

/// Errors that can occur while reading or writing a properties file.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// A `\u` escape was not followed by four hex digits, or encoded an
    /// unpaired surrogate.
    #[error("malformed \\uXXXX escape on line {line}")]
    MalformedEscape { line: usize },

    /// I/O error during file operations.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for loader operations.
pub type Result<T> = std::result::Result<T, LoaderError>;
