//! Error types for indexed encoding.

use thiserror::Error;

/// Errors that can occur while encoding into a property store.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    /// A list item was absent. `index` is the key slot it would have taken,
    /// counting the tokens emitted by the items before it.
    #[error("invalid list element: {prefix}{index} has null value")]
    InvalidListElement { prefix: String, index: usize },
}

/// Convenience type alias for encoding operations.
pub type Result<T> = std::result::Result<T, EncodeError>;
