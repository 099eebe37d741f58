//! Error types for propagation.

use thiserror::Error;

/// Errors that can occur while writing to a global environment.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvError {
    /// The key cannot be represented in the target namespace.
    #[error("invalid property key {key:?}: {reason}")]
    InvalidKey { key: String, reason: &'static str },

    /// The value cannot be represented in the target namespace.
    #[error("invalid value for property {key:?}: {reason}")]
    InvalidValue { key: String, reason: &'static str },
}

/// Convenience type alias for propagation.
pub type Result<T> = std::result::Result<T, EnvError>;
