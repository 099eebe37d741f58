//! The [`GlobalEnvironment`] trait.

use crate::error::Result;

/// A process-wide key-value namespace that properties are propagated into.
///
/// Implementations provide no ordering or synchronization guarantees of
/// their own. Concurrent propagation into the same namespace must be
/// coordinated by the caller.
pub trait GlobalEnvironment {
    /// Set `key` to `value`, replacing any existing value.
    fn set_property(&mut self, key: &str, value: &str) -> Result<()>;

    /// Read the current value of `key`.
    fn property(&self, key: &str) -> Option<String>;
}
