//! [`ProcessEnvironment`]: the real process environment.

use std::env;

use crate::error::{EnvError, Result};
use crate::traits::GlobalEnvironment;

/// Writes properties into this process's environment variables.
///
/// Child processes spawned afterwards inherit every propagated property.
/// `std::env::set_var` panics on names or values it can't represent, so they
/// are rejected up front with an [`EnvError`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnvironment;

impl ProcessEnvironment {
    pub fn new() -> Self {
        Self
    }
}

fn validate(key: &str, value: &str) -> Result<()> {
    if key.is_empty() {
        return Err(EnvError::InvalidKey {
            key: key.to_string(),
            reason: "empty",
        });
    }
    if key.contains('=') {
        return Err(EnvError::InvalidKey {
            key: key.to_string(),
            reason: "contains '='",
        });
    }
    if key.contains('\0') {
        return Err(EnvError::InvalidKey {
            key: key.to_string(),
            reason: "contains NUL",
        });
    }
    if value.contains('\0') {
        return Err(EnvError::InvalidValue {
            key: key.to_string(),
            reason: "contains NUL",
        });
    }
    Ok(())
}

impl GlobalEnvironment for ProcessEnvironment {
    fn set_property(&mut self, key: &str, value: &str) -> Result<()> {
        validate(key, value)?;
        env::set_var(key, value);
        Ok(())
    }

    fn property(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, PoisonError};

    /// Held by every test that reads or writes the real environment.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn writes_and_reads_process_environment() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let mut env = ProcessEnvironment::new();
        env.set_property("forkprops.test.process.write", "on").unwrap();
        assert_eq!(
            env.property("forkprops.test.process.write").as_deref(),
            Some("on")
        );
    }

    #[test]
    fn rejects_unrepresentable_keys() {
        assert!(matches!(
            validate("", "x"),
            Err(EnvError::InvalidKey { reason: "empty", .. })
        ));
        assert!(matches!(
            validate("a=b", "x"),
            Err(EnvError::InvalidKey { reason: "contains '='", .. })
        ));
        assert!(matches!(
            validate("a\0b", "x"),
            Err(EnvError::InvalidKey { reason: "contains NUL", .. })
        ));
        assert!(validate("forkprops.ok", "").is_ok());
    }

    #[test]
    fn rejects_nul_in_value() {
        assert!(matches!(
            validate("forkprops.test.process.nul", "a\0b"),
            Err(EnvError::InvalidValue { .. })
        ));
    }

    #[test]
    fn rejected_write_leaves_environment_unchanged() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let mut env = ProcessEnvironment::new();
        let err = env
            .set_property("forkprops.test.process.nul", "a\0b")
            .unwrap_err();
        assert!(matches!(err, EnvError::InvalidValue { .. }));
        assert!(env.property("forkprops.test.process.nul").is_none());
    }
}
