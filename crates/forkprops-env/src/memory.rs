//! In-memory environment for tests.

use std::collections::HashMap;

use crate::error::Result;
use crate::traits::GlobalEnvironment;

/// A [`GlobalEnvironment`] that keeps values in a `HashMap` and records
/// every write in order.
#[derive(Debug, Default, Clone)]
pub struct InMemoryEnvironment {
    values: HashMap<String, String>,
    writes: Vec<(String, String)>,
}

impl InMemoryEnvironment {
    /// Create a new empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `(key, value)` written, in write order, including overwrites.
    pub fn writes(&self) -> &[(String, String)] {
        &self.writes
    }

    /// Keys in write order.
    pub fn written_keys(&self) -> Vec<&str> {
        self.writes.iter().map(|(key, _)| key.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl GlobalEnvironment for InMemoryEnvironment {
    fn set_property(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.writes.push((key.to_string(), value.to_string()));
        Ok(())
    }

    fn property(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}
