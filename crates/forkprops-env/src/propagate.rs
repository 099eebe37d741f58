//! Copying a store into a [`GlobalEnvironment`].

use forkprops_store::{PropertyStore, ProtectedKeySet};
use tracing::{debug, warn};

use crate::error::Result;
use crate::traits::GlobalEnvironment;

/// Write every entry of `store` into `env`, in insertion order.
///
/// Exactly the store's keys are written, and nothing is filtered. Protected
/// keys are written too, with a warning; check
/// [`PropertyStore::protected_keys`] first to keep them out. Stops at the
/// first write `env` rejects, leaving earlier writes in place. Returns the
/// number of properties written.
pub fn propagate(store: &PropertyStore, env: &mut dyn GlobalEnvironment) -> Result<usize> {
    let protected = ProtectedKeySet::standard();
    let entries = store.entries();
    for (key, value) in &entries {
        if protected.contains(key) {
            warn!(key = %key, "propagating protected key as a process global");
        }
        env.set_property(key, value)?;
    }
    debug!(count = entries.len(), "propagated properties");
    Ok(entries.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EnvError;
    use crate::memory::InMemoryEnvironment;

    struct RejectingEnvironment {
        inner: InMemoryEnvironment,
        reject: &'static str,
    }

    impl GlobalEnvironment for RejectingEnvironment {
        fn set_property(&mut self, key: &str, value: &str) -> Result<()> {
            if key == self.reject {
                return Err(EnvError::InvalidKey {
                    key: key.to_string(),
                    reason: "rejected",
                });
            }
            self.inner.set_property(key, value)
        }

        fn property(&self, key: &str) -> Option<String> {
            self.inner.property(key)
        }
    }

    #[test]
    fn writes_in_insertion_order() {
        let store: PropertyStore = [("zeta", "1"), ("alpha", "2"), ("mid", "3")]
            .into_iter()
            .collect();
        store.put("zeta", "4");

        let mut env = InMemoryEnvironment::new();
        let written = propagate(&store, &mut env).unwrap();

        assert_eq!(written, 3);
        assert_eq!(
            env.writes(),
            [
                ("zeta".to_string(), "4".to_string()),
                ("alpha".to_string(), "2".to_string()),
                ("mid".to_string(), "3".to_string()),
            ]
        );
    }

    #[test]
    fn protected_keys_are_not_filtered() {
        let store: PropertyStore = [("file.encoding", "UTF-8"), ("user.name", "ci")]
            .into_iter()
            .collect();
        assert_eq!(store.protected_keys().len(), 1);

        let mut env = InMemoryEnvironment::new();
        propagate(&store, &mut env).unwrap();

        assert_eq!(env.property("file.encoding").as_deref(), Some("UTF-8"));
        assert_eq!(env.written_keys(), vec!["file.encoding", "user.name"]);
    }

    #[test]
    fn caller_can_drop_protected_keys_first() {
        let store: PropertyStore = [("line.separator", "\n"), ("a", "1")].into_iter().collect();
        for key in store.protected_keys() {
            store.remove(&key);
        }

        let mut env = InMemoryEnvironment::new();
        propagate(&store, &mut env).unwrap();
        assert_eq!(env.written_keys(), vec!["a"]);
    }

    #[test]
    fn empty_store_writes_nothing() {
        let mut env = InMemoryEnvironment::new();
        assert_eq!(propagate(&PropertyStore::new(), &mut env).unwrap(), 0);
        assert!(env.is_empty());
    }

    #[test]
    fn stops_at_first_rejected_write() {
        let store: PropertyStore = [("a", "1"), ("bad", "2"), ("c", "3")].into_iter().collect();
        let mut env = RejectingEnvironment {
            inner: InMemoryEnvironment::new(),
            reject: "bad",
        };

        let err = propagate(&store, &mut env).unwrap_err();
        assert!(matches!(err, EnvError::InvalidKey { ref key, .. } if key == "bad"));
        assert_eq!(env.inner.written_keys(), vec!["a"]);
    }
}
