//! Keys that must never be pushed into process-wide state.
//!
//! The worker runtime reads these from its own launch parameters; setting them
//! as ordinary globals has no effect at best. Membership is only ever
//! queried. Nothing in the store or its propagation enforces it.

use std::collections::BTreeSet;

use crate::store::PropertyStore;

/// The reserved key names.
pub const PROTECTED_KEYS: [&str; 4] = [
    "java.library.path",
    "file.encoding",
    "jdk.map.althashing.threshold",
    "line.separator",
];

/// An immutable set of reserved property keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProtectedKeySet {
    keys: &'static [&'static str],
}

impl ProtectedKeySet {
    /// The standard reserved set, [`PROTECTED_KEYS`].
    pub const fn standard() -> Self {
        Self {
            keys: &PROTECTED_KEYS,
        }
    }

    /// Returns `true` if `key` is reserved.
    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(&key)
    }

    /// Iterate the reserved names.
    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.keys.iter().copied()
    }

    /// The reserved keys present in `store`.
    pub fn find_in(&self, store: &PropertyStore) -> BTreeSet<String> {
        store
            .ordered_keys()
            .into_iter()
            .filter(|key| self.contains(key))
            .collect()
    }
}

impl Default for ProtectedKeySet {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_set_contains_reserved_keys() {
        let set = ProtectedKeySet::standard();
        for key in PROTECTED_KEYS {
            assert!(set.contains(key));
        }
        assert!(!set.contains("user.dir"));
        assert_eq!(set.iter().count(), 4);
    }

    #[test]
    fn finds_only_protected_keys() {
        let store: PropertyStore = [("java.library.path", "/opt/lib"), ("user.language", "en")]
            .into_iter()
            .collect();

        let found = store.protected_keys();
        assert_eq!(found, BTreeSet::from(["java.library.path".to_string()]));
    }

    #[test]
    fn result_is_independent_of_insertion_order() {
        let forward: PropertyStore =
            [("file.encoding", "UTF-8"), ("a", "1")].into_iter().collect();
        let backward: PropertyStore =
            [("a", "1"), ("file.encoding", "UTF-8")].into_iter().collect();
        assert_eq!(forward.protected_keys(), backward.protected_keys());
    }

    #[test]
    fn empty_store_has_no_protected_keys() {
        assert!(PropertyStore::new().protected_keys().is_empty());
    }
}
