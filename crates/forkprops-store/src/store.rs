//! The insertion-ordered [`PropertyStore`].
//!
//! A store is the composite of a `HashMap` holding values and a `Vec` of
//! keys in first-insertion order. All mutation goes through the order mutex,
//! which is held for the whole of `put`, `remove` and `clear`, so the two
//! structures always name the same set of keys once a mutation returns.
//!
//! Value lookups (`get`, `contains_key`, `len`) only take the value map's read
//! lock. They may observe a value written by a `put` that has not yet
//! published its key into the order sequence. No caller needs read-after-write
//! visibility across threads, and ordered reads (`ordered_keys`, `entries`)
//! always go through the order mutex.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::protected::ProtectedKeySet;
use crate::source::KeyValueSource;

/// String properties that remember first-insertion order.
///
/// Re-inserting an existing key updates its value in place; it never moves.
/// Every method takes `&self`, so a store can be shared behind an `Arc` and
/// mutated from several threads.
pub struct PropertyStore {
    /// Keys in first-insertion order. Doubles as the store lock.
    order: Mutex<Vec<String>>,
    values: RwLock<HashMap<String, String>>,
}

impl PropertyStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            order: Mutex::new(Vec::new()),
            values: RwLock::new(HashMap::new()),
        }
    }

    /// Create a store holding a copy of every entry in `source`.
    ///
    /// Keys are ordered by the source's own iteration order, which is only
    /// meaningful when the source itself preserves order.
    pub fn from_source<S: KeyValueSource + ?Sized>(source: &S) -> Self {
        let store = Self::new();
        source.copy_to(&store);
        store
    }

    /// Insert or update a property, returning the previous value.
    ///
    /// A new key is appended to the order sequence; an existing key keeps
    /// its position.
    pub fn put(&self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();

        let mut order = self.lock_order();
        let mut values = self.write_values();
        match values.get_mut(&key) {
            Some(slot) => Some(std::mem::replace(slot, value)),
            None => {
                values.insert(key.clone(), value);
                order.push(key);
                None
            }
        }
    }

    /// Remove a property and its slot in the order sequence.
    pub fn remove(&self, key: &str) -> Option<String> {
        let mut order = self.lock_order();
        let previous = self.write_values().remove(key);
        if previous.is_some() {
            if let Some(position) = order.iter().position(|k| k == key) {
                order.remove(position);
            }
        }
        previous
    }

    /// Remove every property.
    pub fn clear(&self) {
        let mut order = self.lock_order();
        self.write_values().clear();
        order.clear();
    }

    /// Keys in first-insertion order, as of the time of the call.
    pub fn ordered_keys(&self) -> Vec<String> {
        self.lock_order().clone()
    }

    /// `(key, value)` pairs in first-insertion order, as of the time of the call.
    pub fn entries(&self) -> Vec<(String, String)> {
        let order = self.lock_order();
        let values = self.read_values();
        order
            .iter()
            .filter_map(|key| values.get(key).map(|value| (key.clone(), value.clone())))
            .collect()
    }

    /// Look up a property value.
    pub fn get(&self, key: &str) -> Option<String> {
        self.read_values().get(key).cloned()
    }

    /// Returns `true` if the store holds `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.read_values().contains_key(key)
    }

    /// Number of properties in the store.
    pub fn len(&self) -> usize {
        self.read_values().len()
    }

    /// Returns `true` if the store holds no properties.
    pub fn is_empty(&self) -> bool {
        self.read_values().is_empty()
    }

    /// Copy every entry of `source` into this store. An absent source is a no-op.
    pub fn copy_from(&self, source: Option<&dyn KeyValueSource>) {
        if let Some(source) = source {
            source.copy_to(self);
        }
    }

    /// Store the display form of a path. An absent path is a no-op.
    pub fn set_path(&self, key: impl Into<String>, path: Option<&Path>) {
        if let Some(path) = path {
            self.put(key, path.display().to_string());
        }
    }

    /// Store `"true"` or `"false"`. An absent flag is a no-op.
    pub fn set_bool(&self, key: impl Into<String>, flag: Option<bool>) {
        if let Some(flag) = flag {
            self.put(key, flag.to_string());
        }
    }

    /// Store a value only when one is present.
    pub fn set_nullable(&self, key: impl Into<String>, value: Option<&str>) {
        if let Some(value) = value {
            self.put(key, value);
        }
    }

    /// The keys of this store that must not be set as process globals.
    ///
    /// Nothing else in this crate consults the result; callers that propagate
    /// a store are expected to check it first.
    pub fn protected_keys(&self) -> BTreeSet<String> {
        ProtectedKeySet::standard().find_in(self)
    }

    fn lock_order(&self) -> MutexGuard<'_, Vec<String>> {
        self.order.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_values(&self) -> RwLockReadGuard<'_, HashMap<String, String>> {
        self.values.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_values(&self) -> RwLockWriteGuard<'_, HashMap<String, String>> {
        self.values.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for PropertyStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for PropertyStore {
    fn clone(&self) -> Self {
        Self::from_source(self)
    }
}

impl PartialEq for PropertyStore {
    /// Two stores are equal when they hold the same entries in the same order.
    fn eq(&self, other: &Self) -> bool {
        self.entries() == other.entries()
    }
}

impl Eq for PropertyStore {}

impl fmt::Debug for PropertyStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries()).finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PropertyStore {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let store = Self::new();
        for (key, value) in iter {
            store.put(key, value);
        }
        store
    }
}

impl Serialize for PropertyStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entries = self.entries();
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (key, value) in &entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;
    use std::path::PathBuf;
    use std::sync::Arc;

    fn assert_consistent(store: &PropertyStore) {
        let order = store.order.lock().unwrap();
        let values = store.values.read().unwrap();
        let ordered: HashSet<&String> = order.iter().collect();
        assert_eq!(ordered.len(), order.len(), "order sequence has duplicates");
        let mapped: HashSet<&String> = values.keys().collect();
        assert_eq!(ordered, mapped);
    }

    #[test]
    fn new_store_is_empty() {
        let store = PropertyStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert!(store.ordered_keys().is_empty());
    }

    #[test]
    fn put_returns_previous_value() {
        let store = PropertyStore::new();
        assert_eq!(store.put("a", "1"), None);
        assert_eq!(store.put("a", "2"), Some("1".to_string()));
        assert_eq!(store.get("a").as_deref(), Some("2"));
    }

    #[test]
    fn overwrite_keeps_first_position() {
        let store = PropertyStore::new();
        store.put("b", "1");
        store.put("a", "1");
        store.put("c", "1");
        store.put("b", "2");

        assert_eq!(store.ordered_keys(), vec!["b", "a", "c"]);
        assert_eq!(store.get("b").as_deref(), Some("2"));
    }

    #[test]
    fn remove_drops_order_slot() {
        let store: PropertyStore = [("a", "1"), ("b", "2"), ("c", "3")].into_iter().collect();

        assert_eq!(store.remove("b"), Some("2".to_string()));
        assert_eq!(store.remove("b"), None);
        assert_eq!(store.ordered_keys(), vec!["a", "c"]);
        assert!(!store.contains_key("b"));
        assert_consistent(&store);
    }

    #[test]
    fn reinsert_after_remove_moves_to_end() {
        let store: PropertyStore = [("a", "1"), ("b", "2")].into_iter().collect();
        store.remove("a");
        store.put("a", "3");
        assert_eq!(store.ordered_keys(), vec!["b", "a"]);
    }

    #[test]
    fn clear_empties_both_structures() {
        let store: PropertyStore = [("a", "1"), ("b", "2")].into_iter().collect();
        store.clear();
        assert!(store.is_empty());
        assert!(store.ordered_keys().is_empty());
        assert_consistent(&store);
    }

    #[test]
    fn ordered_keys_reflect_current_state() {
        let store = PropertyStore::new();
        store.put("a", "1");
        let first = store.ordered_keys();
        store.put("b", "2");
        assert_eq!(first, vec!["a"]);
        assert_eq!(store.ordered_keys(), vec!["a", "b"]);
    }

    #[test]
    fn clone_preserves_order() {
        let store: PropertyStore = [("z", "1"), ("a", "2"), ("m", "3")].into_iter().collect();
        let copy = store.clone();
        assert_eq!(copy.entries(), store.entries());
        assert_eq!(copy, store);

        copy.put("q", "4");
        assert!(!store.contains_key("q"));
    }

    #[test]
    fn copy_from_absent_source_is_noop() {
        let store = PropertyStore::new();
        store.copy_from(None);
        assert!(store.is_empty());
    }

    #[test]
    fn typed_setters_skip_absent_values() {
        let store = PropertyStore::new();
        let path = PathBuf::from("/tmp/reports");
        store.set_path("reportsDirectory", Some(path.as_path()));
        store.set_path("tempDir", None);
        store.set_bool("trimStackTrace", Some(true));
        store.set_bool("useFile", None);
        store.set_nullable("encoding", Some("UTF-8"));
        store.set_nullable("skip", None);

        assert_eq!(
            store.entries(),
            vec![
                ("reportsDirectory".to_string(), "/tmp/reports".to_string()),
                ("trimStackTrace".to_string(), "true".to_string()),
                ("encoding".to_string(), "UTF-8".to_string()),
            ]
        );
    }

    #[test]
    fn serializes_as_ordered_map() {
        let store: PropertyStore = [("zeta", "1"), ("alpha", "2")].into_iter().collect();
        let json = serde_json::to_string(&store).unwrap();
        assert_eq!(json, r#"{"zeta":"1","alpha":"2"}"#);
    }

    #[test]
    fn debug_lists_entries_in_order() {
        let store: PropertyStore = [("b", "1"), ("a", "2")].into_iter().collect();
        assert_eq!(format!("{store:?}"), r#"{"b": "1", "a": "2"}"#);
    }

    #[test]
    fn concurrent_puts_keep_invariant() {
        let store = Arc::new(PropertyStore::new());

        std::thread::scope(|scope| {
            for thread in 0..8 {
                let store = Arc::clone(&store);
                scope.spawn(move || {
                    for i in 0..200u32 {
                        // Half the keys collide across threads.
                        let key = if i % 2 == 0 {
                            format!("shared.{i}")
                        } else {
                            format!("t{thread}.{i}")
                        };
                        store.put(key, thread.to_string());
                        if i % 7 == 0 {
                            store.remove(&format!("shared.{}", i.saturating_sub(2)));
                        }
                    }
                });
            }
        });

        assert_consistent(&store);
        assert_eq!(store.ordered_keys().len(), store.len());
    }

    proptest! {
        #[test]
        fn order_is_first_seen_and_value_is_last_written(
            writes in proptest::collection::vec(("[a-e]", "[0-9]{1,3}"), 0..40)
        ) {
            let store = PropertyStore::new();
            for (key, value) in &writes {
                store.put(key.as_str(), value.as_str());
            }

            let mut first_seen: Vec<String> = Vec::new();
            let mut last_value: HashMap<String, String> = HashMap::new();
            for (key, value) in &writes {
                if !first_seen.contains(key) {
                    first_seen.push(key.clone());
                }
                last_value.insert(key.clone(), value.clone());
            }

            prop_assert_eq!(store.ordered_keys(), first_seen);
            for (key, value) in &last_value {
                prop_assert_eq!(store.get(key), Some(value.clone()));
            }
        }
    }
}
