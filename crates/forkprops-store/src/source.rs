//! The [`KeyValueSource`] capability.
//!
//! Anything that can hand its entries to a [`PropertyStore`] is a source:
//! other stores, plain maps, pair lists, parsed properties files. Copying
//! uses `put`, so it follows the store's ordering rule: keys already present
//! keep their position and take the new value.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use crate::store::PropertyStore;

/// A source of string properties that can copy itself into a store.
pub trait KeyValueSource {
    /// Copy every entry into `target`, in this source's iteration order.
    fn copy_to(&self, target: &PropertyStore);
}

impl KeyValueSource for PropertyStore {
    fn copy_to(&self, target: &PropertyStore) {
        // Snapshot first so copying a store into itself cannot deadlock.
        for (key, value) in self.entries() {
            target.put(key, value);
        }
    }
}

impl<K, V> KeyValueSource for [(K, V)]
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn copy_to(&self, target: &PropertyStore) {
        for (key, value) in self {
            target.put(key.as_ref(), value.as_ref());
        }
    }
}

impl<K, V> KeyValueSource for Vec<(K, V)>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn copy_to(&self, target: &PropertyStore) {
        self.as_slice().copy_to(target);
    }
}

impl<K, V, S> KeyValueSource for HashMap<K, V, S>
where
    K: AsRef<str>,
    V: AsRef<str>,
    S: BuildHasher,
{
    fn copy_to(&self, target: &PropertyStore) {
        for (key, value) in self {
            target.put(key.as_ref(), value.as_ref());
        }
    }
}

impl<K, V> KeyValueSource for BTreeMap<K, V>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn copy_to(&self, target: &PropertyStore) {
        for (key, value) in self {
            target.put(key.as_ref(), value.as_ref());
        }
    }
}
