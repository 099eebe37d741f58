//! Encoding lists and classpaths as `prefix0`, `prefix1`, … keys.
//!
//! Encoding only ever adds keys. Re-encoding a shorter list under the same
//! prefix leaves the tail of the previous encoding in place; callers that need
//! replacement semantics run [`clear_indexed`] first.

use std::fmt::Display;

use forkprops_store::PropertyStore;
use tracing::debug;

use crate::classpath::Classpath;
use crate::error::{EncodeError, Result};

/// The key for position `index` under `prefix`.
pub fn indexed_key(prefix: &str, index: usize) -> String {
    format!("{prefix}{index}")
}

/// Encode `items` under `prefix`, splitting each item's string form on commas.
///
/// Every non-empty comma-separated token becomes its own key, so
/// `["a,b", "c"]` yields `p0=a`, `p1=b`, `p2=c`. An absent item fails the whole
/// call before anything is written; the error names the key slot the item
/// would have started at (`["a,b", None]` reports `p2`). Returns the number of
/// keys written.
pub fn add_list<I, T>(store: &PropertyStore, items: I, prefix: &str) -> Result<usize>
where
    I: IntoIterator<Item = Option<T>>,
    T: Display,
{
    let mut tokens: Vec<String> = Vec::new();
    let mut count = 0usize;
    for item in items {
        count += 1;
        let Some(item) = item else {
            return Err(EncodeError::InvalidListElement {
                prefix: prefix.to_string(),
                index: tokens.len(),
            });
        };
        tokens.extend(
            item.to_string()
                .split(',')
                .filter(|token| !token.is_empty())
                .map(str::to_string),
        );
    }

    for (index, token) in tokens.iter().enumerate() {
        store.put(indexed_key(prefix, index), token.as_str());
    }

    debug!(prefix, items = count, keys = tokens.len(), "encoded list");
    Ok(tokens.len())
}

/// Encode each classpath element under `prefix`, in order.
///
/// Elements are written verbatim: no comma splitting, and empty elements
/// still take an index. Returns the number of keys written.
pub fn set_classpath(store: &PropertyStore, prefix: &str, classpath: &Classpath) -> usize {
    for (index, element) in classpath.iter().enumerate() {
        store.put(indexed_key(prefix, index), element.as_str());
    }
    debug!(prefix, keys = classpath.len(), "encoded classpath");
    classpath.len()
}

/// Read `prefix0`, `prefix1`, … back out of `store`, stopping at the first gap.
pub fn decode_indexed(store: &PropertyStore, prefix: &str) -> Vec<String> {
    (0..)
        .map_while(|index| store.get(&indexed_key(prefix, index)))
        .collect()
}

/// Remove `prefix0`, `prefix1`, … from `store` up to the first gap.
///
/// Returns the number of keys removed.
pub fn clear_indexed(store: &PropertyStore, prefix: &str) -> usize {
    (0..)
        .take_while(|&index| store.remove(&indexed_key(prefix, index)).is_some())
        .count()
}
