//! Loading properties into a [`PropertyStore`].

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use forkprops_store::{KeyValueSource, PropertyStore};
use tracing::debug;

use crate::error::Result;
use crate::parser::parse_properties;

/// Copy an already-parsed source into a new store.
pub fn load_source(source: &dyn KeyValueSource) -> PropertyStore {
    PropertyStore::from_source(source)
}

/// Read and parse properties text from `reader`.
pub fn load_from_reader<R: Read>(mut reader: R) -> Result<PropertyStore> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    let parsed = parse_properties(&text)?;
    Ok(PropertyStore::from_source(&parsed))
}

/// Load the properties file at `path`.
///
/// No path, or a path with no file behind it, yields an empty store. Any
/// other I/O failure is returned. The file is closed on every return path;
/// a failure while closing is ignored.
pub fn load_properties(path: Option<&Path>) -> Result<PropertyStore> {
    let Some(path) = path else {
        return Ok(PropertyStore::new());
    };

    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "properties file not found, using empty store");
            return Ok(PropertyStore::new());
        }
        Err(err) => return Err(err.into()),
    };

    let store = load_from_reader(BufReader::new(file))?;
    debug!(path = %path.display(), count = store.len(), "loaded properties file");
    Ok(store)
}
