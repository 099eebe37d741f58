//! Properties-file loading and writing.
//!
//! The worker's configuration is exchanged as a flat `key=value` properties
//! file. [`load_properties`] reads one into a [`PropertyStore`] in file order,
//! and [`store_properties`] writes a store back out in insertion order with
//! the escaping the reader expects.
//!
//! [`PropertyStore`]: forkprops_store::PropertyStore

pub mod error;
pub mod load;
pub mod parser;
pub mod writer;

pub use error::{LoaderError, Result};
pub use load::{load_from_reader, load_properties, load_source};
pub use parser::{parse_properties, ParsedProperties};
pub use writer::{store_properties, write_properties_file};
