//! Indexed key encoding for the forked worker's properties.
//!
//! Lists and classpaths travel to the worker as sequential keys:
//! `prefix0`, `prefix1`, … with no padding and no gaps. The worker reads
//! them back by counting up from zero until the first missing index, so the
//! numbering here is a wire format.
//!
//! # Modules
//!
//! - [`error`] -- Error types for encoding
//! - [`classpath`] -- The ordered [`Classpath`] element list
//! - [`indexed`] -- [`add_list`], [`set_classpath`] and their inverses

pub mod classpath;
pub mod error;
pub mod indexed;

pub use classpath::Classpath;
pub use error::{EncodeError, Result};
pub use indexed::{add_list, clear_indexed, decode_indexed, indexed_key, set_classpath};
