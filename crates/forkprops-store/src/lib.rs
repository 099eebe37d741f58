//! Insertion-ordered property store for forked worker configuration.
//!
//! A [`PropertyStore`] holds string properties and remembers the order in
//! which each key was first inserted. Overwriting a key changes its value but
//! never its position, so everything serialized from a store (indexed list
//! keys, properties files, propagated environment) comes out in a
//! reproducible order.
//!
//! # Modules
//!
//! - [`store`] -- The [`PropertyStore`] itself
//! - [`source`] -- The [`KeyValueSource`] capability for copying entries
//! - [`protected`] -- [`ProtectedKeySet`], keys that must not become process globals

pub mod protected;
pub mod source;
pub mod store;

pub use protected::{ProtectedKeySet, PROTECTED_KEYS};
pub use source::KeyValueSource;
pub use store::PropertyStore;
