//! Layered merge of property sources.
//!
//! The effective properties for a forked worker are assembled from four
//! layers, lowest precedence first:
//!
//! 1. ambient system properties,
//! 2. explicitly configured properties,
//! 3. system-property variables (absent values become `""`),
//! 4. user-supplied overrides.
//!
//! Later layers overwrite values. They never reorder keys that an earlier layer
//! introduced, so a key's position is where it was first seen and its value is
//! the last one written.

pub mod layers;

pub use layers::{calculate_effective_properties, copy_variables, Layer, PropertyLayers};
