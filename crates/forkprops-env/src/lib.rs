//! Propagation of effective properties into process-wide state.
//!
//! The launch machinery of a forked worker reads its configuration from a
//! shared, process-wide namespace. This crate models that namespace as the
//! [`GlobalEnvironment`] trait so the write target can be swapped out:
//! [`ProcessEnvironment`] writes the real process environment, and
//! [`InMemoryEnvironment`] records writes for tests.
//!
//! # Protected keys
//!
//! [`propagate`] does **not** filter out protected keys. Use
//! [`PropertyStore::protected_keys`](forkprops_store::PropertyStore::protected_keys)
//! before propagating and decide what to do with them. A protected key that
//! reaches `propagate` is written like any other, with a warning logged.
//!
//! # Modules
//!
//! - [`error`] -- Error types for propagation
//! - [`traits`] -- The [`GlobalEnvironment`] trait
//! - [`process`] -- [`ProcessEnvironment`], backed by `std::env`
//! - [`memory`] -- [`InMemoryEnvironment`] for tests
//! - [`propagate`](mod@propagate) -- [`propagate()`](fn@propagate) itself

pub mod error;
pub mod memory;
pub mod process;
pub mod propagate;
pub mod traits;

pub use error::{EnvError, Result};
pub use memory::InMemoryEnvironment;
pub use process::ProcessEnvironment;
pub use propagate::propagate;
pub use traits::GlobalEnvironment;
