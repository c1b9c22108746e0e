//! # echo-convert
//!
//! Bidirectional conversion between numeric arrays and AtomSpace number
//! nodes.
//!
//! [`AtomConverter`] is a stateless utility bound to one store handle:
//!
//! - [`array_to_atoms`](AtomConverter::array_to_atoms) materializes every
//!   element of a matrix as a node named `"{prefix}_{i}"` in flattening
//!   order
//! - [`atoms_to_array`](AtomConverter::atoms_to_array) rebuilds a matrix
//!   from a node sequence, optionally reshaped
//!
//! ## Known quirk
//!
//! The reverse direction parses each node's *name* as a float instead of
//! reading its value field, so the converter's own output does not round
//! trip (names like `value_0` are not float literals). Nodes with numeric
//! names — such as the ones the reservoir export creates — do round trip.
//! This behavior is kept as-is for compatibility with existing callers;
//! see DESIGN.md before depending on it.
//!
//! ## Architecture Rules
//!
//! - Depends on `echo-core` and `echo-atoms`; no `async` code.
//! - Node creations are independent store calls, not an atomic batch.

mod converter;

pub use converter::{AtomConverter, DEFAULT_PREFIX};

pub use echo_atoms;
pub use echo_core;
