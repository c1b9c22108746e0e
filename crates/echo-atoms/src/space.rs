//! The store trait and the shared-handle alias.

use std::sync::{Arc, RwLock};

use crate::node::NumberNode;

/// The slice of AtomSpace behavior the adapter depends on.
///
/// Exactly three capabilities: create-or-fetch a numeric node by name and
/// value, read a node back by name, and test membership. Nothing else
/// about the store — indexing, queries, persistence formats — leaks into
/// the adapter.
///
/// # Example
///
/// ```
/// use echo_atoms::{AtomSpace, InMemoryAtomSpace};
///
/// let mut space = InMemoryAtomSpace::new();
/// let node = space.add_number_node("value_0", 1.0);
/// assert!(space.contains(&node));
/// assert_eq!(space.get("value_0"), Some(node));
/// ```
pub trait AtomSpace {
    /// Creates a numeric node, or refreshes it if the name already
    /// exists (create-or-fetch). Returns the handle either way.
    fn add_number_node(&mut self, name: &str, value: f64) -> NumberNode;

    /// Returns a handle to the node with the given name, if present.
    fn get(&self, name: &str) -> Option<NumberNode>;

    /// Returns `true` if a node with this handle's name is in the store.
    fn contains(&self, node: &NumberNode) -> bool;
}

/// A shared, non-exclusive handle to an AtomSpace.
///
/// The reservoir node and the converter each hold a clone of the `Arc`;
/// the store itself is owned by whoever created it (or by the default
/// fallback the reservoir constructor provides).
pub type Shared<S> = Arc<RwLock<S>>;

/// Wraps a store in a [`Shared`] handle.
///
/// # Example
///
/// ```
/// use echo_atoms::{shared, AtomSpace, InMemoryAtomSpace};
///
/// let space = shared(InMemoryAtomSpace::new());
/// let handle = space.clone();
/// handle.write().unwrap().add_number_node("value_0", 1.0);
/// assert_eq!(space.read().unwrap().len(), 1);
/// ```
pub fn shared<S: AtomSpace>(space: S) -> Shared<S> {
    Arc::new(RwLock::new(space))
}
