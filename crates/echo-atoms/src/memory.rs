//! In-memory reference AtomSpace.
//!
//! The default fallback store: a name-keyed map of number nodes with JSON
//! persistence. Production callers inject a real store behind the
//! [`AtomSpace`] trait instead; this one exists so the adapter is usable
//! and testable without a graph-store deployment.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use echo_core::EchoError;
use serde::{Deserialize, Serialize};

use crate::node::NumberNode;
use crate::space::AtomSpace;

/// In-memory AtomSpace backed by a name-keyed map.
///
/// Iteration order is the lexicographic name order (`BTreeMap`), which
/// keeps saved JSON and test output deterministic.
///
/// # Example
///
/// ```
/// use echo_atoms::{AtomSpace, InMemoryAtomSpace};
///
/// let mut space = InMemoryAtomSpace::new();
/// assert!(space.is_empty());
///
/// space.add_number_node("value_0", 1.0);
/// space.add_number_node("value_1", 2.0);
/// assert_eq!(space.len(), 2);
///
/// // Re-adding an existing name refreshes the value, not the count.
/// space.add_number_node("value_0", 9.0);
/// assert_eq!(space.len(), 2);
/// assert_eq!(space.get("value_0").unwrap().value(), 9.0);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryAtomSpace {
    nodes: BTreeMap<String, f64>,
}

impl InMemoryAtomSpace {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of nodes in the store.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the store holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns all node names in lexicographic order.
    pub fn node_names(&self) -> Vec<&str> {
        self.nodes.keys().map(String::as_str).collect()
    }

    /// Saves the store to a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`EchoError::Storage`] if serialization or I/O fails.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use echo_atoms::InMemoryAtomSpace;
    /// use std::path::Path;
    ///
    /// let space = InMemoryAtomSpace::new();
    /// space.save(Path::new("atomspace.json")).unwrap();
    /// ```
    pub fn save(&self, path: &Path) -> Result<(), EchoError> {
        let json = serde_json::to_string_pretty(self).map_err(|e| EchoError::Storage {
            message: format!("serialize atomspace: {e}"),
        })?;
        fs::write(path, json).map_err(|e| EchoError::Storage {
            message: format!("write {}: {e}", path.display()),
        })
    }

    /// Loads a store from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`EchoError::Storage`] if I/O or deserialization fails.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use echo_atoms::InMemoryAtomSpace;
    /// use std::path::Path;
    ///
    /// let space = InMemoryAtomSpace::load(Path::new("atomspace.json")).unwrap();
    /// ```
    pub fn load(path: &Path) -> Result<Self, EchoError> {
        let json = fs::read_to_string(path).map_err(|e| EchoError::Storage {
            message: format!("read {}: {e}", path.display()),
        })?;
        serde_json::from_str(&json).map_err(|e| EchoError::Storage {
            message: format!("deserialize atomspace: {e}"),
        })
    }
}

impl AtomSpace for InMemoryAtomSpace {
    fn add_number_node(&mut self, name: &str, value: f64) -> NumberNode {
        tracing::debug!(name, value, "add number node");
        self.nodes.insert(name.to_string(), value);
        NumberNode::new(name, value)
    }

    fn get(&self, name: &str) -> Option<NumberNode> {
        self.nodes
            .get(name)
            .map(|&value| NumberNode::new(name, value))
    }

    fn contains(&self, node: &NumberNode) -> bool {
        self.nodes.contains_key(node.name())
    }
}
