//! The numeric graph-node handle.

use echo_core::EchoError;
use serde::{Deserialize, Serialize};

/// A handle to a numeric graph node in an AtomSpace.
///
/// A node is identified by its name string and carries a single `f64`
/// value. The store owns the node; this handle is a cheap snapshot of
/// the (name, value) pair at creation or fetch time.
///
/// # Example
///
/// ```
/// use echo_atoms::NumberNode;
///
/// let node = NumberNode::new("value_0", 1.5);
/// assert_eq!(node.name(), "value_0");
/// assert_eq!(node.value(), 1.5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberNode {
    name: String,
    value: f64,
}

impl NumberNode {
    /// Creates a handle with the given name and value.
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// Returns the node's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the node's stored value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Parses the node's *name* as a float.
    ///
    /// This is the legacy read path used by the converter: it ignores the
    /// value field entirely and only succeeds for nodes whose names are
    /// float literals (such as the ones the reservoir export creates).
    ///
    /// # Errors
    ///
    /// Returns [`EchoError::NameParse`] if the name is not a valid float
    /// literal.
    ///
    /// # Example
    ///
    /// ```
    /// use echo_atoms::NumberNode;
    ///
    /// let numeric = NumberNode::new("2.5", 0.0);
    /// assert_eq!(numeric.name_as_f64().unwrap(), 2.5);
    ///
    /// let named = NumberNode::new("value_0", 2.5);
    /// assert!(named.name_as_f64().is_err());
    /// ```
    pub fn name_as_f64(&self) -> Result<f64, EchoError> {
        self.name.parse::<f64>().map_err(|_| EchoError::NameParse {
            name: self.name.clone(),
        })
    }
}
