//! The array ⇄ atoms converter.

use echo_atoms::{AtomSpace, NumberNode, Shared};
use echo_core::{EchoError, Matrix};

/// Default name prefix for nodes created by [`AtomConverter::array_to_atoms`].
pub const DEFAULT_PREFIX: &str = "value";

/// Converts between matrices and named number nodes in one AtomSpace.
///
/// The converter holds no state beyond the store handle; both directions
/// are linear scans.
///
/// # Example
///
/// ```
/// use echo_atoms::{shared, InMemoryAtomSpace};
/// use echo_convert::AtomConverter;
/// use echo_core::Matrix;
///
/// let space = shared(InMemoryAtomSpace::new());
/// let converter = AtomConverter::new(space.clone());
///
/// let array = Matrix::row_vector(vec![1.0, 2.0, 3.0]);
/// let atoms = converter.array_to_atoms(&array).unwrap();
///
/// assert_eq!(atoms.len(), 3);
/// assert_eq!(atoms[0].name(), "value_0");
/// assert_eq!(space.read().unwrap().len(), 3);
/// ```
pub struct AtomConverter<S: AtomSpace> {
    space: Shared<S>,
}

impl<S: AtomSpace> std::fmt::Debug for AtomConverter<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AtomConverter")
    }
}

impl<S: AtomSpace> AtomConverter<S> {
    /// Creates a converter bound to the given store handle.
    pub fn new(space: Shared<S>) -> Self {
        Self { space }
    }

    /// Returns a clone of the store handle this converter is bound to.
    pub fn space(&self) -> Shared<S> {
        self.space.clone()
    }

    /// Converts a matrix to number nodes named `"value_{i}"`.
    ///
    /// Shorthand for [`array_to_atoms_named`](Self::array_to_atoms_named)
    /// with [`DEFAULT_PREFIX`].
    pub fn array_to_atoms(&self, array: &Matrix) -> Result<Vec<NumberNode>, EchoError> {
        self.array_to_atoms_named(array, DEFAULT_PREFIX)
    }

    /// Converts a matrix to number nodes named `"{prefix}_{i}"`.
    ///
    /// The matrix is flattened row-major; element `i` becomes a node
    /// named `"{prefix}_{i}"` holding the element's value. Handles are
    /// returned in flattening order. One store call per element — a
    /// failure partway leaves the earlier nodes created (no rollback).
    ///
    /// # Errors
    ///
    /// Returns [`EchoError::Storage`] if the store handle is poisoned.
    ///
    /// # Example
    ///
    /// ```
    /// use echo_atoms::{shared, InMemoryAtomSpace};
    /// use echo_convert::AtomConverter;
    /// use echo_core::Matrix;
    ///
    /// let converter = AtomConverter::new(shared(InMemoryAtomSpace::new()));
    /// let m = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    ///
    /// let atoms = converter.array_to_atoms_named(&m, "w").unwrap();
    /// assert_eq!(atoms[2].name(), "w_2");
    /// assert_eq!(atoms[2].value(), 3.0);
    /// ```
    pub fn array_to_atoms_named(
        &self,
        array: &Matrix,
        prefix: &str,
    ) -> Result<Vec<NumberNode>, EchoError> {
        let mut space = self.space.write().map_err(|_| EchoError::Storage {
            message: "atomspace lock poisoned".to_string(),
        })?;

        let atoms = array
            .as_slice()
            .iter()
            .enumerate()
            .map(|(i, &value)| space.add_number_node(&format!("{prefix}_{i}"), value))
            .collect::<Vec<_>>();
        tracing::debug!(count = atoms.len(), prefix, "array materialized as nodes");
        Ok(atoms)
    }

    /// Rebuilds a matrix from a node sequence.
    ///
    /// Each node's **name** is parsed as a float, in the given order, into
    /// a 1×n matrix; `shape` reshapes it row-major. The value field is
    /// ignored — see the crate docs for why this quirk is preserved.
    ///
    /// # Errors
    ///
    /// - [`EchoError::NameParse`] if any node's name is not a float
    ///   literal.
    /// - [`EchoError::ReshapeMismatch`] if `shape`'s element count differs
    ///   from the node count.
    ///
    /// # Example
    ///
    /// ```
    /// use echo_atoms::{shared, InMemoryAtomSpace, NumberNode};
    /// use echo_convert::AtomConverter;
    ///
    /// let converter = AtomConverter::new(shared(InMemoryAtomSpace::new()));
    /// let atoms: Vec<NumberNode> = [1.0, 2.0, 3.0, 4.0]
    ///     .iter()
    ///     .map(|v| NumberNode::new(v.to_string(), *v))
    ///     .collect();
    ///
    /// let m = converter.atoms_to_array(&atoms, Some((2, 2))).unwrap();
    /// assert_eq!(m.get(1, 0), 3.0);
    /// ```
    pub fn atoms_to_array(
        &self,
        atoms: &[NumberNode],
        shape: Option<(usize, usize)>,
    ) -> Result<Matrix, EchoError> {
        let values = atoms
            .iter()
            .map(NumberNode::name_as_f64)
            .collect::<Result<Vec<f64>, EchoError>>()?;

        let flat = Matrix::row_vector(values);
        match shape {
            Some((rows, cols)) => flat.reshape(rows, cols),
            None => Ok(flat),
        }
    }
}
