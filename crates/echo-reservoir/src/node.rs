//! The reservoir node: config, lazy-initialized parameters, step, export.

use std::collections::BTreeMap;

use echo_atoms::{shared, AtomSpace, InMemoryAtomSpace, NumberNode, Shared};
use echo_core::{
    EchoError, Matrix, SeedRng, DEFAULT_INPUT_SCALING, DEFAULT_SPECTRAL_RADIUS, DEFAULT_UNITS,
};
use serde::{Deserialize, Serialize};

/// Reservoir hyperparameters, fixed at construction.
///
/// # Example
///
/// ```
/// use echo_reservoir::ReservoirConfig;
///
/// let config = ReservoirConfig::default();
/// assert_eq!(config.units, 100);
/// assert_eq!(config.spectral_radius, 0.99);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservoirConfig {
    /// Number of reservoir units (must be at least 1).
    pub units: usize,
    /// Scaling factor applied to the input weight matrix.
    pub input_scaling: f64,
    /// Target spectral radius of the recurrent weight matrix.
    pub spectral_radius: f64,
    /// Seed for weight initialization. Same seed, same weights.
    pub seed: u64,
}

impl Default for ReservoirConfig {
    fn default() -> Self {
        Self {
            units: DEFAULT_UNITS,
            input_scaling: DEFAULT_INPUT_SCALING,
            spectral_radius: DEFAULT_SPECTRAL_RADIUS,
            seed: 42,
        }
    }
}

/// The node's parameter set: either not yet drawn, or fixed for life.
///
/// The transition happens exactly once, on the first [`ReservoirNode::step`]
/// call, and there is no path back — matrix shapes are frozen from then on.
enum ReservoirParams {
    Uninitialized,
    Ready {
        /// Input weight matrix, shape (units, input_dim).
        input_weights: Matrix,
        /// Recurrent weight matrix, shape (units, units), rescaled to the
        /// configured spectral radius.
        recurrent_weights: Matrix,
        /// Current activation, shape (1, units).
        state: Matrix,
    },
}

/// A reservoir computing node bound to an AtomSpace.
///
/// Feed input row vectors through [`step`](Self::step) to drive the
/// recurrence; call [`export_state`](Self::export_state) to snapshot
/// parameters into the store as numeric graph nodes.
///
/// # Example
///
/// ```
/// use echo_core::Matrix;
/// use echo_reservoir::{ReservoirConfig, ReservoirNode};
///
/// let config = ReservoirConfig { units: 5, ..Default::default() };
/// let mut node = ReservoirNode::with_default_space(config).unwrap();
///
/// let state = node.step(&Matrix::row_vector(vec![0.5, -0.5, 1.0])).unwrap();
/// assert_eq!(state.shape(), (1, 5));
/// assert_eq!(node.input_dim(), Some(3));
/// ```
pub struct ReservoirNode<S: AtomSpace> {
    config: ReservoirConfig,
    rng: SeedRng,
    params: ReservoirParams,
    space: Shared<S>,
}

impl<S: AtomSpace> std::fmt::Debug for ReservoirNode<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ReservoirNode(units={}, input_dim={:?})",
            self.config.units,
            self.input_dim()
        )
    }
}

impl ReservoirNode<InMemoryAtomSpace> {
    /// Creates a node bound to a fresh [`InMemoryAtomSpace`].
    ///
    /// The default fallback when the caller has no store to inject;
    /// retrieve the handle with [`space`](Self::space).
    ///
    /// # Errors
    ///
    /// Returns [`EchoError::Config`] if `config.units` is zero.
    pub fn with_default_space(config: ReservoirConfig) -> Result<Self, EchoError> {
        Self::new(config, shared(InMemoryAtomSpace::new()))
    }
}

impl<S: AtomSpace> ReservoirNode<S> {
    /// Creates a node bound to an existing store handle.
    ///
    /// Weights are not drawn here — they are created lazily on the first
    /// [`step`](Self::step), once the input dimension is known.
    ///
    /// # Errors
    ///
    /// Returns [`EchoError::Config`] if `config.units` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use echo_atoms::{shared, InMemoryAtomSpace};
    /// use echo_reservoir::{ReservoirConfig, ReservoirNode};
    ///
    /// let space = shared(InMemoryAtomSpace::new());
    /// let node = ReservoirNode::new(ReservoirConfig::default(), space).unwrap();
    /// assert!(!node.is_initialized());
    /// ```
    pub fn new(config: ReservoirConfig, space: Shared<S>) -> Result<Self, EchoError> {
        if config.units == 0 {
            return Err(EchoError::Config {
                message: "reservoir needs at least one unit".to_string(),
            });
        }
        let rng = SeedRng::new(config.seed);
        Ok(Self {
            config,
            rng,
            params: ReservoirParams::Uninitialized,
            space,
        })
    }

    /// Returns the node's hyperparameters.
    pub fn config(&self) -> &ReservoirConfig {
        &self.config
    }

    /// Returns a clone of the store handle this node is bound to.
    pub fn space(&self) -> Shared<S> {
        self.space.clone()
    }

    /// Returns `true` once weights have been drawn.
    pub fn is_initialized(&self) -> bool {
        matches!(self.params, ReservoirParams::Ready { .. })
    }

    /// Returns the input dimension fixed at initialization, if any.
    pub fn input_dim(&self) -> Option<usize> {
        match &self.params {
            ReservoirParams::Uninitialized => None,
            ReservoirParams::Ready { input_weights, .. } => Some(input_weights.cols()),
        }
    }

    /// Returns the current activation, shape (1, units), if initialized.
    pub fn state(&self) -> Option<&Matrix> {
        match &self.params {
            ReservoirParams::Uninitialized => None,
            ReservoirParams::Ready { state, .. } => Some(state),
        }
    }

    /// Advances the reservoir by one input and returns the new state.
    ///
    /// On the first call, draws the weights: input weights uniform in
    /// [-1, 1] times `input_scaling`, shape (units, input_dim); recurrent
    /// weights uniform in [-1, 1], shape (units, units), rescaled so their
    /// spectral radius equals the configured target; state starts at zero.
    ///
    /// Then computes `tanh(input · Winᵀ + state · Wᵀ)`, stores it, and
    /// returns it with shape (1, units). Given fixed weights, the result
    /// is a pure function of (input, previous state).
    ///
    /// # Errors
    ///
    /// - [`EchoError::InputRows`] if the input is not a single row.
    /// - [`EchoError::InputDim`] if the input's trailing dimension differs
    ///   from the dimension fixed at initialization. The node's state is
    ///   left untouched in both cases.
    ///
    /// # Example
    ///
    /// ```
    /// use echo_core::Matrix;
    /// use echo_reservoir::{ReservoirConfig, ReservoirNode};
    ///
    /// let config = ReservoirConfig { units: 5, ..Default::default() };
    /// let mut node = ReservoirNode::with_default_space(config).unwrap();
    ///
    /// // Zero input on zero initial state stays at tanh(0) = 0.
    /// let state = node.step(&Matrix::zeros(1, 3)).unwrap();
    /// assert_eq!(state.shape(), (1, 5));
    /// assert!(state.as_slice().iter().all(|&v| v == 0.0));
    ///
    /// // Dimension is fixed now; a (1, 4) input is rejected.
    /// assert!(node.step(&Matrix::zeros(1, 4)).is_err());
    /// ```
    pub fn step(&mut self, input: &Matrix) -> Result<Matrix, EchoError> {
        if input.rows() != 1 {
            return Err(EchoError::InputRows { got: input.rows() });
        }

        // Consume the current variant, produce the next.
        let params = std::mem::replace(&mut self.params, ReservoirParams::Uninitialized);
        let (input_weights, recurrent_weights, state) = match params {
            ReservoirParams::Uninitialized => self.draw_weights(input.cols()),
            ReservoirParams::Ready {
                input_weights,
                recurrent_weights,
                state,
            } => (input_weights, recurrent_weights, state),
        };

        if input.cols() != input_weights.cols() {
            let expected = input_weights.cols();
            let got = input.cols();
            self.params = ReservoirParams::Ready {
                input_weights,
                recurrent_weights,
                state,
            };
            return Err(EchoError::InputDim { expected, got });
        }

        let new_state = input
            .mul_transpose(&input_weights)
            .add(&state.mul_transpose(&recurrent_weights))
            .map(f64::tanh);

        self.params = ReservoirParams::Ready {
            input_weights,
            recurrent_weights,
            state: new_state.clone(),
        };
        Ok(new_state)
    }

    /// Snapshots the parameter set into the AtomSpace.
    ///
    /// Returns a map from parameter name (`"input_weights"`,
    /// `"recurrent_weights"`, `"state"`) to the graph node created for it.
    /// Before the first step no parameters exist and the map is empty.
    ///
    /// The snapshot is deliberately lossy: for each parameter, a single
    /// node is created carrying only the first element of the flattened
    /// matrix, named by that scalar's display form. This is the adapter's
    /// long-standing export contract; use the converter for full arrays.
    ///
    /// # Errors
    ///
    /// Returns [`EchoError::Storage`] if the store handle is poisoned.
    ///
    /// # Example
    ///
    /// ```
    /// use echo_core::Matrix;
    /// use echo_reservoir::{ReservoirConfig, ReservoirNode};
    ///
    /// let config = ReservoirConfig { units: 3, ..Default::default() };
    /// let mut node = ReservoirNode::with_default_space(config).unwrap();
    /// assert!(node.export_state().unwrap().is_empty());
    ///
    /// node.step(&Matrix::row_vector(vec![1.0, 2.0])).unwrap();
    /// let atoms = node.export_state().unwrap();
    /// assert_eq!(atoms.len(), 3);
    /// assert!(atoms.contains_key("state"));
    /// ```
    pub fn export_state(&self) -> Result<BTreeMap<String, NumberNode>, EchoError> {
        let ReservoirParams::Ready {
            input_weights,
            recurrent_weights,
            state,
        } = &self.params
        else {
            return Ok(BTreeMap::new());
        };

        let mut space = self.space.write().map_err(|_| EchoError::Storage {
            message: "atomspace lock poisoned".to_string(),
        })?;

        let mut atoms = BTreeMap::new();
        for (key, param) in [
            ("input_weights", input_weights),
            ("recurrent_weights", recurrent_weights),
            ("state", state),
        ] {
            // Single-scalar snapshot: first element of the row-major
            // flattening, used as both the node's name and its value.
            if let Some(&first) = param.as_slice().first() {
                let node = space.add_number_node(&first.to_string(), first);
                atoms.insert(key.to_string(), node);
            }
        }
        tracing::debug!(count = atoms.len(), "exported reservoir parameters");
        Ok(atoms)
    }

    /// Draws the weight matrices and zero state for the given input
    /// dimension. Called exactly once, from the first `step`.
    fn draw_weights(&mut self, input_dim: usize) -> (Matrix, Matrix, Matrix) {
        let units = self.config.units;

        let mut input_weights = Matrix::uniform(&mut self.rng, units, input_dim, -1.0, 1.0);
        input_weights.scale(self.config.input_scaling);

        let mut recurrent_weights = Matrix::uniform(&mut self.rng, units, units, -1.0, 1.0);
        let estimate = recurrent_weights.spectral_radius();
        if estimate > 1e-12 {
            recurrent_weights.scale(self.config.spectral_radius / estimate);
        }

        tracing::debug!(
            units,
            input_dim,
            spectral_radius = self.config.spectral_radius,
            "initialized reservoir weights"
        );
        (input_weights, recurrent_weights, Matrix::zeros(1, units))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> ReservoirConfig {
        ReservoirConfig {
            units: 5,
            ..Default::default()
        }
    }

    #[test]
    fn config_roundtrips_through_json() {
        let json = r#"{"units": 50, "input_scaling": 0.5, "spectral_radius": 0.9, "seed": 7}"#;
        let config: ReservoirConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.units, 50);
        assert_eq!(config.input_scaling, 0.5);
        assert_eq!(config.spectral_radius, 0.9);
        assert_eq!(config.seed, 7);

        let reparsed: ReservoirConfig =
            serde_json::from_str(&serde_json::to_string(&config).unwrap()).unwrap();
        assert_eq!(reparsed, config);
    }

    #[test]
    fn zero_units_rejected() {
        let config = ReservoirConfig {
            units: 0,
            ..Default::default()
        };
        let err = ReservoirNode::with_default_space(config).unwrap_err();
        assert!(matches!(err, EchoError::Config { .. }));
    }

    #[test]
    fn starts_uninitialized() {
        let node = ReservoirNode::with_default_space(small_config()).unwrap();
        assert!(!node.is_initialized());
        assert!(node.input_dim().is_none());
        assert!(node.state().is_none());
    }

    #[test]
    fn first_step_fixes_shapes() {
        let mut node = ReservoirNode::with_default_space(small_config()).unwrap();
        let state = node.step(&Matrix::zeros(1, 3)).unwrap();

        assert_eq!(state.shape(), (1, 5));
        assert!(node.is_initialized());
        assert_eq!(node.input_dim(), Some(3));
        assert_eq!(node.state().unwrap().shape(), (1, 5));
    }

    #[test]
    fn zero_input_on_fresh_node_gives_zero_state() {
        // tanh(0 · Winᵀ + 0 · Wᵀ) = 0 regardless of the drawn weights.
        let mut node = ReservoirNode::with_default_space(small_config()).unwrap();
        let state = node.step(&Matrix::zeros(1, 3)).unwrap();
        assert!(state.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn dimension_change_after_init_errors() {
        let mut node = ReservoirNode::with_default_space(small_config()).unwrap();
        node.step(&Matrix::zeros(1, 3)).unwrap();

        let err = node.step(&Matrix::zeros(1, 4)).unwrap_err();
        assert_eq!(err, EchoError::InputDim { expected: 3, got: 4 });

        // Failed step must not disturb the node.
        assert_eq!(node.input_dim(), Some(3));
        assert!(node.step(&Matrix::zeros(1, 3)).is_ok());
    }

    #[test]
    fn multi_row_input_rejected() {
        let mut node = ReservoirNode::with_default_space(small_config()).unwrap();
        let err = node.step(&Matrix::zeros(2, 3)).unwrap_err();
        assert_eq!(err, EchoError::InputRows { got: 2 });
        assert!(!node.is_initialized());
    }

    #[test]
    fn same_seed_same_trajectory() {
        let mut a = ReservoirNode::with_default_space(small_config()).unwrap();
        let mut b = ReservoirNode::with_default_space(small_config()).unwrap();

        let inputs = [
            Matrix::row_vector(vec![0.5, -0.5, 1.0]),
            Matrix::row_vector(vec![0.1, 0.2, 0.3]),
        ];
        for input in &inputs {
            assert_eq!(a.step(input).unwrap(), b.step(input).unwrap());
        }
    }

    #[test]
    fn state_has_memory() {
        // Same input twice: the second state differs because the first
        // left a nonzero activation behind.
        let mut node = ReservoirNode::with_default_space(small_config()).unwrap();
        let input = Matrix::row_vector(vec![0.5, -0.5, 1.0]);
        let s1 = node.step(&input).unwrap();
        let s2 = node.step(&input).unwrap();
        assert_ne!(s1, s2);
    }

    #[test]
    fn recurrent_matrix_hits_target_radius() {
        let config = ReservoirConfig {
            units: 20,
            spectral_radius: 0.9,
            ..Default::default()
        };
        let mut node = ReservoirNode::with_default_space(config).unwrap();
        node.step(&Matrix::zeros(1, 2)).unwrap();

        // Re-borrow the recurrent matrix through the params.
        let ReservoirParams::Ready {
            recurrent_weights, ..
        } = &node.params
        else {
            panic!("node should be initialized");
        };
        assert!((recurrent_weights.spectral_radius() - 0.9).abs() < 1e-9);
    }

    #[test]
    fn input_scaling_applied() {
        let config = ReservoirConfig {
            units: 4,
            input_scaling: 0.0,
            ..Default::default()
        };
        let mut node = ReservoirNode::with_default_space(config).unwrap();
        // With zero input scaling, the first state is tanh(0) everywhere.
        let state = node.step(&Matrix::row_vector(vec![3.0, -7.0])).unwrap();
        assert!(state.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn export_before_step_is_empty() {
        let node = ReservoirNode::with_default_space(small_config()).unwrap();
        assert!(node.export_state().unwrap().is_empty());
        assert!(node.space().read().unwrap().is_empty());
    }

    #[test]
    fn export_after_step_creates_three_nodes() {
        let mut node = ReservoirNode::with_default_space(small_config()).unwrap();
        node.step(&Matrix::row_vector(vec![1.0, 2.0])).unwrap();

        let atoms = node.export_state().unwrap();
        assert_eq!(atoms.len(), 3);
        for key in ["input_weights", "recurrent_weights", "state"] {
            assert!(atoms.contains_key(key), "missing {key}");
        }

        let space = node.space();
        let space = space.read().unwrap();
        for atom in atoms.values() {
            assert!(space.contains(atom));
        }
    }

    #[test]
    fn export_node_named_after_first_element() {
        let mut node = ReservoirNode::with_default_space(small_config()).unwrap();
        node.step(&Matrix::row_vector(vec![1.0, 2.0])).unwrap();

        let atoms = node.export_state().unwrap();
        let state_atom = &atoms["state"];
        let first = node.state().unwrap().get(0, 0);
        assert_eq!(state_atom.name(), first.to_string());
        assert_eq!(state_atom.value(), first);
    }
}
