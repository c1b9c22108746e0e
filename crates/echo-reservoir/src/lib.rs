//! # echo-reservoir
//!
//! The echo-state reservoir node for EchoSpace.
//!
//! A reservoir is a fixed random recurrent network used as a nonlinear
//! memory stage — it is driven, not trained. This crate implements the
//! standard recurrence
//!
//! ```text
//! state ← tanh(input · Winᵀ + state · Wᵀ)
//! ```
//!
//! with lazy weight initialization on the first input (the input
//! dimension is unknown until then) and a snapshot operation that
//! materializes parameters into an AtomSpace for symbolic reasoning.
//!
//! ## Key Components
//!
//! - [`ReservoirConfig`] — units, input scaling, target spectral radius,
//!   RNG seed; immutable after construction
//! - [`ReservoirNode`] — the stateful transform node
//!
//! ## Architecture Rules
//!
//! - No training, readout, or multi-node composition — driving and
//!   exporting only.
//! - All randomness comes from the config seed; two nodes with the same
//!   config and input sequence produce identical trajectories.
//! - Depends on `echo-core` and `echo-atoms`; no `async` code.

pub mod node;

pub use node::{ReservoirConfig, ReservoirNode};

pub use echo_atoms;
pub use echo_core;
