//! # echo-core
//!
//! Shared fundamentals for EchoSpace — the reservoir-to-AtomSpace adapter.
//!
//! ## Key Components
//!
//! - [`Matrix`]: row-major dense `f64` matrix with the small set of
//!   operations the reservoir recurrence needs
//! - [`SeedRng`]: deterministic splitmix64 PRNG for weight initialization
//! - [`EchoError`]: the workspace-wide error type
//!
//! ## Architecture Rules
//!
//! - No dependencies on other `echo-*` crates — this is the root crate.
//! - No `async` code — pure synchronous math.
//! - All randomness flows through an explicitly seeded [`SeedRng`];
//!   nothing in the workspace touches a process-wide random source.

pub mod error;
pub mod matrix;
pub mod rng;

pub use error::EchoError;
pub use matrix::Matrix;
pub use rng::SeedRng;

/// Default reservoir unit count.
pub const DEFAULT_UNITS: usize = 100;

/// Default input scaling factor.
pub const DEFAULT_INPUT_SCALING: f64 = 1.0;

/// Default target spectral radius (just inside the edge of stability).
pub const DEFAULT_SPECTRAL_RADIUS: f64 = 0.99;
