//! # echo-atoms
//!
//! The AtomSpace seam for EchoSpace.
//!
//! The symbolic knowledge-graph store is an external collaborator. This
//! crate pins down the *exact* slice of it the adapter depends on:
//!
//! - [`NumberNode`] — an addressable numeric graph node (name + value)
//! - [`AtomSpace`] — the three store capabilities the adapter uses:
//!   create-or-fetch by name and value, read a node's name, membership test
//! - [`InMemoryAtomSpace`] — reference implementation for tests and local
//!   runs, with JSON persistence
//! - [`Shared`] — the `Arc<RwLock<..>>` handle the reservoir node and the
//!   converter hold
//!
//! ## Architecture Rules
//!
//! - Depends only on `echo-core`.
//! - The adapter creates and reads nodes but never deletes them — the
//!   trait has no delete method on purpose.
//! - Production callers inject their own `AtomSpace` implementation; the
//!   in-memory store is the default fallback.

pub mod memory;
pub mod node;
pub mod space;

pub use memory::InMemoryAtomSpace;
pub use node::NumberNode;
pub use space::{shared, AtomSpace, Shared};

pub use echo_core;
