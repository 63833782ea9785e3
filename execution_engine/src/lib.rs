//! The engine which applies deterministic state transitions to vellum chain state.
//!
//! Everything in this crate runs within a single state-transition execution: one transaction
//! applied to chain state at a time, no internal parallelism, no blocking I/O. Given the same
//! prior state and inputs, every node must produce byte-identical resulting state, so nothing
//! here may depend on wall-clock time, randomness, or unordered iteration.

#![warn(
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_qualifications
)]

pub mod execution;
/// Storage for the execution engine.
pub mod storage;
pub mod system;
