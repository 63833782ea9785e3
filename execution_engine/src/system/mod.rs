//! Implementations of the system contracts that run natively in the engine.

pub mod registry;
