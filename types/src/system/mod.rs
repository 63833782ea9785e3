//! System contract ABIs: the types, constants and error codes of the built-in contracts.

pub mod registry;
