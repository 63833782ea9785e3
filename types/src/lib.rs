//! Types shared between the vellum node crates.
//!
//! Everything that ends up in consensus-relevant chain state is serialized through the
//! deterministic [`bytesrepr`] codec rather than serde; serde impls exist for operator-facing
//! JSON surfaces only.

#![warn(
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_qualifications
)]

mod agent;
pub mod bytesrepr;
mod call_args;
mod hname;
mod identifiers;
pub mod system;
#[cfg(any(feature = "testing", test))]
pub mod testing;

pub use agent::{AgentId, ContractId};
pub use call_args::CallArgs;
pub use hname::{Hname, HNAME_SERIALIZED_LENGTH};
pub use identifiers::{Address, ChainId, Color, ProgramHash, IDENTIFIER_LENGTH};
