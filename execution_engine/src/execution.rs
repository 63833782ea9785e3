//! Execution errors surfaced by cross-contract calls.

use thiserror::Error;

use vellum_types::{bytesrepr, Hname};

/// The ways a synchronous cross-contract call can fail. Control returns to the caller only
/// after the called contract has fully completed or failed.
#[derive(Clone, Eq, PartialEq, Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The target contract is not deployed on this chain.
    #[error("no such contract: {0}")]
    NoSuchContract(Hname),
    /// The target contract has no entry point of the requested name.
    #[error("contract {hname} has no entry point '{entry_point}'")]
    EntryPointNotFound {
        /// The called contract.
        hname: Hname,
        /// The requested entry point.
        entry_point: String,
    },
    /// The called contract aborted execution.
    #[error("execution reverted: {0}")]
    Revert(String),
    /// (De)serialization of call arguments or results failed.
    #[error(transparent)]
    BytesRepr(#[from] bytesrepr::Error),
}
