use thiserror::Error;

use vellum_types::{bytesrepr, system::registry::InvalidFee, Hname};

use crate::execution;

/// Errors which can occur while executing the root registry.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A referenced contract has no registry entry. Distinct from "no fee override": callers
    /// must be able to tell a missing contract from one inheriting default fees.
    #[error("contract {0} not found")]
    ContractNotFound(Hname),
    /// Deployment attempted with a name whose identifier collides with an existing entry.
    /// Deployment never overwrites.
    #[error("contract '{name}'/{hname} already exists")]
    ContractAlreadyExists {
        /// Name of the contract that was being deployed.
        name: String,
        /// The colliding identifier.
        hname: Hname,
    },
    /// The contract's own initialization entry point failed. Its registration has been rolled
    /// back.
    #[error("contract '{name}'/{hname}: calling 'init': {source}")]
    InitFailed {
        /// Name of the contract that was being deployed.
        name: String,
        /// Its identifier.
        hname: Hname,
        /// The underlying initialization failure.
        source: execution::Error,
    },
    /// The caller is not authorized for the attempted operation.
    #[error("unauthorized")]
    Unauthorized,
    /// Chain initialization attempted on a chain that is already initialized.
    #[error("chain already initialized")]
    ChainAlreadyInitialized,
    /// A mandatory state variable is absent. Chain state is inconsistent.
    #[error("missing state variable '{0}'")]
    MissingStateVariable(&'static str),
    /// A fee value outside the accepted range.
    #[error(transparent)]
    InvalidFee(#[from] InvalidFee),
    /// Malformed stored bytes. Chain state is inconsistent; not recoverable.
    #[error(transparent)]
    BytesRepr(#[from] bytesrepr::Error),
}
