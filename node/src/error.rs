use thiserror::Error;

use vellum_types::{bytesrepr, ChainId};

/// Errors which can occur while accessing node-local persistence.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The stored node identity key material has the wrong length or is otherwise unusable.
    /// This is not recoverable by regenerating: a node must never silently change identity.
    #[error("stored node identity key material is malformed")]
    MalformedIdentity,
    /// No chain record is stored for the given chain.
    #[error("no chain record for chain {0}")]
    ChainRecordNotFound(ChainId),
    /// Malformed stored bytes.
    #[error(transparent)]
    BytesRepr(#[from] bytesrepr::Error),
}
