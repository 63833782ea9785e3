//! Node-local persistence for a vellum node.
//!
//! Unlike chain state, nothing here is consensus-critical: the node identity key pair and the
//! chain records are private to one node and never hashed into a chain. They still go through
//! the same abstract key-value interface so the backing store stays swappable.

#![warn(
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_qualifications
)]

mod chain_record;
mod error;
mod identity;

pub use chain_record::{ChainRecord, ChainRecordStore};
pub use error::Error;
pub use identity::NodeIdentity;
