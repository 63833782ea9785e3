//! Chain-wide metadata snapshot.

use serde::{Deserialize, Serialize};

use crate::{Address, AgentId, ChainId, Color};

/// Global variables of a chain, read from the well-known state keys.
///
/// All fields are set at chain genesis; the registry core only reads them. `fee_color` and the
/// default fees may be absent in state, in which case they fall back to the native color and
/// `0` respectively.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct ChainInfo {
    /// The chain's identifier.
    pub chain_id: ChainId,
    /// The agent that owns the chain.
    pub chain_owner_id: AgentId,
    /// The chain's address on the ledger.
    pub chain_address: Address,
    /// The color of the chain's origin token.
    pub chain_color: Color,
    /// Free-text description of the chain.
    pub description: String,
    /// The color fees are charged in.
    pub fee_color: Color,
    /// Chain-wide default owner fee.
    pub default_owner_fee: i64,
    /// Chain-wide default validator fee.
    pub default_validator_fee: i64,
}
