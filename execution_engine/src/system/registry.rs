//! The root registry: the built-in contract governing which contracts exist on a chain, how
//! they were initialized, what fees they charge, and who may deploy new ones.

mod error;
pub mod internal;
mod runtime_provider;
mod storage_provider;

use vellum_types::{
    system::registry::{ChainInfo, ContractRecord},
    AgentId, Address, CallArgs, ChainId, Color, Hname,
};

pub use error::Error;
pub use internal::{
    check_authorization_by_chain_owner, decode_contract_registry, find_contract,
    get_chain_info, get_default_fee_info, get_fee_info, resolve_fees,
};
pub use runtime_provider::{RuntimeProvider, TokenTransfer};
pub use storage_provider::StorageProvider;

/// Parameters of chain initialization, applied once at genesis.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ChainInit {
    /// The chain's identifier.
    pub chain_id: ChainId,
    /// The agent that owns the chain.
    pub chain_owner_id: AgentId,
    /// The color of the chain's origin token.
    pub chain_color: Color,
    /// The chain's address on the ledger.
    pub chain_address: Address,
    /// Free-text description of the chain.
    pub description: String,
    /// The color fees are charged in; the native color when absent.
    pub fee_color: Option<Color>,
    /// Chain-wide default owner fee; `0` when absent.
    pub default_owner_fee: Option<i64>,
    /// Chain-wide default validator fee; `0` when absent.
    pub default_validator_fee: Option<i64>,
}

/// Root registry functionality, implemented for any sandbox that provides runtime identity
/// and state access.
pub trait Registry: RuntimeProvider + StorageProvider + Sized {
    /// Checks if the caller is authorized to deploy a contract: the chain owner always is; a
    /// contract caller is iff it lives on this chain; an address caller is iff it has been
    /// granted deploy permission.
    fn is_authorized_to_deploy(&self) -> bool {
        internal::is_authorized_to_deploy(self)
    }

    /// Deploys a contract: checks deploy authorization, registers `record` under the
    /// identifier derived from its name, and invokes the contract's `init` entry point with
    /// `init_args`. On initialization failure the registration is rolled back exactly and
    /// [`Error::InitFailed`] is returned.
    fn deploy_contract(&mut self, record: &ContractRecord, init_args: CallArgs) -> Result<(), Error> {
        if !self.is_authorized_to_deploy() {
            return Err(Error::Unauthorized);
        }
        internal::store_and_init_contract(self, record, init_args)
    }

    /// Grants `agent_id` permission to deploy contracts on this chain. Chain owner only.
    fn grant_deploy_permission(&mut self, agent_id: AgentId) -> Result<(), Error> {
        internal::grant_deploy_permission(self, agent_id)
    }

    /// Revokes a previously granted deploy permission. Chain owner only.
    fn revoke_deploy_permission(&mut self, agent_id: AgentId) -> Result<(), Error> {
        internal::revoke_deploy_permission(self, agent_id)
    }

    /// Writes the chain's global variables and the registry's own record at genesis. Fails if
    /// the chain is already initialized.
    fn init_chain(&mut self, init: &ChainInit) -> Result<(), Error> {
        internal::init_chain(self.state_mut(), init)
    }

    /// Looks up the registry record of the contract `hname`.
    fn find_contract(&self, hname: Hname) -> Result<ContractRecord, Error> {
        internal::find_contract(self.state(), hname)
    }

    /// Returns the global variables of the chain.
    fn get_chain_info(&self) -> Result<ChainInfo, Error> {
        internal::get_chain_info(self.state())
    }

    /// Returns the fee color and effective owner/validator fees for the contract `hname`.
    fn get_fee_info(&self, hname: Hname) -> (Color, i64, i64) {
        internal::get_fee_info(self.state(), hname)
    }
}
