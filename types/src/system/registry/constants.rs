//! Named constants of the root registry's ABI and state layout.

/// Name of the root registry contract.
pub const CONTRACT_NAME: &str = "root";
/// Description stored in the registry's own contract record.
pub const CONTRACT_DESCRIPTION: &str = "root contract";

/// State key holding the chain identifier.
pub const CHAIN_ID_KEY: &str = "chain_id";
/// State key holding the chain owner's agent identifier.
pub const CHAIN_OWNER_ID_KEY: &str = "chain_owner_id";
/// State key holding the color of the chain's origin token.
pub const CHAIN_COLOR_KEY: &str = "chain_color";
/// State key holding the chain's address on the ledger.
pub const CHAIN_ADDRESS_KEY: &str = "chain_address";
/// State key holding the chain description.
pub const DESCRIPTION_KEY: &str = "description";
/// State key holding the color fees are charged in.
pub const FEE_COLOR_KEY: &str = "fee_color";
/// State key holding the chain-wide default owner fee.
pub const DEFAULT_OWNER_FEE_KEY: &str = "default_owner_fee";
/// State key holding the chain-wide default validator fee.
pub const DEFAULT_VALIDATOR_FEE_KEY: &str = "default_validator_fee";
/// State map namespace holding the contract registry, keyed by contract `Hname`.
pub const CONTRACT_REGISTRY_KEY: &str = "contract_registry";
/// State map namespace holding agents authorized to deploy, keyed by `AgentId` bytes.
pub const DEPLOY_AUTHORIZATIONS_KEY: &str = "deploy_authorizations";

/// Named constant for method `init`: the entry point every contract exposes for one-time
/// initialization right after deployment.
pub const METHOD_INIT: &str = "init";
/// Named constant for method `deploy_contract`.
pub const METHOD_DEPLOY_CONTRACT: &str = "deploy_contract";
/// Named constant for method `grant_deploy_permission`.
pub const METHOD_GRANT_DEPLOY_PERMISSION: &str = "grant_deploy_permission";
/// Named constant for method `revoke_deploy_permission`.
pub const METHOD_REVOKE_DEPLOY_PERMISSION: &str = "revoke_deploy_permission";
/// Named constant for view method `find_contract`.
pub const METHOD_FIND_CONTRACT: &str = "find_contract";
/// Named constant for view method `get_chain_info`.
pub const METHOD_GET_CHAIN_INFO: &str = "get_chain_info";
/// Named constant for view method `get_fee_info`.
pub const METHOD_GET_FEE_INFO: &str = "get_fee_info";

/// Named constant for `program_hash`.
pub const ARG_PROGRAM_HASH: &str = "program_hash";
/// Named constant for `name`.
pub const ARG_NAME: &str = "name";
/// Named constant for `description`.
pub const ARG_DESCRIPTION: &str = "description";
/// Named constant for `agent_id`.
pub const ARG_AGENT_ID: &str = "agent_id";
/// Named constant for `chain_id`.
pub const ARG_CHAIN_ID: &str = "chain_id";
/// Named constant for `chain_owner_id`.
pub const ARG_CHAIN_OWNER_ID: &str = "chain_owner_id";
/// Named constant for `chain_color`.
pub const ARG_CHAIN_COLOR: &str = "chain_color";
/// Named constant for `chain_address`.
pub const ARG_CHAIN_ADDRESS: &str = "chain_address";
/// Named constant for `fee_color`.
pub const ARG_FEE_COLOR: &str = "fee_color";
/// Named constant for `owner_fee`.
pub const ARG_OWNER_FEE: &str = "owner_fee";
/// Named constant for `validator_fee`.
pub const ARG_VALIDATOR_FEE: &str = "validator_fee";
