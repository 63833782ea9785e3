//! Internal utility functions of the root registry. The read-only ones are called from within
//! the registry's own entry points as well as from the VM's execution and view contexts; they
//! are not exposed to the sandbox.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use vellum_types::{
    bytesrepr::{self, FromBytes, ToBytes},
    system::registry::{
        ChainInfo, ContractRecord, CHAIN_ADDRESS_KEY, CHAIN_COLOR_KEY, CHAIN_ID_KEY,
        CHAIN_OWNER_ID_KEY, CONTRACT_REGISTRY_KEY, DEFAULT_OWNER_FEE_KEY,
        DEFAULT_VALIDATOR_FEE_KEY, DEPLOY_AUTHORIZATIONS_KEY, DESCRIPTION_KEY, FEE_COLOR_KEY,
        METHOD_INIT, ROOT_HNAME,
    },
    AgentId, CallArgs, Color, Hname,
};

use crate::{
    storage::{StateAccess, StateMap},
    system::registry::{ChainInit, Error, RuntimeProvider, StorageProvider},
};

/// Value stored in the deployment authorization list; presence of the key is what grants
/// authorization, the value is a sentinel.
const PERMISSION_SENTINEL: u8 = 0x01;

pub(crate) fn contract_registry() -> StateMap {
    StateMap::new(CONTRACT_REGISTRY_KEY)
}

pub(crate) fn deploy_authorizations() -> StateMap {
    StateMap::new(DEPLOY_AUTHORIZATIONS_KEY)
}

/// Decodes the scalar state variable `key`, or `None` if absent.
fn decode_scalar<T: FromBytes, S: StateAccess + ?Sized>(
    state: &S,
    key: &'static str,
) -> Result<Option<T>, Error> {
    match state.get(key.as_bytes()) {
        None => Ok(None),
        Some(bytes) => Ok(Some(bytesrepr::deserialize(&bytes)?)),
    }
}

/// Decodes the scalar state variable `key`; absence is an inconsistency.
fn require_scalar<T: FromBytes, S: StateAccess + ?Sized>(
    state: &S,
    key: &'static str,
) -> Result<T, Error> {
    decode_scalar(state, key)?.ok_or(Error::MissingStateVariable(key))
}

fn set_scalar<T: ToBytes, S: StateAccess + ?Sized>(
    state: &mut S,
    key: &str,
    value: T,
) -> Result<(), Error> {
    state.set(key.as_bytes().to_vec(), value.into_bytes()?);
    Ok(())
}

/// Finds the registry record of the contract `hname`.
///
/// If no record exists and `hname` is the root registry's own identifier, the chain is in the
/// middle of initializing itself; an empty root record is synthesized instead of failing. Any
/// other missing identifier is an error, not an empty result.
pub fn find_contract<S: StateAccess + ?Sized>(
    state: &S,
    hname: Hname,
) -> Result<ContractRecord, Error> {
    match contract_registry().get(state, &hname.to_bytes_fixed()) {
        Some(bytes) => Ok(bytesrepr::deserialize(&bytes)?),
        None if hname == *ROOT_HNAME => Ok(ContractRecord::root_placeholder()),
        None => Err(Error::ContractNotFound(hname)),
    }
}

/// Returns the global variables of the chain.
///
/// Identifier, owner, color, address and description are mandatory. `fee_color` defaults to
/// the native color and the default fees to `0` when absent.
pub fn get_chain_info<S: StateAccess + ?Sized>(state: &S) -> Result<ChainInfo, Error> {
    Ok(ChainInfo {
        chain_id: require_scalar(state, CHAIN_ID_KEY)?,
        chain_owner_id: require_scalar(state, CHAIN_OWNER_ID_KEY)?,
        chain_color: require_scalar(state, CHAIN_COLOR_KEY)?,
        chain_address: require_scalar(state, CHAIN_ADDRESS_KEY)?,
        description: require_scalar(state, DESCRIPTION_KEY)?,
        fee_color: decode_scalar(state, FEE_COLOR_KEY)?.unwrap_or(Color::NATIVE),
        default_owner_fee: decode_scalar(state, DEFAULT_OWNER_FEE_KEY)?.unwrap_or(0),
        default_validator_fee: decode_scalar(state, DEFAULT_VALIDATOR_FEE_KEY)?.unwrap_or(0),
    })
}

/// Returns the chain-wide fee color and default fees, applying the documented defaults for
/// absent values.
pub fn get_default_fee_info<S: StateAccess + ?Sized>(
    state: &S,
) -> Result<(Color, i64, i64), Error> {
    let fee_color = decode_scalar(state, FEE_COLOR_KEY)?.unwrap_or(Color::NATIVE);
    let default_owner_fee = decode_scalar(state, DEFAULT_OWNER_FEE_KEY)?.unwrap_or(0);
    let default_validator_fee = decode_scalar(state, DEFAULT_VALIDATOR_FEE_KEY)?.unwrap_or(0);
    Ok((fee_color, default_owner_fee, default_validator_fee))
}

/// Returns the fee color and effective owner/validator fees for the contract `hname`.
///
/// Lookup failures are ignored: a missing or undecodable record contributes no override, so
/// the chain defaults apply.
pub fn get_fee_info<S: StateAccess + ?Sized>(state: &S, hname: Hname) -> (Color, i64, i64) {
    let record = match find_contract(state, hname) {
        Ok(record) => Some(record),
        Err(error) => {
            debug!(%hname, %error, "fee query for unknown contract; chain defaults apply");
            None
        }
    };
    resolve_fees(state, record.as_ref())
}

/// Computes effective fees for `record`, starting from the chain defaults.
///
/// A non-zero record fee overrides the corresponding default. A record fee of exactly `0`
/// always inherits the default; an explicit zero fee is intentionally unrepresentable while
/// the chain default is non-zero.
pub fn resolve_fees<S: StateAccess + ?Sized>(
    state: &S,
    record: Option<&ContractRecord>,
) -> (Color, i64, i64) {
    let (fee_color, default_owner_fee, default_validator_fee) = get_default_fee_info(state)
        .unwrap_or_else(|error| {
            debug!(%error, "undecodable chain fee defaults; treating as unset");
            (Color::NATIVE, 0, 0)
        });
    let mut owner_fee = record.map(ContractRecord::owner_fee).unwrap_or(0);
    let mut validator_fee = record.map(ContractRecord::validator_fee).unwrap_or(0);
    if owner_fee == 0 {
        owner_fee = default_owner_fee;
    }
    if validator_fee == 0 {
        validator_fee = default_validator_fee;
    }
    (fee_color, owner_fee, validator_fee)
}

/// Decodes the whole contract registry into a map keyed by `Hname`, in ascending `Hname`
/// order. The first undecodable entry aborts the enumeration; no partial map is returned.
pub fn decode_contract_registry<S: StateAccess + ?Sized>(
    state: &S,
) -> Result<BTreeMap<Hname, ContractRecord>, Error> {
    let mut result = BTreeMap::new();
    for (key, value) in contract_registry().iter(state) {
        let hname: Hname = bytesrepr::deserialize(&key)?;
        let record: ContractRecord = bytesrepr::deserialize(&value)?;
        result.insert(hname, record);
    }
    Ok(result)
}

/// Returns `true` iff `agent_id` is the stored chain owner.
pub fn check_authorization_by_chain_owner<S: StateAccess + ?Sized>(
    state: &S,
    agent_id: &AgentId,
) -> bool {
    match decode_scalar::<AgentId, S>(state, CHAIN_OWNER_ID_KEY) {
        Ok(Some(owner)) => owner == *agent_id,
        _ => false,
    }
}

/// Checks if the caller is authorized to deploy a contract. Total: an unrecognized caller
/// form falls through to "not authorized".
pub(crate) fn is_authorized_to_deploy<P>(provider: &P) -> bool
where
    P: RuntimeProvider + StorageProvider,
{
    let caller = provider.caller();
    if caller == provider.chain_owner_id() {
        // chain owner is always authorized
        return true;
    }
    match caller {
        // a contract on the same chain is authorized; cross-chain callers are not
        AgentId::Contract(contract_id) => contract_id.chain_id == provider.chain_id(),
        AgentId::Address(_) => match caller.to_bytes() {
            Ok(caller_bytes) => deploy_authorizations().contains(provider.state(), &caller_bytes),
            Err(_) => false,
        },
    }
}

/// Registers `record` under the identifier derived from its name and calls the contract's
/// `init` entry point.
///
/// The record is written before `init` runs, since a contract may inspect its own metadata
/// during initialization. If `init` fails, the record is deleted again — the registry returns
/// to its pre-deployment state, and a retried deployment with the same name is
/// indistinguishable from a first attempt.
pub(crate) fn store_and_init_contract<P>(
    provider: &mut P,
    record: &ContractRecord,
    init_args: CallArgs,
) -> Result<(), Error>
where
    P: RuntimeProvider + StorageProvider,
{
    let hname = Hname::from_name(record.name());
    let key = hname.to_bytes_fixed();
    let registry = contract_registry();
    if registry.contains(provider.state(), &key) {
        return Err(Error::ContractAlreadyExists {
            name: record.name().to_string(),
            hname,
        });
    }
    registry.insert(provider.state_mut(), &key, record.to_bytes()?);
    if let Err(call_error) = provider.call(hname, METHOD_INIT, init_args, None) {
        // call to 'init' failed: delete the record
        registry.remove(provider.state_mut(), &key);
        warn!(
            name = record.name(),
            %hname,
            error = %call_error,
            "contract initialization failed; registration rolled back"
        );
        return Err(Error::InitFailed {
            name: record.name().to_string(),
            hname,
            source: call_error,
        });
    }
    Ok(())
}

/// Grants `agent_id` permission to deploy contracts. Chain owner only.
pub(crate) fn grant_deploy_permission<P>(provider: &mut P, agent_id: AgentId) -> Result<(), Error>
where
    P: RuntimeProvider + StorageProvider,
{
    if !check_authorization_by_chain_owner(provider.state(), &provider.caller()) {
        return Err(Error::Unauthorized);
    }
    let key = agent_id.to_bytes()?;
    deploy_authorizations().insert(provider.state_mut(), &key, vec![PERMISSION_SENTINEL]);
    Ok(())
}

/// Revokes a previously granted deploy permission. Chain owner only.
pub(crate) fn revoke_deploy_permission<P>(provider: &mut P, agent_id: AgentId) -> Result<(), Error>
where
    P: RuntimeProvider + StorageProvider,
{
    if !check_authorization_by_chain_owner(provider.state(), &provider.caller()) {
        return Err(Error::Unauthorized);
    }
    let key = agent_id.to_bytes()?;
    deploy_authorizations().remove(provider.state_mut(), &key);
    Ok(())
}

/// Writes the chain's global variables at genesis and registers the root registry's own
/// record. Fails if the chain is already initialized.
pub(crate) fn init_chain<S: StateAccess + ?Sized>(
    state: &mut S,
    init: &ChainInit,
) -> Result<(), Error> {
    if state.has(CHAIN_ID_KEY.as_bytes()) {
        return Err(Error::ChainAlreadyInitialized);
    }
    set_scalar(state, CHAIN_ID_KEY, init.chain_id)?;
    set_scalar(state, CHAIN_OWNER_ID_KEY, init.chain_owner_id)?;
    set_scalar(state, CHAIN_COLOR_KEY, init.chain_color)?;
    set_scalar(state, CHAIN_ADDRESS_KEY, init.chain_address)?;
    set_scalar(state, DESCRIPTION_KEY, init.description.clone())?;
    if let Some(fee_color) = init.fee_color {
        set_scalar(state, FEE_COLOR_KEY, fee_color)?;
    }
    if let Some(default_owner_fee) = init.default_owner_fee {
        set_scalar(state, DEFAULT_OWNER_FEE_KEY, default_owner_fee)?;
    }
    if let Some(default_validator_fee) = init.default_validator_fee {
        set_scalar(state, DEFAULT_VALIDATOR_FEE_KEY, default_validator_fee)?;
    }
    let root_record = ContractRecord::root_placeholder();
    contract_registry().insert(
        state,
        &ROOT_HNAME.to_bytes_fixed(),
        root_record.to_bytes()?,
    );
    Ok(())
}
