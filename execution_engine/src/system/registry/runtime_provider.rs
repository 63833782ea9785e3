use vellum_types::{AgentId, CallArgs, ChainId, Color, Hname};

use crate::execution;

/// Tokens attached to a cross-contract call.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct TokenTransfer {
    /// The color the tokens are denominated in.
    pub color: Color,
    /// The number of tokens transferred.
    pub amount: u64,
}

/// Provider of the sandbox's identity and call functionality, scoped to one invocation.
pub trait RuntimeProvider {
    /// The agent on whose behalf the current entry point runs.
    fn caller(&self) -> AgentId;

    /// Identifier of the chain the current execution is applied to.
    fn chain_id(&self) -> ChainId;

    /// The agent that owns the chain.
    fn chain_owner_id(&self) -> AgentId;

    /// Synchronously calls `entry_point` of the contract `target` on the current chain.
    /// Control returns only after the called contract has fully completed or failed.
    fn call(
        &mut self,
        target: Hname,
        entry_point: &str,
        args: CallArgs,
        transfer: Option<TokenTransfer>,
    ) -> Result<CallArgs, execution::Error>;
}
