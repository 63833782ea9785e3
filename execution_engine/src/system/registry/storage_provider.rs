use crate::storage::StateAccess;

/// Provider of the mutable state view scoped to the current chain.
pub trait StorageProvider {
    /// The concrete state view handed to this execution.
    type State: StateAccess;

    /// Read access to chain state.
    fn state(&self) -> &Self::State;

    /// Write access to chain state.
    fn state_mut(&mut self) -> &mut Self::State;
}
