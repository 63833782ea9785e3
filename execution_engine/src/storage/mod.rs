//! Abstract access to chain state.
//!
//! The registry and every other state-transition component never touch storage directly; they
//! go through [`StateAccess`], the in-memory view of one chain's state handed to a single
//! state-transition execution. How that view is materialized (and committed afterwards) is the
//! host's concern.

/// In-memory implementation of chain state.
pub mod in_memory;
mod state_map;

pub use in_memory::InMemoryState;
pub use state_map::StateMap;

/// A mutable view of one chain's key-value state, scoped to the current state-transition
/// execution.
///
/// Keys and values are opaque byte strings. The view is in memory for the duration of one
/// invocation, so reads and writes are infallible; iteration is in ascending byte order of the
/// keys, which keeps every consumer deterministic.
pub trait StateAccess {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &[u8]) -> Option<Vec<u8>>;

    /// Stores `value` under `key`, overwriting any previous value.
    fn set(&mut self, key: Vec<u8>, value: Vec<u8>);

    /// Deletes the value stored under `key`, if any.
    fn delete(&mut self, key: &[u8]);

    /// Returns `true` if a value is stored under `key`.
    fn has(&self, key: &[u8]) -> bool {
        self.get(key).is_some()
    }

    /// Returns all keys starting with `prefix`, in ascending byte order.
    fn keys_with_prefix(&self, prefix: &[u8]) -> Vec<Vec<u8>>;
}
