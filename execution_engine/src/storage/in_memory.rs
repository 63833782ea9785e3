//! In-memory implementation of chain state. No state is saved to disk. This is mostly used
//! for testing purposes.

use std::collections::BTreeMap;

use super::StateAccess;

/// Chain state implemented purely in memory, backed by an ordered map.
#[derive(Clone, Default, Debug)]
pub struct InMemoryState {
    data: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl InMemoryState {
    /// Creates an empty state.
    pub fn new() -> InMemoryState {
        InMemoryState::default()
    }

    /// Creates a state from a given set of key-value pairs.
    pub fn from_pairs<I>(pairs: I) -> InMemoryState
    where
        I: IntoIterator<Item = (Vec<u8>, Vec<u8>)>,
    {
        InMemoryState {
            data: pairs.into_iter().collect(),
        }
    }

    /// Returns the number of stored entries.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if no entries are stored.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl StateAccess for InMemoryState {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.data.get(key).cloned()
    }

    fn set(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.data.insert(key, value);
    }

    fn delete(&mut self, key: &[u8]) {
        self.data.remove(key);
    }

    fn has(&self, key: &[u8]) -> bool {
        self.data.contains_key(key)
    }

    fn keys_with_prefix(&self, prefix: &[u8]) -> Vec<Vec<u8>> {
        self.data
            .range(prefix.to_vec()..)
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, _)| key.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_set_delete_has() {
        let mut state = InMemoryState::new();
        assert!(!state.has(b"k"));
        assert_eq!(state.get(b"k"), None);

        state.set(b"k".to_vec(), b"v1".to_vec());
        assert!(state.has(b"k"));
        assert_eq!(state.get(b"k"), Some(b"v1".to_vec()));

        state.set(b"k".to_vec(), b"v2".to_vec());
        assert_eq!(state.get(b"k"), Some(b"v2".to_vec()));

        state.delete(b"k");
        assert!(!state.has(b"k"));
        assert!(state.is_empty());
    }

    #[test]
    fn keys_with_prefix_is_ordered_and_scoped() {
        let mut state = InMemoryState::new();
        state.set(b"a/2".to_vec(), vec![]);
        state.set(b"a/1".to_vec(), vec![]);
        state.set(b"b/1".to_vec(), vec![]);
        state.set(b"a".to_vec(), vec![]);

        assert_eq!(
            state.keys_with_prefix(b"a/"),
            vec![b"a/1".to_vec(), b"a/2".to_vec()]
        );
        assert_eq!(
            state.keys_with_prefix(b"a"),
            vec![b"a".to_vec(), b"a/1".to_vec(), b"a/2".to_vec()]
        );
        assert!(state.keys_with_prefix(b"c").is_empty());
    }
}
