//! An ordered map layered on a keyed sub-namespace of chain state.

use super::StateAccess;

/// Separator between a map's name and its element keys. Map names must not contain this byte.
const SEPARATOR: u8 = b'#';

/// A keyed container over a flat key-value state: every element of the map lives under
/// `name ++ '#' ++ element_key`. Iteration is in ascending byte order of the element keys.
///
/// The map holds no state of its own; the state handle is passed explicitly into every
/// operation.
#[derive(Clone, Debug)]
pub struct StateMap {
    prefix: Vec<u8>,
}

impl StateMap {
    /// Creates a handle to the map named `name`.
    pub fn new(name: &str) -> StateMap {
        debug_assert!(
            !name.as_bytes().contains(&SEPARATOR),
            "map name must not contain the separator byte"
        );
        let mut prefix = name.as_bytes().to_vec();
        prefix.push(SEPARATOR);
        StateMap { prefix }
    }

    fn element_key(&self, key: &[u8]) -> Vec<u8> {
        let mut result = Vec::with_capacity(self.prefix.len() + key.len());
        result.extend_from_slice(&self.prefix);
        result.extend_from_slice(key);
        result
    }

    /// Returns the value stored under `key`, if any.
    pub fn get<S: StateAccess + ?Sized>(&self, state: &S, key: &[u8]) -> Option<Vec<u8>> {
        state.get(&self.element_key(key))
    }

    /// Returns `true` if a value is stored under `key`.
    pub fn contains<S: StateAccess + ?Sized>(&self, state: &S, key: &[u8]) -> bool {
        state.has(&self.element_key(key))
    }

    /// Stores `value` under `key`, overwriting any previous value.
    pub fn insert<S: StateAccess + ?Sized>(&self, state: &mut S, key: &[u8], value: Vec<u8>) {
        state.set(self.element_key(key), value);
    }

    /// Removes the value stored under `key`. The key is removed entirely, not merely cleared.
    pub fn remove<S: StateAccess + ?Sized>(&self, state: &mut S, key: &[u8]) {
        state.delete(&self.element_key(key));
    }

    /// Returns all entries of the map in ascending byte order of the element keys. The
    /// returned keys are the element keys, with the map's namespace prefix stripped.
    pub fn iter<S: StateAccess + ?Sized>(&self, state: &S) -> Vec<(Vec<u8>, Vec<u8>)> {
        state
            .keys_with_prefix(&self.prefix)
            .into_iter()
            .filter_map(|full_key| {
                let value = state.get(&full_key)?;
                Some((full_key[self.prefix.len()..].to_vec(), value))
            })
            .collect()
    }

    /// Returns `true` if the map has no entries.
    pub fn is_empty<S: StateAccess + ?Sized>(&self, state: &S) -> bool {
        state.keys_with_prefix(&self.prefix).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryState;

    #[test]
    fn insert_get_remove() {
        let mut state = InMemoryState::new();
        let map = StateMap::new("registry");

        assert!(map.is_empty(&state));
        map.insert(&mut state, b"k1", b"v1".to_vec());
        assert_eq!(map.get(&state, b"k1"), Some(b"v1".to_vec()));
        assert!(map.contains(&state, b"k1"));
        assert!(!map.is_empty(&state));

        map.remove(&mut state, b"k1");
        assert!(!map.contains(&state, b"k1"));
        assert!(map.is_empty(&state));
        // removal deletes the underlying key entirely
        assert!(state.is_empty());
    }

    #[test]
    fn two_maps_do_not_alias() {
        let mut state = InMemoryState::new();
        let first = StateMap::new("first");
        let second = StateMap::new("second");

        first.insert(&mut state, b"k", b"1".to_vec());
        second.insert(&mut state, b"k", b"2".to_vec());

        assert_eq!(first.get(&state, b"k"), Some(b"1".to_vec()));
        assert_eq!(second.get(&state, b"k"), Some(b"2".to_vec()));

        first.remove(&mut state, b"k");
        assert_eq!(first.get(&state, b"k"), None);
        assert_eq!(second.get(&state, b"k"), Some(b"2".to_vec()));
    }

    #[test]
    fn iter_strips_prefix_and_orders_keys() {
        let mut state = InMemoryState::new();
        let map = StateMap::new("m");
        map.insert(&mut state, b"b", vec![2]);
        map.insert(&mut state, b"a", vec![1]);
        map.insert(&mut state, b"c", vec![3]);
        // an unrelated scalar key does not show up in the map
        state.set(b"scalar".to_vec(), vec![9]);

        assert_eq!(
            map.iter(&state),
            vec![
                (b"a".to_vec(), vec![1]),
                (b"b".to_vec(), vec![2]),
                (b"c".to_vec(), vec![3]),
            ]
        );
    }
}
