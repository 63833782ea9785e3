//! The persistent node identity key pair.

use ed25519_dalek::{Signature, Signer, SigningKey, VerifyingKey, SECRET_KEY_LENGTH};
use rand::rngs::OsRng;
use tracing::info;

use vellum_execution_engine::storage::StateAccess;

use crate::Error;

/// Store key under which the identity key material lives.
const NODE_IDENTITY_DB_KEY: &[u8] = b"node_identity";

/// The node's own ed25519 key pair, persisted in the node-local store.
pub struct NodeIdentity {
    signing_key: SigningKey,
}

impl NodeIdentity {
    /// Returns the stored node identity, generating and persisting a fresh key pair if none
    /// exists yet.
    ///
    /// Malformed stored key material is an error: a node must never silently regenerate its
    /// identity.
    pub fn get_or_create<S: StateAccess + ?Sized>(store: &mut S) -> Result<NodeIdentity, Error> {
        if let Some(stored) = store.get(NODE_IDENTITY_DB_KEY) {
            let secret_bytes: [u8; SECRET_KEY_LENGTH] = stored
                .as_slice()
                .try_into()
                .map_err(|_| Error::MalformedIdentity)?;
            return Ok(NodeIdentity {
                signing_key: SigningKey::from_bytes(&secret_bytes),
            });
        }
        let signing_key = SigningKey::generate(&mut OsRng);
        store.set(
            NODE_IDENTITY_DB_KEY.to_vec(),
            signing_key.to_bytes().to_vec(),
        );
        info!("node identity key pair generated");
        Ok(NodeIdentity { signing_key })
    }

    /// The public half of the identity key pair.
    pub fn public_key(&self) -> VerifyingKey {
        self.signing_key.verifying_key()
    }

    /// Signs `message` with the identity key.
    pub fn sign(&self, message: &[u8]) -> Signature {
        self.signing_key.sign(message)
    }
}

#[cfg(test)]
mod tests {
    use ed25519_dalek::Verifier;

    use vellum_execution_engine::storage::InMemoryState;

    use super::*;

    #[test]
    fn generates_and_persists_on_first_use() {
        let mut store = InMemoryState::new();
        assert!(!store.has(NODE_IDENTITY_DB_KEY));

        let identity = NodeIdentity::get_or_create(&mut store).unwrap();
        assert!(store.has(NODE_IDENTITY_DB_KEY));

        // a second read returns the same identity rather than generating a new one
        let reloaded = NodeIdentity::get_or_create(&mut store).unwrap();
        assert_eq!(identity.public_key(), reloaded.public_key());
    }

    #[test]
    fn signatures_verify_under_the_stored_key() {
        let mut store = InMemoryState::new();
        let identity = NodeIdentity::get_or_create(&mut store).unwrap();
        let signature = identity.sign(b"handshake");
        assert!(identity.public_key().verify(b"handshake", &signature).is_ok());
    }

    #[test]
    fn malformed_key_material_is_an_error() {
        let mut store = InMemoryState::new();
        store.set(NODE_IDENTITY_DB_KEY.to_vec(), vec![1, 2, 3]);
        assert!(matches!(
            NodeIdentity::get_or_create(&mut store),
            Err(Error::MalformedIdentity)
        ));
        // the malformed material is left in place for operator inspection
        assert_eq!(store.get(NODE_IDENTITY_DB_KEY), Some(vec![1, 2, 3]));
    }
}
