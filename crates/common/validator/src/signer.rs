use std::collections::HashMap;

use anyhow::anyhow;
use ream_bls::{PrivateKey, PubKey, traits::Signable};

/// Signs messages on behalf of the validators this client manages.
pub trait Signer: Send + Sync {
    fn sign(&self, public_key: &[u8], message: &[u8]) -> anyhow::Result<Vec<u8>>;
}

/// [Signer] holding BLS secret keys in memory.
#[derive(Debug, Default)]
pub struct LocalSigner {
    keys: HashMap<PubKey, PrivateKey>,
}

impl LocalSigner {
    pub fn new(private_keys: Vec<PrivateKey>) -> anyhow::Result<Self> {
        let keys = private_keys
            .into_iter()
            .map(|private_key| -> anyhow::Result<_> {
                Ok((private_key.public_key()?, private_key))
            })
            .collect::<anyhow::Result<HashMap<_, _>>>()?;
        Ok(Self { keys })
    }

    pub fn public_keys(&self) -> Vec<PubKey> {
        self.keys.keys().cloned().collect()
    }
}

impl Signer for LocalSigner {
    fn sign(&self, public_key: &[u8], message: &[u8]) -> anyhow::Result<Vec<u8>> {
        let public_key = PubKey::try_from(public_key)?;
        let private_key = self
            .keys
            .get(&public_key)
            .ok_or_else(|| anyhow!("No secret key for validator {public_key}"))?;
        Ok(private_key.sign(message)?.to_bytes().to_vec())
    }
}
