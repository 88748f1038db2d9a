use alloy_primitives::B256;
use blst::min_pk::SecretKey as BlstSecretKey;
use serde::{Deserialize, Serialize};

use crate::{BLSSignature, PubKey, constants::DST, errors::BLSError, traits::Signable};

#[derive(Debug, PartialEq, Clone, Default, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrivateKey {
    pub inner: B256,
}

impl PrivateKey {
    fn to_blst_secret_key(&self) -> Result<BlstSecretKey, BLSError> {
        BlstSecretKey::from_bytes(self.inner.as_slice()).map_err(|_| BLSError::InvalidPrivateKey)
    }

    pub fn public_key(&self) -> Result<PubKey, BLSError> {
        Ok(PubKey::from(self.to_blst_secret_key()?.sk_to_pk()))
    }
}

impl Signable for PrivateKey {
    type Error = BLSError;

    fn sign(&self, message: &[u8]) -> Result<BLSSignature, Self::Error> {
        let signature = self.to_blst_secret_key()?.sign(message, DST, &[]);
        Ok(BLSSignature::from(signature))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Verifiable;

    #[test]
    fn test_sign_and_verify() {
        let private_key = PrivateKey {
            inner: B256::repeat_byte(1),
        };
        let public_key = private_key.public_key().expect("valid private key");

        let signature = private_key.sign(b"attestation").expect("signing succeeds");

        assert_eq!(signature.verify(&public_key, b"attestation"), Ok(true));
        assert_eq!(signature.verify(&public_key, b"other"), Ok(false));
    }

    #[test]
    fn test_zero_key_is_rejected() {
        let private_key = PrivateKey::default();

        assert_eq!(private_key.public_key(), Err(BLSError::InvalidPrivateKey));
        assert_eq!(private_key.sign(b"msg"), Err(BLSError::InvalidPrivateKey));
    }
}
