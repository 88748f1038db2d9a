use alloy_primitives::FixedBytes;
use blst::{BLST_ERROR, min_pk::Signature as BlstSignature};
use serde::{Deserialize, Serialize};

use crate::{constants::DST, errors::BLSError, pubkey::PubKey, traits::Verifiable};

#[derive(Debug, PartialEq, Clone, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BLSSignature {
    pub inner: FixedBytes<96>,
}

impl BLSSignature {
    pub fn to_bytes(&self) -> &[u8] {
        self.inner.as_slice()
    }

    pub fn to_blst_signature(&self) -> Result<BlstSignature, BLSError> {
        Ok(BlstSignature::from_bytes(self.to_bytes())?)
    }
}

impl From<BlstSignature> for BLSSignature {
    fn from(value: BlstSignature) -> Self {
        BLSSignature {
            inner: FixedBytes::from(value.to_bytes()),
        }
    }
}

impl Verifiable for BLSSignature {
    type Error = BLSError;

    fn verify(&self, pubkey: &PubKey, message: &[u8]) -> Result<bool, BLSError> {
        let signature = self.to_blst_signature()?;
        let public_key = pubkey.to_blst_pubkey()?;

        Ok(
            signature.verify(true, message, DST, &[], &public_key, false)
                == BLST_ERROR::BLST_SUCCESS,
        )
    }
}
