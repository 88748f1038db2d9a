use std::{fmt, str::FromStr};

use alloy_primitives::{FixedBytes, hex};
use blst::min_pk::PublicKey as BlstPublicKey;
use serde::{Deserialize, Serialize};

use crate::errors::BLSError;

#[derive(Debug, PartialEq, Clone, Default, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PubKey {
    pub inner: FixedBytes<48>,
}

impl PubKey {
    pub fn to_bytes(&self) -> &[u8] {
        self.inner.as_slice()
    }

    pub fn to_blst_pubkey(&self) -> Result<BlstPublicKey, BLSError> {
        Ok(BlstPublicKey::from_bytes(self.to_bytes())?)
    }
}

impl From<BlstPublicKey> for PubKey {
    fn from(value: BlstPublicKey) -> Self {
        PubKey {
            inner: FixedBytes::from(value.to_bytes()),
        }
    }
}

impl TryFrom<&[u8]> for PubKey {
    type Error = BLSError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Ok(PubKey {
            inner: FixedBytes::try_from(bytes).map_err(|_| BLSError::InvalidByteLength)?,
        })
    }
}

impl FromStr for PubKey {
    type Err = BLSError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s).map_err(|_| BLSError::InvalidHexString)?;
        PubKey::try_from(bytes.as_slice())
    }
}

impl fmt::Display for PubKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}
