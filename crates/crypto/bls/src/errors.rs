use blst::BLST_ERROR;
use thiserror::Error;

#[derive(Error, PartialEq, Debug)]
pub enum BLSError {
    #[error("blst error: {0:?}")]
    BlstError(BLST_ERROR),

    #[error("Invalid private key")]
    InvalidPrivateKey,

    #[error("Invalid hex string")]
    InvalidHexString,

    #[error("Invalid byte length")]
    InvalidByteLength,
}

impl From<BLST_ERROR> for BLSError {
    fn from(err: BLST_ERROR) -> Self {
        BLSError::BlstError(err)
    }
}
