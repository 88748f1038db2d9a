use serde::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode};

use crate::attestation_data::AttestationData;

/// A single validator's vote, as submitted to the beacon node.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize, Encode, Decode)]
pub struct Attestation {
    pub data: AttestationData,
    #[serde(with = "serde_utils::hex_vec")]
    pub aggregation_bits: Vec<u8>,
    #[serde(with = "serde_utils::hex_vec")]
    pub custody_bits: Vec<u8>,
    #[serde(with = "serde_utils::hex_vec")]
    pub signature: Vec<u8>,
}
