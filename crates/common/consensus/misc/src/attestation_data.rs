use serde::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode};

/// Reference linking a shard chain's state back into the vote.
#[derive(Debug, PartialEq, Eq, Clone, Default, Serialize, Deserialize, Encode, Decode)]
pub struct Crosslink {
    #[serde(with = "serde_utils::quoted_u64")]
    pub shard: u64,
    #[serde(with = "serde_utils::hex_vec")]
    pub data_root: Vec<u8>,
}

/// The chain state a validator votes on.
///
/// Roots are opaque byte sequences. On a live network they are 32-byte hashes, but nothing in the
/// attestation pipeline depends on their length.
#[derive(Debug, PartialEq, Eq, Clone, Default, Serialize, Deserialize, Encode, Decode)]
pub struct AttestationData {
    /// LMD GHOST vote
    #[serde(with = "serde_utils::hex_vec")]
    pub beacon_block_root: Vec<u8>,

    /// FFG vote
    #[serde(with = "serde_utils::hex_vec")]
    pub source_root: Vec<u8>,
    #[serde(with = "serde_utils::hex_vec")]
    pub target_root: Vec<u8>,
    #[serde(with = "serde_utils::quoted_u64")]
    pub source_epoch: u64,

    pub crosslink: Crosslink,
}
