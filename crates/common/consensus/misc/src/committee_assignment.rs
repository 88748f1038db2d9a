use serde::{Deserialize, Serialize};

/// A validator's attester duty for one slot, as resolved by the beacon node.
///
/// The order of `committee` is fixed by consensus for the whole epoch; a member's position in it
/// is the bit it sets in the aggregation bitfield.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct CommitteeAssignment {
    #[serde(with = "serde_utils::hex_vec")]
    pub public_key: Vec<u8>,
    #[serde(with = "serde_utils::quoted_u64")]
    pub slot: u64,
    #[serde(with = "serde_utils::quoted_u64")]
    pub shard: u64,
    #[serde(with = "serde_utils::quoted_u64_vec")]
    pub committee: Vec<u64>,
}

impl CommitteeAssignment {
    /// Zero-based position of `validator_index` within the committee.
    pub fn committee_position(&self, validator_index: u64) -> Option<usize> {
        self.committee
            .iter()
            .position(|member| *member == validator_index)
    }
}
