use async_trait::async_trait;
use ream_consensus_misc::{
    attestation::Attestation, attestation_data::AttestationData,
    committee_assignment::CommitteeAssignment,
};

/// Resolves a validator public key to its index in the validator registry.
#[async_trait]
pub trait ValidatorIndexResolver: Send + Sync {
    async fn validator_index(&self, public_key: &[u8]) -> anyhow::Result<u64>;
}

/// Supplies the chain state to attest to for a shard at a slot.
#[async_trait]
pub trait AttestationDataFetcher: Send + Sync {
    async fn attestation_data(&self, slot: u64, shard: u64) -> anyhow::Result<AttestationData>;
}

/// Hands a signed attestation to the network.
#[async_trait]
pub trait AttestationPublisher: Send + Sync {
    async fn submit_attestation(&self, attestation: &Attestation) -> anyhow::Result<()>;
}

/// Supplies the already computed attester duties of a set of validators for an epoch.
#[async_trait]
pub trait CommitteeAssignmentSource: Send + Sync {
    async fn committee_assignments(
        &self,
        epoch: u64,
        public_keys: &[Vec<u8>],
    ) -> anyhow::Result<Vec<CommitteeAssignment>>;
}

/// Everything an attestation duty needs from the beacon node.
pub trait BeaconNode: ValidatorIndexResolver + AttestationDataFetcher + AttestationPublisher {}

impl<T> BeaconNode for T where T: ValidatorIndexResolver + AttestationDataFetcher + AttestationPublisher
{}
