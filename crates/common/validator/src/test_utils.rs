use anyhow::anyhow;
use async_trait::async_trait;
use parking_lot::Mutex;
use ream_consensus_misc::{
    attestation::Attestation, attestation_data::AttestationData,
    committee_assignment::CommitteeAssignment,
};

use crate::{
    beacon_node::{
        AttestationDataFetcher, AttestationPublisher, CommitteeAssignmentSource,
        ValidatorIndexResolver,
    },
    signer::Signer,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BeaconNodeCall {
    ValidatorIndex,
    AttestationData { slot: u64, shard: u64 },
    SubmitAttestation,
    CommitteeAssignments { epoch: u64 },
}

/// Deterministic beacon node that records every call made to it.
#[derive(Debug)]
pub struct MockBeaconNode {
    validator_index: Option<u64>,
    attestation_data: Option<AttestationData>,
    accept_submissions: bool,
    assignments: Vec<CommitteeAssignment>,
    calls: Mutex<Vec<BeaconNodeCall>>,
    submitted: Mutex<Vec<Attestation>>,
}

impl Default for MockBeaconNode {
    fn default() -> Self {
        Self {
            validator_index: Some(0),
            attestation_data: Some(AttestationData::default()),
            accept_submissions: true,
            assignments: vec![],
            calls: Mutex::new(vec![]),
            submitted: Mutex::new(vec![]),
        }
    }
}

impl MockBeaconNode {
    pub fn new(validator_index: u64, attestation_data: AttestationData) -> Self {
        Self {
            validator_index: Some(validator_index),
            attestation_data: Some(attestation_data),
            ..Default::default()
        }
    }

    pub fn with_failing_index(mut self) -> Self {
        self.validator_index = None;
        self
    }

    pub fn with_failing_data(mut self) -> Self {
        self.attestation_data = None;
        self
    }

    pub fn with_failing_submission(mut self) -> Self {
        self.accept_submissions = false;
        self
    }

    pub fn with_assignments(mut self, assignments: Vec<CommitteeAssignment>) -> Self {
        self.assignments = assignments;
        self
    }

    pub fn calls(&self) -> Vec<BeaconNodeCall> {
        self.calls.lock().clone()
    }

    pub fn submitted(&self) -> Vec<Attestation> {
        self.submitted.lock().clone()
    }
}

#[async_trait]
impl ValidatorIndexResolver for MockBeaconNode {
    async fn validator_index(&self, _public_key: &[u8]) -> anyhow::Result<u64> {
        self.calls.lock().push(BeaconNodeCall::ValidatorIndex);
        self.validator_index
            .ok_or_else(|| anyhow!("validator index unavailable"))
    }
}

#[async_trait]
impl AttestationDataFetcher for MockBeaconNode {
    async fn attestation_data(&self, slot: u64, shard: u64) -> anyhow::Result<AttestationData> {
        self.calls
            .lock()
            .push(BeaconNodeCall::AttestationData { slot, shard });
        self.attestation_data
            .clone()
            .ok_or_else(|| anyhow!("attestation data unavailable"))
    }
}

#[async_trait]
impl AttestationPublisher for MockBeaconNode {
    async fn submit_attestation(&self, attestation: &Attestation) -> anyhow::Result<()> {
        self.calls.lock().push(BeaconNodeCall::SubmitAttestation);
        if !self.accept_submissions {
            return Err(anyhow!("attestation rejected"));
        }
        self.submitted.lock().push(attestation.clone());
        Ok(())
    }
}

#[async_trait]
impl CommitteeAssignmentSource for MockBeaconNode {
    async fn committee_assignments(
        &self,
        epoch: u64,
        public_keys: &[Vec<u8>],
    ) -> anyhow::Result<Vec<CommitteeAssignment>> {
        self.calls
            .lock()
            .push(BeaconNodeCall::CommitteeAssignments { epoch });
        Ok(self
            .assignments
            .iter()
            .filter(|assignment| public_keys.contains(&assignment.public_key))
            .cloned()
            .collect())
    }
}

pub struct StubSigner;

impl Signer for StubSigner {
    fn sign(&self, _public_key: &[u8], _message: &[u8]) -> anyhow::Result<Vec<u8>> {
        Ok(b"signed".to_vec())
    }
}

pub struct FailingSigner;

impl Signer for FailingSigner {
    fn sign(&self, _public_key: &[u8], _message: &[u8]) -> anyhow::Result<Vec<u8>> {
        Err(anyhow!("no secret key"))
    }
}
