use std::sync::Arc;

use alloy_primitives::hex;
use ream_consensus_misc::{attestation::Attestation, committee_assignment::CommitteeAssignment};
use ream_metrics::VoteMetrics;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use crate::{
    attestation::build_attestation, beacon_node::BeaconNode, duty::resolve_duty,
    errors::DutyError, signer::Signer, submitter::submit_attestation, timing::SlotTimingGate,
};

/// Where an attestation duty is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DutyStage {
    WaitingForSlot,
    ResolvingIndex,
    FetchingData,
    Building,
    Submitting,
    Done,
}

/// Result of a single attestation duty.
#[derive(Debug)]
pub enum DutyOutcome {
    Submitted {
        validator_index: u64,
        attestation: Attestation,
    },
    Aborted {
        stage: DutyStage,
        reason: DutyError,
    },
}

impl DutyOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, Self::Submitted { .. })
    }
}

/// Runs attestation duties for the validators behind `signer`.
///
/// Every call to [AttestationDutyService::attest_to_block_head] is independent: duties for
/// different validators or slots may run concurrently on clones of the same service, and share
/// nothing but the metrics sink.
pub struct AttestationDutyService<B, S, M> {
    beacon_node: Arc<B>,
    signer: Arc<S>,
    metrics: Arc<M>,
    timing_gate: SlotTimingGate,
}

impl<B, S, M> Clone for AttestationDutyService<B, S, M> {
    fn clone(&self) -> Self {
        Self {
            beacon_node: self.beacon_node.clone(),
            signer: self.signer.clone(),
            metrics: self.metrics.clone(),
            timing_gate: self.timing_gate,
        }
    }
}

impl<B, S, M> AttestationDutyService<B, S, M>
where
    B: BeaconNode,
    S: Signer,
    M: VoteMetrics,
{
    pub fn new(
        beacon_node: Arc<B>,
        signer: Arc<S>,
        metrics: Arc<M>,
        timing_gate: SlotTimingGate,
    ) -> Self {
        Self {
            beacon_node,
            signer,
            metrics,
            timing_gate,
        }
    }

    pub fn timing_gate(&self) -> &SlotTimingGate {
        &self.timing_gate
    }

    /// Attest to the head of the chain at `slot` for the validator owning `assignment`.
    ///
    /// Waits for the attestation moment of the slot first. Shutdown is only observed during that
    /// wait; once the RPC stages have started the duty runs to completion or failure. Failures are
    /// logged here and never propagate further than the returned outcome.
    pub async fn attest_to_block_head(
        &self,
        slot: u64,
        assignment: &CommitteeAssignment,
        shutdown: &CancellationToken,
    ) -> DutyOutcome {
        let mut stage = DutyStage::WaitingForSlot;
        match self
            .run_duty(slot, assignment, shutdown, &mut stage)
            .await
        {
            Ok((validator_index, attestation)) => DutyOutcome::Submitted {
                validator_index,
                attestation,
            },
            Err(reason) => {
                let public_key = hex::encode_prefixed(&assignment.public_key);
                match &reason {
                    DutyError::ShutdownRequested => debug!(slot, %public_key, "{reason}"),
                    _ => error!(slot, %public_key, ?stage, "{reason}"),
                }
                DutyOutcome::Aborted { stage, reason }
            }
        }
    }

    async fn run_duty(
        &self,
        slot: u64,
        assignment: &CommitteeAssignment,
        shutdown: &CancellationToken,
        stage: &mut DutyStage,
    ) -> Result<(u64, Attestation), DutyError> {
        self.timing_gate.wait(slot, shutdown).await?;

        *stage = DutyStage::ResolvingIndex;
        let validator_index = self
            .beacon_node
            .validator_index(&assignment.public_key)
            .await
            .map_err(DutyError::IndexResolutionFailed)?;

        *stage = DutyStage::FetchingData;
        let data = self
            .beacon_node
            .attestation_data(slot, assignment.shard)
            .await
            .map_err(|cause| DutyError::DataFetchFailed { slot, cause })?;

        *stage = DutyStage::Building;
        let duty = resolve_duty(assignment, validator_index)?;
        let attestation = build_attestation(
            data,
            duty.committee_size,
            duty.committee_position,
            self.signer.as_ref(),
            &assignment.public_key,
        )?;

        *stage = DutyStage::Submitting;
        submit_attestation(
            self.beacon_node.as_ref(),
            self.metrics.as_ref(),
            &attestation,
            slot,
            validator_index,
        )
        .await?;

        *stage = DutyStage::Done;
        Ok((validator_index, attestation))
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use ream_consensus_misc::attestation_data::{AttestationData, Crosslink};
    use ream_metrics::RecordedVoteMetrics;
    use tracing_test::traced_test;

    use super::*;
    use crate::test_utils::{BeaconNodeCall, FailingSigner, MockBeaconNode, StubSigner};

    const SLOT: u64 = 30;

    fn attestation_data() -> AttestationData {
        AttestationData {
            beacon_block_root: b"A".to_vec(),
            source_root: b"C".to_vec(),
            target_root: b"B".to_vec(),
            source_epoch: 3,
            crosslink: Crosslink {
                shard: 5,
                data_root: b"D".to_vec(),
            },
        }
    }

    fn assignment(committee: Vec<u64>) -> CommitteeAssignment {
        CommitteeAssignment {
            public_key: vec![0xab; 48],
            slot: SLOT,
            shard: 5,
            committee,
        }
    }

    /// A gate whose attestation moment for every slot is already in the past.
    fn elapsed_gate() -> SlotTimingGate {
        SlotTimingGate::new(0, 12, Duration::ZERO)
    }

    fn service<S: Signer>(
        beacon_node: MockBeaconNode,
        signer: S,
        timing_gate: SlotTimingGate,
    ) -> (
        AttestationDutyService<MockBeaconNode, S, RecordedVoteMetrics>,
        Arc<MockBeaconNode>,
        Arc<RecordedVoteMetrics>,
    ) {
        let beacon_node = Arc::new(beacon_node);
        let metrics = Arc::new(RecordedVoteMetrics::default());
        let service = AttestationDutyService::new(
            beacon_node.clone(),
            Arc::new(signer),
            metrics.clone(),
            timing_gate,
        );
        (service, beacon_node, metrics)
    }

    #[tokio::test]
    #[traced_test]
    async fn test_attest_to_block_head() {
        let (service, beacon_node, metrics) = service(
            MockBeaconNode::new(7, attestation_data()),
            StubSigner,
            elapsed_gate(),
        );

        let outcome = service
            .attest_to_block_head(
                SLOT,
                &assignment(vec![0, 3, 4, 2, 7, 6, 8, 9, 10]),
                &CancellationToken::new(),
            )
            .await;

        let DutyOutcome::Submitted {
            validator_index,
            attestation,
        } = outcome
        else {
            panic!("duty was aborted: {outcome:?}");
        };
        assert_eq!(validator_index, 7);
        assert_eq!(attestation.data, attestation_data());
        assert_eq!(attestation.aggregation_bits, vec![0b0000_1000, 0]);
        assert_eq!(attestation.custody_bits, vec![0, 0]);
        assert_eq!(attestation.signature, b"signed".to_vec());
        assert_eq!(beacon_node.submitted(), vec![attestation]);
        assert_eq!(
            beacon_node.calls(),
            vec![
                BeaconNodeCall::ValidatorIndex,
                BeaconNodeCall::AttestationData {
                    slot: SLOT,
                    shard: 5
                },
                BeaconNodeCall::SubmitAttestation,
            ]
        );
        assert_eq!(metrics.last_vote(7), Some(SLOT));
        assert_eq!(metrics.seen(), 1);
        assert!(logs_contain("Attested latest head"));
    }

    #[tokio::test]
    async fn test_large_committee() {
        let (service, beacon_node, _) = service(
            MockBeaconNode::new(0, attestation_data()),
            StubSigner,
            elapsed_gate(),
        );

        let outcome = service
            .attest_to_block_head(
                SLOT,
                &assignment((0..111).collect()),
                &CancellationToken::new(),
            )
            .await;

        assert!(outcome.is_submitted());
        let submitted = beacon_node.submitted();
        assert_eq!(submitted[0].aggregation_bits.len(), 14);
        assert_eq!(submitted[0].aggregation_bits[0], 0b1000_0000);
        assert_eq!(submitted[0].custody_bits, vec![0; 14]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_calls_before_attestation_delay() {
        let genesis_time = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time after epoch")
            .as_secs();
        let (service, beacon_node, _) = service(
            MockBeaconNode::new(7, attestation_data()),
            StubSigner,
            SlotTimingGate::new(genesis_time, 12, Duration::from_secs(4)),
        );

        let duty = {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .attest_to_block_head(
                        0,
                        &assignment(vec![0, 3, 4, 2, 7, 6, 8, 9, 10]),
                        &CancellationToken::new(),
                    )
                    .await
            })
        };
        tokio::time::sleep(Duration::from_secs(2)).await;

        assert!(beacon_node.calls().is_empty());
        assert!(beacon_node.submitted().is_empty());

        let outcome = duty.await.expect("duty task completes");
        assert!(outcome.is_submitted());
        assert_eq!(beacon_node.calls().len(), 3);
    }

    #[tokio::test]
    #[traced_test]
    async fn test_index_resolution_failure() {
        let (service, beacon_node, metrics) = service(
            MockBeaconNode::new(7, attestation_data()).with_failing_index(),
            StubSigner,
            elapsed_gate(),
        );

        let outcome = service
            .attest_to_block_head(
                SLOT,
                &assignment(vec![0, 3, 4, 2, 7, 6, 8, 9, 10]),
                &CancellationToken::new(),
            )
            .await;

        assert!(matches!(
            outcome,
            DutyOutcome::Aborted {
                stage: DutyStage::ResolvingIndex,
                reason: DutyError::IndexResolutionFailed(_),
            }
        ));
        assert_eq!(beacon_node.calls(), vec![BeaconNodeCall::ValidatorIndex]);
        assert_eq!(metrics.seen(), 0);
        assert!(logs_contain("Could not fetch validator index"));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_data_fetch_failure() {
        let (service, beacon_node, metrics) = service(
            MockBeaconNode::new(7, attestation_data()).with_failing_data(),
            StubSigner,
            elapsed_gate(),
        );

        let outcome = service
            .attest_to_block_head(
                SLOT,
                &assignment(vec![0, 3, 4, 2, 7, 6, 8, 9, 10]),
                &CancellationToken::new(),
            )
            .await;

        assert!(matches!(
            outcome,
            DutyOutcome::Aborted {
                stage: DutyStage::FetchingData,
                reason: DutyError::DataFetchFailed { slot: SLOT, .. },
            }
        ));
        assert!(
            !beacon_node
                .calls()
                .contains(&BeaconNodeCall::SubmitAttestation)
        );
        assert_eq!(metrics.seen(), 0);
        assert!(logs_contain("Could not request attestation to sign at slot 30"));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_submission_failure() {
        let (service, beacon_node, metrics) = service(
            MockBeaconNode::new(7, attestation_data()).with_failing_submission(),
            StubSigner,
            elapsed_gate(),
        );

        let outcome = service
            .attest_to_block_head(
                SLOT,
                &assignment(vec![0, 3, 4, 2, 7, 6, 8, 9, 10]),
                &CancellationToken::new(),
            )
            .await;

        assert!(matches!(
            outcome,
            DutyOutcome::Aborted {
                stage: DutyStage::Submitting,
                reason: DutyError::SubmissionFailed(_),
            }
        ));
        assert_eq!(beacon_node.calls().len(), 3);
        assert_eq!(metrics.last_vote(7), None);
        assert_eq!(metrics.seen(), 0);
        assert!(logs_contain("Could not submit attestation to beacon node"));
        assert!(!logs_contain("Attested latest head"));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_validator_not_in_committee() {
        let (service, beacon_node, _) = service(
            MockBeaconNode::new(5, attestation_data()),
            StubSigner,
            elapsed_gate(),
        );

        let outcome = service
            .attest_to_block_head(
                SLOT,
                &assignment(vec![0, 3, 4, 2, 7, 6, 8, 9, 10]),
                &CancellationToken::new(),
            )
            .await;

        assert!(matches!(
            outcome,
            DutyOutcome::Aborted {
                stage: DutyStage::Building,
                reason: DutyError::NotInCommittee { validator_index: 5 },
            }
        ));
        assert!(beacon_node.submitted().is_empty());
        assert!(logs_contain("Validator index 5 not found in committee"));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_signing_failure_is_logged() {
        let (service, beacon_node, _) = service(
            MockBeaconNode::new(7, attestation_data()),
            FailingSigner,
            elapsed_gate(),
        );

        let outcome = service
            .attest_to_block_head(
                SLOT,
                &assignment(vec![0, 3, 4, 2, 7, 6, 8, 9, 10]),
                &CancellationToken::new(),
            )
            .await;

        assert!(matches!(
            outcome,
            DutyOutcome::Aborted {
                stage: DutyStage::Building,
                reason: DutyError::BuildFailed(_),
            }
        ));
        assert!(beacon_node.submitted().is_empty());
        assert!(logs_contain("Could not build attestation"));
    }

    #[tokio::test]
    async fn test_shutdown_before_slot() {
        let (service, beacon_node, _) = service(
            MockBeaconNode::new(7, attestation_data()),
            StubSigner,
            elapsed_gate(),
        );
        let shutdown = CancellationToken::new();
        shutdown.cancel();

        let outcome = service
            .attest_to_block_head(
                SLOT,
                &assignment(vec![0, 3, 4, 2, 7, 6, 8, 9, 10]),
                &shutdown,
            )
            .await;

        assert!(matches!(
            outcome,
            DutyOutcome::Aborted {
                stage: DutyStage::WaitingForSlot,
                reason: DutyError::ShutdownRequested,
            }
        ));
        assert!(beacon_node.calls().is_empty());
    }

    #[tokio::test]
    async fn test_failed_duty_does_not_affect_others() {
        let metrics = Arc::new(RecordedVoteMetrics::default());
        let failing = AttestationDutyService::new(
            Arc::new(MockBeaconNode::new(3, attestation_data()).with_failing_submission()),
            Arc::new(StubSigner),
            metrics.clone(),
            elapsed_gate(),
        );
        let healthy = AttestationDutyService::new(
            Arc::new(MockBeaconNode::new(7, attestation_data())),
            Arc::new(StubSigner),
            metrics.clone(),
            elapsed_gate(),
        );
        let committee = assignment(vec![0, 3, 4, 2, 7, 6, 8, 9, 10]);
        let shutdown = CancellationToken::new();

        let (failed, submitted) = tokio::join!(
            failing.attest_to_block_head(SLOT, &committee, &shutdown),
            healthy.attest_to_block_head(SLOT, &committee, &shutdown),
        );

        assert!(!failed.is_submitted());
        assert!(submitted.is_submitted());
        assert_eq!(metrics.last_vote(3), None);
        assert_eq!(metrics.last_vote(7), Some(SLOT));
        assert_eq!(metrics.seen(), 1);
    }
}
