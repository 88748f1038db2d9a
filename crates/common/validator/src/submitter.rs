use alloy_primitives::hex;
use ream_consensus_misc::attestation::Attestation;
use ream_metrics::{VoteMetrics, VotedBlock, report_vote_metrics};
use tracing::info;

use crate::{beacon_node::AttestationPublisher, errors::DutyError};

/// Submit `attestation` once and record the vote on success.
///
/// Metrics are only touched after the beacon node accepts the attestation.
pub async fn submit_attestation<P, M>(
    publisher: &P,
    metrics: &M,
    attestation: &Attestation,
    slot: u64,
    validator_index: u64,
) -> Result<(), DutyError>
where
    P: AttestationPublisher + ?Sized,
    M: VoteMetrics,
{
    publisher
        .submit_attestation(attestation)
        .await
        .map_err(DutyError::SubmissionFailed)?;

    let voted_block = VotedBlock {
        slot,
        root: attestation.data.beacon_block_root.clone(),
    };
    report_vote_metrics(metrics, validator_index, Some(&voted_block));
    metrics.increment_seen();

    info!(
        slot,
        validator_index,
        shard = attestation.data.crosslink.shard,
        block_root = %hex::encode_prefixed(&voted_block.root),
        "Attested latest head"
    );
    Ok(())
}
