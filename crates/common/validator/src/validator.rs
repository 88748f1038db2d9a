use std::{
    sync::Arc,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use ream_consensus_misc::committee_assignment::CommitteeAssignment;
use ream_metrics::VoteMetrics;
use ream_network_spec::networks::NetworkSpec;
use tokio::{
    task::JoinSet,
    time::{Instant, MissedTickBehavior, interval_at},
};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::{
    attestation_duty::{AttestationDutyService, DutyOutcome},
    beacon_node::{BeaconNode, CommitteeAssignmentSource},
    signer::Signer,
    timing::SlotTimingGate,
};

/// Drives attestation duties for a set of validator keys, one slot at a time.
pub struct ValidatorService<B, S, M> {
    pub beacon_node: Arc<B>,
    pub network_spec: Arc<NetworkSpec>,
    pub public_keys: Vec<Vec<u8>>,
    duty_service: AttestationDutyService<B, S, M>,
}

impl<B, S, M> ValidatorService<B, S, M>
where
    B: BeaconNode + CommitteeAssignmentSource + 'static,
    S: Signer + 'static,
    M: VoteMetrics + 'static,
{
    pub fn new(
        beacon_node: Arc<B>,
        signer: Arc<S>,
        metrics: Arc<M>,
        network_spec: Arc<NetworkSpec>,
        attestation_delay: Duration,
        public_keys: Vec<Vec<u8>>,
    ) -> Self {
        let timing_gate = SlotTimingGate::from_network_spec(&network_spec)
            .with_attestation_delay(attestation_delay);
        Self {
            duty_service: AttestationDutyService::new(
                beacon_node.clone(),
                signer,
                metrics,
                timing_gate,
            ),
            beacon_node,
            network_spec,
            public_keys,
        }
    }

    /// Run until `shutdown` is cancelled, then wait for in-flight duties to finish.
    pub async fn start(self, shutdown: CancellationToken) -> anyhow::Result<()> {
        self.network_spec.validate().map_err(anyhow::Error::msg)?;
        let seconds_per_slot = self.network_spec.seconds_per_slot;
        let genesis_instant = UNIX_EPOCH + Duration::from_secs(self.network_spec.genesis_time);

        if let Ok(until_genesis) = genesis_instant.duration_since(SystemTime::now()) {
            info!("Waiting {}s for genesis", until_genesis.as_secs());
            tokio::select! {
                _ = shutdown.cancelled() => return Ok(()),
                _ = tokio::time::sleep(until_genesis) => {}
            }
        }

        let elapsed = elapsed_since(genesis_instant, SystemTime::now());
        let mut slot = elapsed.as_secs() / seconds_per_slot;
        let mut interval = {
            let interval_start =
                Instant::now() - (elapsed - Duration::from_secs(slot * seconds_per_slot));
            interval_at(interval_start, Duration::from_secs(seconds_per_slot))
        };
        interval.set_missed_tick_behavior(MissedTickBehavior::Burst);

        let mut epoch = None;
        let mut assignments = vec![];
        let mut duties = JoinSet::new();

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    info!("Shutting down validator service");
                    break;
                }
                _ = interval.tick() => {
                    let current_epoch = self.network_spec.compute_epoch_at_slot(slot);
                    if epoch != Some(current_epoch) {
                        info!("Current Epoch: {current_epoch}");
                        if let Some(fetched) = self.fetch_assignments(current_epoch).await {
                            assignments = fetched;
                            epoch = Some(current_epoch);
                        }
                    }
                    self.on_slot(slot, &assignments, &shutdown, &mut duties);
                    slot += 1;
                }
                Some(result) = duties.join_next(), if !duties.is_empty() => {
                    if let Err(err) = result {
                        error!("Attestation duty task failed: {err}");
                    }
                }
            }
        }

        while let Some(result) = duties.join_next().await {
            if let Err(err) = result {
                error!("Attestation duty task failed: {err}");
            }
        }
        Ok(())
    }

    async fn fetch_assignments(&self, epoch: u64) -> Option<Vec<CommitteeAssignment>> {
        match self
            .beacon_node
            .committee_assignments(epoch, &self.public_keys)
            .await
        {
            Ok(assignments) => Some(assignments),
            Err(err) => {
                warn!("Could not fetch committee assignments for epoch {epoch}: {err:?}");
                None
            }
        }
    }

    /// Spawn one attestation duty per assignment scheduled for `slot`.
    fn on_slot(
        &self,
        slot: u64,
        assignments: &[CommitteeAssignment],
        shutdown: &CancellationToken,
        duties: &mut JoinSet<DutyOutcome>,
    ) {
        info!("Current Slot: {slot}");
        for assignment in assignments.iter().filter(|assignment| assignment.slot == slot) {
            let duty_service = self.duty_service.clone();
            let assignment = assignment.clone();
            let shutdown = shutdown.clone();
            duties.spawn(async move {
                duty_service
                    .attest_to_block_head(slot, &assignment, &shutdown)
                    .await
            });
        }
    }
}

/// Time from `genesis` to `now`, zero if the wall clock reads earlier than `genesis`.
fn elapsed_since(genesis: SystemTime, now: SystemTime) -> Duration {
    now.duration_since(genesis).unwrap_or_default()
}
