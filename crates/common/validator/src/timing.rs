use std::time::{Duration, SystemTime, UNIX_EPOCH};

use ream_network_spec::networks::NetworkSpec;
use tokio_util::sync::CancellationToken;

use crate::errors::DutyError;

/// Holds a duty back until its attestation moment within the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotTimingGate {
    genesis_time: u64,
    seconds_per_slot: u64,
    attestation_delay: Duration,
}

impl SlotTimingGate {
    pub fn new(genesis_time: u64, seconds_per_slot: u64, attestation_delay: Duration) -> Self {
        Self {
            genesis_time,
            seconds_per_slot,
            attestation_delay,
        }
    }

    pub fn from_network_spec(network_spec: &NetworkSpec) -> Self {
        Self::new(
            network_spec.genesis_time,
            network_spec.seconds_per_slot,
            network_spec.attestation_delay(),
        )
    }

    pub fn with_attestation_delay(mut self, attestation_delay: Duration) -> Self {
        self.attestation_delay = attestation_delay;
        self
    }

    pub fn attestation_delay(&self) -> Duration {
        self.attestation_delay
    }

    /// Moment to attest for `slot`, as a duration since the UNIX epoch.
    pub fn fire_at(&self, slot: u64) -> Duration {
        let slot_start = self
            .genesis_time
            .saturating_add(slot.saturating_mul(self.seconds_per_slot));
        Duration::from_secs(slot_start).saturating_add(self.attestation_delay)
    }

    /// How long to wait from `now` (since the UNIX epoch) before attesting for `slot`.
    ///
    /// Returns `None` if the moment has already passed.
    pub fn duration_until(&self, slot: u64, now: Duration) -> Option<Duration> {
        self.fire_at(slot)
            .checked_sub(now)
            .filter(|remaining| !remaining.is_zero())
    }

    /// Suspend until the attestation moment for `slot` or until `shutdown` is cancelled.
    pub async fn wait(&self, slot: u64, shutdown: &CancellationToken) -> Result<(), DutyError> {
        if shutdown.is_cancelled() {
            return Err(DutyError::ShutdownRequested);
        }

        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        let Some(remaining) = self.duration_until(slot, now) else {
            return Ok(());
        };

        tokio::select! {
            _ = shutdown.cancelled() => Err(DutyError::ShutdownRequested),
            _ = tokio::time::sleep(remaining) => Ok(()),
        }
    }
}
