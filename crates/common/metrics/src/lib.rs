use std::collections::HashMap;

use parking_lot::Mutex;
use prometheus_exporter::prometheus::{
    IntGauge, IntGaugeVec, default_registry, register_int_gauge_vec_with_registry,
    register_int_gauge_with_registry,
};

// Provisioning each metrics
lazy_static::lazy_static! {
    pub static ref VALIDATORS_LAST_VOTE: IntGaugeVec = create_int_gauge_vec(
        "validators_last_vote",
        "Votes of validators, updated when there's a new attestation",
        &["validatorIndex"]
    );

    pub static ref TOTAL_SEEN_ATTESTATIONS: IntGauge = create_int_gauge(
        "total_seen_attestations",
        "Total number of attestations seen by the validators",
    );
}

/// Create a new gauge metric
pub fn create_int_gauge(name: &str, help: &str) -> IntGauge {
    let registry = default_registry();
    register_int_gauge_with_registry!(name, help, registry).expect("failed to create int gauge")
}

/// Create a new gauge vec metric
pub fn create_int_gauge_vec(name: &str, help: &str, label_names: &[&str]) -> IntGaugeVec {
    let registry = default_registry();
    register_int_gauge_vec_with_registry!(name, help, label_names, registry)
        .expect("failed to create int gauge vec")
}

/// Set the value of a gauge metric
pub fn set_int_gauge_vec(gauge_vec: &IntGaugeVec, value: i64, label_values: &[&str]) {
    gauge_vec.with_label_values(label_values).set(value);
}

/// Label used for a validator in `validators_last_vote`.
pub fn validator_label(validator_index: u64) -> String {
    format!("v{validator_index}")
}

/// The observability surface touched by attestation duties.
///
/// Implementations must tolerate concurrent calls from many duty tasks.
pub trait VoteMetrics: Send + Sync {
    fn set_last_vote(&self, validator_index: u64, slot: u64);

    fn increment_seen(&self);
}

/// [VoteMetrics] backed by the process-wide prometheus registry.
#[derive(Debug, Default, Clone, Copy)]
pub struct PrometheusVoteMetrics;

impl VoteMetrics for PrometheusVoteMetrics {
    fn set_last_vote(&self, validator_index: u64, slot: u64) {
        set_int_gauge_vec(
            &VALIDATORS_LAST_VOTE,
            i64::try_from(slot).unwrap_or(i64::MAX),
            &[&validator_label(validator_index)],
        );
    }

    fn increment_seen(&self) {
        TOTAL_SEEN_ATTESTATIONS.inc();
    }
}

/// In-memory [VoteMetrics] for tests and tooling.
#[derive(Debug, Default)]
pub struct RecordedVoteMetrics {
    last_votes: Mutex<HashMap<u64, u64>>,
    seen: Mutex<u64>,
}

impl RecordedVoteMetrics {
    pub fn last_vote(&self, validator_index: u64) -> Option<u64> {
        self.last_votes.lock().get(&validator_index).copied()
    }

    pub fn seen(&self) -> u64 {
        *self.seen.lock()
    }
}

impl VoteMetrics for RecordedVoteMetrics {
    fn set_last_vote(&self, validator_index: u64, slot: u64) {
        self.last_votes.lock().insert(validator_index, slot);
    }

    fn increment_seen(&self) {
        *self.seen.lock() += 1;
    }
}

/// The block a validator voted for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VotedBlock {
    pub slot: u64,
    pub root: Vec<u8>,
}

/// Record `validator_index`'s vote on `block`.
///
/// Nothing is recorded when there is no block.
pub fn report_vote_metrics(
    metrics: &impl VoteMetrics,
    validator_index: u64,
    block: Option<&VotedBlock>,
) {
    let Some(block) = block else {
        return;
    };
    metrics.set_last_vote(validator_index, block.slot);
}
