use ream_consensus_misc::committee_assignment::CommitteeAssignment;

use crate::errors::DutyError;

/// Where a validator sits for one attestation duty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedDuty {
    pub validator_index: u64,
    pub shard: u64,
    pub committee_position: usize,
    pub committee_size: usize,
}

/// Locate `validator_index` in `assignment`'s committee.
///
/// A correctly assigned validator is always a committee member, so a miss indicates stale or
/// inconsistent duties rather than something to skip quietly.
pub fn resolve_duty(
    assignment: &CommitteeAssignment,
    validator_index: u64,
) -> Result<ResolvedDuty, DutyError> {
    let committee_position = assignment
        .committee_position(validator_index)
        .ok_or(DutyError::NotInCommittee { validator_index })?;

    Ok(ResolvedDuty {
        validator_index,
        shard: assignment.shard,
        committee_position,
        committee_size: assignment.committee.len(),
    })
}
