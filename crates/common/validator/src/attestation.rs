use ream_consensus_misc::{
    attestation::Attestation,
    attestation_data::AttestationData,
    bitfield::{BitfieldError, empty_bitfield, set_bitfield},
};
use ssz::Encode;

use crate::{errors::DutyError, signer::Signer};

/// The bytes a validator signs to vote for `data`.
pub fn attestation_signing_message(data: &AttestationData) -> Vec<u8> {
    data.as_ssz_bytes()
}

/// Build the single-validator attestation for the member at `committee_position`.
///
/// Either every field is populated or an error is returned. Custody bits are never set at
/// this stage.
pub fn build_attestation<S: Signer + ?Sized>(
    data: AttestationData,
    committee_size: usize,
    committee_position: usize,
    signer: &S,
    public_key: &[u8],
) -> Result<Attestation, DutyError> {
    let aggregation_bits =
        set_bitfield(committee_position, committee_size).map_err(|err| match err {
            BitfieldError::EmptyCommittee => DutyError::EmptyCommittee,
            err => DutyError::BuildFailed(err.into()),
        })?;
    let custody_bits = empty_bitfield(committee_size).map_err(|_| DutyError::EmptyCommittee)?;

    let signature = signer
        .sign(public_key, &attestation_signing_message(&data))
        .map_err(DutyError::BuildFailed)?;

    Ok(Attestation {
        data,
        aggregation_bits,
        custody_bits,
        signature,
    })
}
