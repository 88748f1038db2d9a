//! Committee bitfields.
//!
//! Bit `i` of a committee bitfield lives in byte `i / 8` and is counted from the most significant
//! bit of that byte, so position 0 is `0b1000_0000` of the first byte and position 9 is
//! `0b0100_0000` of the second. Every node on the network must agree on this layout.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BitfieldError {
    #[error("Committee is empty")]
    EmptyCommittee,

    #[error("Position {position} is out of bounds for a committee of size {committee_size}")]
    PositionOutOfBounds {
        position: usize,
        committee_size: usize,
    },
}

/// Number of bytes needed to hold one bit per committee member.
pub fn bitfield_length(committee_size: usize) -> usize {
    committee_size.div_ceil(8)
}

/// An all-zero bitfield for a committee of `committee_size` members.
pub fn empty_bitfield(committee_size: usize) -> Result<Vec<u8>, BitfieldError> {
    if committee_size == 0 {
        return Err(BitfieldError::EmptyCommittee);
    }
    Ok(vec![0; bitfield_length(committee_size)])
}

/// A bitfield with only the bit for `position` set.
pub fn set_bitfield(position: usize, committee_size: usize) -> Result<Vec<u8>, BitfieldError> {
    let mut bitfield = empty_bitfield(committee_size)?;
    if position >= committee_size {
        return Err(BitfieldError::PositionOutOfBounds {
            position,
            committee_size,
        });
    }
    bitfield[position / 8] |= 0x80 >> (position % 8);
    Ok(bitfield)
}

pub fn is_bit_set(bitfield: &[u8], position: usize) -> bool {
    bitfield
        .get(position / 8)
        .is_some_and(|byte| byte & (0x80 >> (position % 8)) != 0)
}

pub fn count_set_bits(bitfield: &[u8]) -> u32 {
    bitfield.iter().map(|byte| byte.count_ones()).sum()
}
