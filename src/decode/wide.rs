//! Word-at-a-time bulk decoding for whitespace-free runs.

use crate::alphabet::Alphabet;
use crate::tables::INVALID_VALUE;
use arrayref::array_ref;

/// Characters consumed per bulk step: two whole quartets.
pub(crate) const BLOCK_INPUT: usize = 8;

/// Decode 8 alphabet characters into 6 bytes in one u64 accumulation.
///
/// Fails with the offending byte when any character falls outside the
/// alphabet (whitespace and padding included); the caller falls back to the
/// per-character path.
#[inline]
pub(crate) fn decode_block<A: Alphabet>(alphabet: A, input: &[u8; 8]) -> Result<[u8; 6], u8> {
    let mut word: u64 = 0;
    for (idx, &byte) in input.iter().enumerate() {
        let bits = alphabet.decode_u8(byte);
        if bits == INVALID_VALUE {
            return Err(byte);
        }
        let shift = 64 - (idx as u64 + 1) * 6;
        word |= u64::from(bits) << shift;
    }
    debug_assert!(word.trailing_zeros() >= 16);
    let be = word.to_be_bytes();
    Ok(*array_ref![be, 0, 6])
}
