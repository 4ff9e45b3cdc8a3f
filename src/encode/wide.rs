//! Word-at-a-time bulk encoding for long aligned runs.

use crate::alphabet::Alphabet;
use crate::u6::U6;
use arrayref::array_ref;

// Each step reads 8 bytes, consumes the leading 6, and emits 8 alphabet
// bytes, so the loop stops while a whole word is still readable.
const INPUT_READ: usize = 8;
const INPUT_STRIDE: usize = 6;

/// Encode as many leading 6-byte groups of `input` as can be read one word
/// at a time, returning the number of input bytes consumed.
pub(crate) fn encode_blocks<A: Alphabet>(alphabet: A, input: &[u8], out: &mut Vec<u8>) -> usize {
    let mut consumed = 0;
    while consumed + INPUT_READ <= input.len() {
        let word = u64::from_be_bytes(*array_ref![input, consumed, INPUT_READ]);
        for idx in 0..8u32 {
            let shift = 64 - (idx + 1) * 6;
            out.push(alphabet.encode_u6(U6::from_low_six_bits((word >> shift) as u8)));
        }
        consumed += INPUT_STRIDE;
    }
    consumed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::encode_quartets;

    #[test]
    fn matches_quartet_path() {
        let input: Vec<u8> = (0u8..=255).cycle().take(300).collect();
        for filled in 0..input.len() {
            let input = &input[..filled];
            let mut bulk = Vec::new();
            let consumed = encode_blocks(crate::STD, input, &mut bulk);
            assert_eq!(consumed % INPUT_STRIDE, 0);
            let mut quartets = Vec::new();
            encode_quartets(crate::STD, &input[..consumed], &mut quartets);
            assert_eq!(bulk, quartets);
        }
    }

    #[test]
    fn url_safe_matches_quartet_path() {
        let input = [0xfb, 0xff, 0xbf, 0xfe, 0x00, 0x01, 0x7f, 0x80, 0xaa, 0x55, 0x12, 0x34];
        let mut bulk = Vec::new();
        let consumed = encode_blocks(crate::URL_SAFE, &input, &mut bulk);
        let mut quartets = Vec::new();
        encode_quartets(crate::URL_SAFE, &input[..consumed], &mut quartets);
        assert_eq!(bulk, quartets);
    }

    #[test]
    fn leaves_short_input_untouched() {
        let mut out = Vec::new();
        assert_eq!(encode_blocks(crate::STD, &[1, 2, 3, 4, 5, 6, 7], &mut out), 0);
        assert!(out.is_empty());
    }
}
