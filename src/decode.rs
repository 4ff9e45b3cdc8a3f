use crate::alphabet::Alphabet;
use crate::tables::INVALID_VALUE;
use std::{error, fmt};

cfg_if::cfg_if! {
    if #[cfg(feature = "wide")] {
        pub(crate) mod wide;
    }
}

pub(crate) const PAD: u8 = b'=';

/// Errors that can occur during decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A byte outside the alphabet, or data resuming after padding, was
    /// found in the input. The offending byte is provided.
    InvalidByte(u8),
    /// The input ends with a single dangling character, which is too short
    /// to carry a whole byte.
    InvalidLength,
    /// More than two padding characters terminate the input.
    InvalidPadding,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            DecodeError::InvalidByte(byte) => write!(f, "invalid byte {}", byte),
            DecodeError::InvalidLength => write!(f, "encoded text cannot have a 6-bit remainder"),
            DecodeError::InvalidPadding => write!(f, "too many padding characters"),
        }
    }
}

impl error::Error for DecodeError {}

// The whitespace bytes tolerated between quartets: space, tab, CR, LF.
#[inline]
pub(crate) fn is_armor_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\r' | b'\n')
}

/// Append the decoding of `input` to `out`.
///
/// Whitespace may appear anywhere and is skipped. Up to two `=` may
/// terminate the data, and an unpadded final quartet of two or three
/// characters is accepted as well.
pub(crate) fn decode_into<A: Alphabet>(
    alphabet: A,
    input: &[u8],
    out: &mut Vec<u8>,
) -> Result<(), DecodeError> {
    let mut quartet = [0u8; 4];
    let mut filled = 0;
    let mut padding = 0;
    let mut i = 0;
    while i < input.len() {
        #[cfg(feature = "wide")]
        {
            if filled == 0 && padding == 0 && i + wide::BLOCK_INPUT <= input.len() {
                if let Ok(block) =
                    wide::decode_block(alphabet, arrayref::array_ref![input, i, 8])
                {
                    out.extend_from_slice(&block);
                    i += wide::BLOCK_INPUT;
                    continue;
                }
            }
        }
        let byte = input[i];
        i += 1;
        if is_armor_whitespace(byte) {
            continue;
        }
        if byte == PAD {
            padding += 1;
            if padding > 2 {
                return Err(DecodeError::InvalidPadding);
            }
            continue;
        }
        if padding > 0 {
            // Data may not resume once padding has started.
            return Err(DecodeError::InvalidByte(byte));
        }
        let bits = alphabet.decode_u8(byte);
        if bits == INVALID_VALUE {
            return Err(DecodeError::InvalidByte(byte));
        }
        quartet[filled] = bits;
        filled += 1;
        if filled == 4 {
            out.push(quartet[0] << 2 | quartet[1] >> 4);
            out.push(quartet[1] << 4 | quartet[2] >> 2);
            out.push(quartet[2] << 6 | quartet[3]);
            filled = 0;
        }
    }
    match filled {
        0 => Ok(()),
        1 => Err(DecodeError::InvalidLength),
        2 => {
            out.push(quartet[0] << 2 | quartet[1] >> 4);
            Ok(())
        }
        3 => {
            out.push(quartet[0] << 2 | quartet[1] >> 4);
            out.push(quartet[1] << 4 | quartet[2] >> 2);
            Ok(())
        }
        _ => unreachable!("impossible quartet fill: {}", filled),
    }
}

/// Streaming armor-body decoder.
///
/// Feed text chunks with [`on_chunk`](Decoder::on_chunk); each call decodes
/// the longest buffered prefix whose non-whitespace character count is a
/// multiple of four and returns the decoded bytes. Splitting the input
/// differently never changes the concatenated output, even when a split
/// lands inside a quartet or a run of whitespace.
/// [`finish`](Decoder::finish) decodes whatever remains, surfacing a
/// malformed-input error if the stream ends misaligned.
///
/// A `Decoder` carries the residual of a single stream; create a fresh one
/// for every stream.
///
/// ```
/// let mut decoder = armor64::Decoder::new();
/// let mut data = decoder.on_chunk(b"QU").unwrap();
/// data.extend(decoder.on_chunk(b"JD").unwrap());
/// data.extend(decoder.finish().unwrap());
/// assert_eq!(data, b"ABC");
/// ```
#[derive(Debug, Default)]
pub struct Decoder {
    // Characters whose non-whitespace count has not yet reached a multiple
    // of four.
    residual: Vec<u8>,
}

impl Decoder {
    /// Create a decoder with an empty residual.
    pub fn new() -> Self {
        Decoder {
            residual: Vec::new(),
        }
    }

    /// Absorb one chunk of encoded text and return the bytes it completed.
    pub fn on_chunk(&mut self, chunk: &[u8]) -> Result<Vec<u8>, DecodeError> {
        self.residual.extend_from_slice(chunk);

        let mut whitespace = self
            .residual
            .iter()
            .filter(|&&byte| is_armor_whitespace(byte))
            .count();

        // Largest prefix whose non-whitespace character count is a whole
        // number of quartets. Shrinking drops the byte at the new length,
        // so the whitespace count tracks the candidate prefix.
        let mut aligned = self.residual.len();
        while aligned > 0 && (aligned - whitespace) % 4 != 0 {
            aligned -= 1;
            if is_armor_whitespace(self.residual[aligned]) {
                whitespace -= 1;
            }
        }

        let mut out = Vec::with_capacity(aligned / 4 * 3);
        decode_into(crate::STD, &self.residual[..aligned], &mut out)?;
        self.residual.drain(..aligned);
        Ok(out)
    }

    /// Decode the remaining residual in full.
    pub fn finish(self) -> Result<Vec<u8>, DecodeError> {
        let mut out = Vec::with_capacity(self.residual.len() / 4 * 3 + 2);
        decode_into(crate::STD, &self.residual, &mut out)?;
        Ok(out)
    }
}

impl crate::stream::Transform for Decoder {
    type Output = Vec<u8>;
    type Error = DecodeError;

    fn on_chunk(&mut self, chunk: &[u8]) -> Result<Vec<u8>, DecodeError> {
        Decoder::on_chunk(self, chunk)
    }

    fn on_end(self) -> Result<Vec<u8>, DecodeError> {
        self.finish()
    }
}
